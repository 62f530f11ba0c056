use std::collections::HashMap;

use crate::utils::types::{EventRecord, RegionRecord};

/// The events table plus the NOC -> region lookup built from the regions table
///
/// Immutable once built. The join is a left join: events whose
/// NOC is missing from the regions table, or maps to a null region, have no
/// region.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    events: Vec<EventRecord>,
    region_by_noc: HashMap<String, Option<String>>,
}

impl Dataset {
    pub fn new(events: Vec<EventRecord>, regions: Vec<RegionRecord>) -> Self {
        let mut region_by_noc = HashMap::with_capacity(regions.len());
        for record in regions {
            // First mapping wins if a code is listed twice
            region_by_noc.entry(record.noc).or_insert(record.region);
        }

        Self {
            events,
            region_by_noc,
        }
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Region mapped to an NOC code, if any
    pub fn region_for_noc(&self, noc: &str) -> Option<&str> {
        self.region_by_noc.get(noc).and_then(|region| region.as_deref())
    }

    /// Region an event joins to, if any
    pub fn region_of(&self, event: &EventRecord) -> Option<&str> {
        self.region_for_noc(&event.noc)
    }

    /// Events paired with their joined region
    pub fn joined(&self) -> impl Iterator<Item = (&EventRecord, Option<&str>)> + '_ {
        self.events.iter().map(move |event| (event, self.region_of(event)))
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
