//! Country level medal queries: the per-NOC ranking and the set algebra over
//! region names that splits countries into medaled and never medaled.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use crate::engine::QueryEngine;
use crate::utils::types::{ColumnMetadata, DataType, Medal, MedalFilter, ResultTable, Tabular, Value};

/// One row of the country medal ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryMedals {
    /// Team name of the first entry recorded for this NOC
    pub country: String,
    pub noc: String,
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
    pub total: usize,
}

/// Number of countries lacking each kind of medal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalGapCounts {
    pub any: usize,
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}

impl MedalGapCounts {
    pub fn get(&self, filter: MedalFilter) -> usize {
        match filter {
            MedalFilter::Any => self.any,
            MedalFilter::Only(Medal::Gold) => self.gold,
            MedalFilter::Only(Medal::Silver) => self.silver,
            MedalFilter::Only(Medal::Bronze) => self.bronze,
        }
    }
}

impl QueryEngine {
    /// Medal counts per NOC, highest total first
    ///
    /// Medals are grouped by NOC code rather than by region, so NOCs that map
    /// to the same region keep separate rows. Rows with equal totals are
    /// ordered by NOC code.
    pub fn country_medal_ranking(&self) -> Vec<CountryMedals> {
        let mut team_by_noc: HashMap<&str, &str> = HashMap::new();
        let mut tallies: BTreeMap<&str, [usize; 3]> = BTreeMap::new();

        for event in self.events() {
            team_by_noc.entry(event.noc.as_str()).or_insert(event.team.as_str());

            if let Some(medal) = event.medal {
                let tally = tallies.entry(event.noc.as_str()).or_insert([0; 3]);
                match medal {
                    Medal::Gold => tally[0] += 1,
                    Medal::Silver => tally[1] += 1,
                    Medal::Bronze => tally[2] += 1,
                }
            }
        }

        let mut ranking: Vec<CountryMedals> = tallies
            .into_iter()
            .map(|(noc, [gold, silver, bronze])| CountryMedals {
                country: team_by_noc.get(noc).copied().unwrap_or(noc).to_string(),
                noc: noc.to_string(),
                gold,
                silver,
                bronze,
                total: gold + silver + bronze,
            })
            .collect();

        // Stable, so NOC order from the BTreeMap breaks ties
        ranking.sort_by(|a, b| b.total.cmp(&a.total));

        debug!(rows = ranking.len(), "country medal ranking");
        ranking
    }

    /// Every distinct non-null region present in the joined events
    fn all_regions(&self) -> BTreeSet<&str> {
        self.dataset.joined().filter_map(|(_, region)| region).collect()
    }

    /// Regions with at least one entry matching the medal filter
    fn medaled_regions(&self, filter: MedalFilter) -> BTreeSet<&str> {
        self.dataset
            .joined()
            .filter(|(event, _)| filter.matches(event.medal))
            .filter_map(|(_, region)| region)
            .collect()
    }

    fn regions_without(&self, filter: MedalFilter) -> BTreeSet<&str> {
        let medaled = self.medaled_regions(filter);
        self.all_regions()
            .into_iter()
            .filter(|region| !medaled.contains(region))
            .collect()
    }

    /// Sorted names of regions holding at least one medal matching the filter
    pub fn countries_with_medals(&self, filter: MedalFilter) -> Vec<String> {
        self.medaled_regions(filter)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Sorted names of regions without any medal matching the filter
    pub fn countries_without_medals(&self, filter: MedalFilter) -> Vec<String> {
        self.regions_without(filter)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn countries_without_medals_count(&self, filter: MedalFilter) -> usize {
        self.regions_without(filter).len()
    }

    /// Countries lacking a medal of each kind, computed together for reports
    pub fn medal_gap_counts(&self) -> MedalGapCounts {
        let all = self.all_regions();
        let missing = |filter: MedalFilter| {
            let medaled = self.medaled_regions(filter);
            all.iter().filter(|region| !medaled.contains(*region)).count()
        };

        MedalGapCounts {
            any: missing(MedalFilter::Any),
            gold: missing(MedalFilter::Only(Medal::Gold)),
            silver: missing(MedalFilter::Only(Medal::Silver)),
            bronze: missing(MedalFilter::Only(Medal::Bronze)),
        }
    }

    /// Sorted names of regions that never won any medal
    pub fn countries_never_medaled(&self) -> Vec<String> {
        self.countries_without_medals(MedalFilter::Any)
    }
}

impl Tabular for [CountryMedals] {
    fn to_table(&self) -> ResultTable {
        let mut table = ResultTable::new(vec![
            ColumnMetadata::new("country", DataType::Text),
            ColumnMetadata::new("noc", DataType::Text),
            ColumnMetadata::new("gold", DataType::Integer),
            ColumnMetadata::new("silver", DataType::Integer),
            ColumnMetadata::new("bronze", DataType::Integer),
            ColumnMetadata::new("total", DataType::Integer),
        ]);
        for row in self {
            table.push_row(vec![
                Value::from(row.country.as_str()),
                Value::from(row.noc.as_str()),
                Value::from(row.gold),
                Value::from(row.silver),
                Value::from(row.bronze),
                Value::from(row.total),
            ]);
        }
        table
    }
}

impl Tabular for MedalGapCounts {
    fn to_table(&self) -> ResultTable {
        let mut table = ResultTable::new(vec![
            ColumnMetadata::new("medal", DataType::Text),
            ColumnMetadata::new("countries_without", DataType::Integer),
        ]);
        for filter in MedalFilter::ALL {
            table.push_row(vec![Value::from(filter.to_string()), Value::from(self.get(filter))]);
        }
        table
    }
}
