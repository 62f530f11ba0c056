use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::engine::Dataset;
use crate::utils::types::{
    ColumnMetadata, DataType, EventRecord, Medal, ResultTable, Sex, Tabular, Value,
};

/// Which end of the age distribution to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeExtreme {
    Youngest,
    Oldest,
}

/// Medal tally of one athlete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteMedalSummary {
    pub athlete: String,
    pub total: usize,
    /// Only kinds the athlete actually won appear here
    pub breakdown: BTreeMap<Medal, usize>,
}

/// Identifying columns of an athlete's entry, used for age extremes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub name: String,
    pub age: u32,
    pub sex: Sex,
    pub team: String,
    pub year: u16,
    pub sport: String,
    pub event: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

/// Number of entries recorded for one athlete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteParticipation {
    pub name: String,
    pub entries: usize,
}

/// Read-only query engine over a loaded dataset
///
/// Every query is a single pass over the in-memory tables. Nothing is cached,
/// so calling a query twice returns the same answer.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    pub(crate) dataset: Dataset,
}

impl QueryEngine {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub(crate) fn events(&self) -> &[EventRecord] {
        self.dataset.events()
    }

    /// Total medals and per-kind breakdown for an exact athlete name
    pub fn athlete_medal_summary(&self, athlete: &str) -> AthleteMedalSummary {
        let mut breakdown = BTreeMap::new();
        for medal in self
            .events()
            .iter()
            .filter(|event| event.name == athlete)
            .filter_map(|event| event.medal)
        {
            *breakdown.entry(medal).or_insert(0) += 1;
        }

        debug!(athlete, kinds = breakdown.len(), "athlete medal summary");

        AthleteMedalSummary {
            athlete: athlete.to_string(),
            total: breakdown.values().sum(),
            breakdown,
        }
    }

    /// Number of distinct non-null regions across all joined events
    pub fn distinct_nation_count(&self) -> usize {
        self.dataset
            .joined()
            .filter_map(|(_, region)| region)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Every distinct entry whose age equals the global minimum or maximum
    ///
    /// Ties are all returned, in the order they first appear in the table.
    /// Returns an empty list when no ages are recorded.
    pub fn extreme_age(&self, extreme: AgeExtreme) -> Vec<AthleteProfile> {
        let ages = self.events().iter().filter_map(|event| event.age);
        let target = match extreme {
            AgeExtreme::Youngest => ages.min(),
            AgeExtreme::Oldest => ages.max(),
        };

        let Some(target) = target else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        self.events()
            .iter()
            .filter(|event| event.age == Some(target))
            .map(|event| AthleteProfile {
                name: event.name.clone(),
                age: target,
                sex: event.sex,
                team: event.team.clone(),
                year: event.year,
                sport: event.sport.clone(),
                event: event.event.clone(),
            })
            .filter(|profile| seen.insert(profile.clone()))
            .collect()
    }

    /// Lightest and heaviest recorded weight, `None` when no weights are recorded
    pub fn weight_range(&self) -> Option<WeightRange> {
        self.events()
            .iter()
            .filter_map(|event| event.weight)
            .filter(|weight| !weight.is_nan())
            .fold(None, |range, weight| match range {
                None => Some(WeightRange { min: weight, max: weight }),
                Some(WeightRange { min, max }) => Some(WeightRange {
                    min: min.min(weight),
                    max: max.max(weight),
                }),
            })
    }

    /// Athlete with the most entries
    ///
    /// When several athletes share the highest count, the lexicographically
    /// smallest name wins.
    pub fn most_frequent_athlete(&self) -> Option<AthleteParticipation> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for event in self.events() {
            *counts.entry(event.name.as_str()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .max_by(|(name_a, count_a), (name_b, count_b)| {
                count_a.cmp(count_b).then_with(|| name_b.cmp(name_a))
            })
            .map(|(name, entries)| AthleteParticipation {
                name: name.to_string(),
                entries,
            })
    }
}

impl Tabular for AthleteMedalSummary {
    fn to_table(&self) -> ResultTable {
        let mut table = ResultTable::new(vec![
            ColumnMetadata::new("medal", DataType::Text),
            ColumnMetadata::new("count", DataType::Integer),
        ]);
        for (medal, count) in &self.breakdown {
            table.push_row(vec![Value::from(medal.as_str()), Value::from(*count)]);
        }
        table.push_row(vec![Value::from("Total"), Value::from(self.total)]);
        table
    }
}

impl Tabular for [AthleteProfile] {
    fn to_table(&self) -> ResultTable {
        let mut table = ResultTable::new(vec![
            ColumnMetadata::new("name", DataType::Text),
            ColumnMetadata::new("age", DataType::Integer),
            ColumnMetadata::new("sex", DataType::Text),
            ColumnMetadata::new("team", DataType::Text),
            ColumnMetadata::new("year", DataType::Integer),
            ColumnMetadata::new("sport", DataType::Text),
            ColumnMetadata::new("event", DataType::Text),
        ]);
        for profile in self {
            table.push_row(vec![
                Value::from(profile.name.as_str()),
                Value::from(profile.age),
                Value::from(profile.sex.to_string()),
                Value::from(profile.team.as_str()),
                Value::from(profile.year),
                Value::from(profile.sport.as_str()),
                Value::from(profile.event.as_str()),
            ]);
        }
        table
    }
}

impl Tabular for Option<WeightRange> {
    fn to_table(&self) -> ResultTable {
        let mut table = ResultTable::new(vec![
            ColumnMetadata::new("min_weight", DataType::Float).nullable(),
            ColumnMetadata::new("max_weight", DataType::Float).nullable(),
        ]);
        table.push_row(vec![
            Value::from(self.map(|range| range.min)),
            Value::from(self.map(|range| range.max)),
        ]);
        table
    }
}

impl Tabular for Option<AthleteParticipation> {
    fn to_table(&self) -> ResultTable {
        let mut table = ResultTable::new(vec![
            ColumnMetadata::new("name", DataType::Text),
            ColumnMetadata::new("entries", DataType::Integer),
        ]);
        if let Some(athlete) = self {
            table.push_row(vec![
                Value::from(athlete.name.as_str()),
                Value::from(athlete.entries),
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::types::{RegionRecord, Season};

    fn entry(name: &str, age: Option<u32>, medal: Option<Medal>) -> EventRecord {
        EventRecord {
            id: 1,
            name: name.to_string(),
            sex: Sex::Male,
            age,
            height: None,
            weight: None,
            team: "United States".to_string(),
            noc: "USA".to_string(),
            games: "2008 Summer".to_string(),
            year: 2008,
            season: Season::Summer,
            city: "Beijing".to_string(),
            sport: "Swimming".to_string(),
            event: "Swimming Men's 100 metres Butterfly".to_string(),
            medal,
        }
    }

    fn engine(events: Vec<EventRecord>) -> QueryEngine {
        let regions = vec![RegionRecord {
            noc: "USA".to_string(),
            region: Some("USA".to_string()),
            notes: None,
        }];
        QueryEngine::new(Dataset::new(events, regions))
    }

    #[test]
    fn test_unknown_athlete_has_no_medals() {
        let engine = engine(vec![entry("Someone Else", Some(20), Some(Medal::Gold))]);
        let summary = engine.athlete_medal_summary("Nobody");

        assert_eq!(summary.total, 0);
        assert!(summary.breakdown.is_empty());
    }

    #[test]
    fn test_duplicate_extreme_entries_are_collapsed() {
        let engine = engine(vec![
            entry("Twin", Some(12), None),
            entry("Twin", Some(12), None),
            entry("Adult", Some(30), None),
        ]);

        let youngest = engine.extreme_age(AgeExtreme::Youngest);
        assert_eq!(youngest.len(), 1);
        assert_eq!(youngest[0].name, "Twin");
    }

    #[test]
    fn test_no_ages_yields_empty_extremes() {
        let engine = engine(vec![entry("Unknown Age", None, None)]);
        assert!(engine.extreme_age(AgeExtreme::Youngest).is_empty());
        assert!(engine.extreme_age(AgeExtreme::Oldest).is_empty());
    }

    #[test]
    fn test_most_frequent_tie_prefers_smallest_name() {
        let engine = engine(vec![
            entry("Zed", None, None),
            entry("Amy", None, None),
            entry("Zed", None, None),
            entry("Amy", None, None),
            entry("Bob", None, None),
        ]);

        let athlete = engine.most_frequent_athlete().unwrap();
        assert_eq!(athlete.name, "Amy");
        assert_eq!(athlete.entries, 2);
    }

    #[test]
    fn test_empty_dataset_edges() {
        let engine = QueryEngine::new(Dataset::default());
        assert_eq!(engine.distinct_nation_count(), 0);
        assert!(engine.weight_range().is_none());
        assert!(engine.most_frequent_athlete().is_none());
    }

    #[test]
    fn test_summary_table_has_total_row() {
        let engine = engine(vec![
            entry("Swimmer", None, Some(Medal::Silver)),
            entry("Swimmer", None, Some(Medal::Gold)),
        ]);
        let table = engine.athlete_medal_summary("Swimmer").to_table();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows[0].get(0), Some(&Value::Text("Gold".to_string())));
        assert_eq!(table.rows[2].get(1), Some(&Value::Integer(2)));
    }
}
