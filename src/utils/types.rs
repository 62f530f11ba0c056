use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Medal outcome of a single event entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Medal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Gold" => Ok(Medal::Gold),
            "Silver" => Ok(Medal::Silver),
            "Bronze" => Ok(Medal::Bronze),
            other => Err(format!("unknown medal '{}'", other)),
        }
    }
}

/// Which medals count when splitting countries into medaled / not medaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedalFilter {
    Any,
    Only(Medal),
}

impl MedalFilter {
    /// Every filter, in report order
    pub const ALL: [MedalFilter; 4] = [
        MedalFilter::Any,
        MedalFilter::Only(Medal::Gold),
        MedalFilter::Only(Medal::Silver),
        MedalFilter::Only(Medal::Bronze),
    ];

    /// Check whether an entry's outcome satisfies this filter
    pub fn matches(&self, outcome: Option<Medal>) -> bool {
        match (self, outcome) {
            (MedalFilter::Any, Some(_)) => true,
            (MedalFilter::Only(kind), Some(medal)) => *kind == medal,
            (_, None) => false,
        }
    }
}

impl fmt::Display for MedalFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedalFilter::Any => f.write_str("any"),
            MedalFilter::Only(medal) => write!(f, "{}", medal.as_str().to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("M"),
            Sex::Female => f.write_str("F"),
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            other => Err(format!("unknown sex '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Winter,
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Summer" => Ok(Season::Summer),
            "Winter" => Ok(Season::Winter),
            other => Err(format!("unknown season '{}'", other)),
        }
    }
}

/// One athlete's participation in one event at one Games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: u32,
    pub name: String,
    pub sex: Sex,
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub team: String,
    pub noc: String,
    pub games: String,
    pub year: u16,
    pub season: Season,
    pub city: String,
    pub sport: String,
    pub event: String,
    pub medal: Option<Medal>,
}

/// NOC code to region mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub noc: String,
    pub region: Option<String>,
    pub notes: Option<String>,
}

/// Supported result column types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Text,
    Integer,
    Float,
}

/// Metadata for result columns
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl ColumnMetadata {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Individual cell values
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A row of data in a result table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    /// Create a new row with the given values
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// Generic tabular rendering of a query answer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<ColumnMetadata>,
    pub rows: Vec<Row>,
}

impl ResultTable {
    pub fn new(columns: Vec<ColumnMetadata>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, values: Vec<Value>) {
        self.rows.push(Row::new(values));
    }

    /// Get the number of rows in the table
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Query answers that can be printed by the CLI formatter
pub trait Tabular {
    fn to_table(&self) -> ResultTable;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medal_parsing() {
        assert_eq!("Gold".parse::<Medal>(), Ok(Medal::Gold));
        assert_eq!("Bronze".parse::<Medal>(), Ok(Medal::Bronze));
        assert!("NA".parse::<Medal>().is_err());
        assert!("gold".parse::<Medal>().is_err());
    }

    #[test]
    fn test_medal_filter_matches() {
        assert!(MedalFilter::Any.matches(Some(Medal::Bronze)));
        assert!(!MedalFilter::Any.matches(None));
        assert!(MedalFilter::Only(Medal::Gold).matches(Some(Medal::Gold)));
        assert!(!MedalFilter::Only(Medal::Gold).matches(Some(Medal::Silver)));
        assert!(!MedalFilter::Only(Medal::Silver).matches(None));
    }

    #[test]
    fn test_medal_filter_display() {
        assert_eq!(MedalFilter::Any.to_string(), "any");
        assert_eq!(MedalFilter::Only(Medal::Silver).to_string(), "silver");
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(Some(14u32)), Value::Integer(14));
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from("USA"), Value::Text("USA".to_string()));
    }

    #[test]
    fn test_result_table_rows() {
        let mut table = ResultTable::new(vec![ColumnMetadata::new("name", DataType::Text)]);
        assert!(table.is_empty());

        table.push_row(vec![Value::from("Germany")]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows[0].get(0), Some(&Value::Text("Germany".to_string())));
        assert_eq!(table.rows[0].get(1), None);
    }
}
