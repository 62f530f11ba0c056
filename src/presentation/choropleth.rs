use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use crate::presentation::CountryResolver;
use crate::utils::types::{ColumnMetadata, DataType, ResultTable, Tabular, Value};

pub const NEVER_MEDALED_COLOR: &str = "red";
pub const MEDALED_COLOR: &str = "blue";

/// A country placed on the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapEntry {
    pub country: String,
    pub iso_code: String,
}

/// Single-color world map highlighting a set of countries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethMap {
    pub title: String,
    pub color: String,
    pub entries: Vec<MapEntry>,
    /// Names the resolver could not place; they are left off the map
    pub unresolved: Vec<String>,
}

impl ChoroplethMap {
    /// Resolve every name to an ISO code, dropping the ones that do not resolve
    pub fn build(
        title: &str,
        color: &str,
        countries: &[String],
        resolver: &dyn CountryResolver,
    ) -> Self {
        let mut entries = Vec::with_capacity(countries.len());
        let mut unresolved = Vec::new();

        for country in countries {
            match resolver.resolve(country) {
                Some(iso_code) => entries.push(MapEntry {
                    country: country.clone(),
                    iso_code,
                }),
                None => unresolved.push(country.clone()),
            }
        }

        debug!(
            title,
            placed = entries.len(),
            dropped = unresolved.len(),
            "built choropleth map"
        );

        Self {
            title: title.to_string(),
            color: color.to_string(),
            entries,
            unresolved,
        }
    }

    /// Map of the countries that never won an Olympic medal
    pub fn never_medaled(countries: &[String], resolver: &dyn CountryResolver) -> Self {
        Self::build(
            "Countries that never won an Olympic medal",
            NEVER_MEDALED_COLOR,
            countries,
            resolver,
        )
    }

    /// Map of the countries that won at least one Olympic medal
    pub fn medaled(countries: &[String], resolver: &dyn CountryResolver) -> Self {
        Self::build(
            "Countries that won Olympic medals",
            MEDALED_COLOR,
            countries,
            resolver,
        )
    }

    /// Plotly choropleth figure document
    pub fn to_plotly(&self) -> JsonValue {
        let locations: Vec<&str> = self.entries.iter().map(|e| e.iso_code.as_str()).collect();
        let names: Vec<&str> = self.entries.iter().map(|e| e.country.as_str()).collect();
        let z: Vec<u8> = vec![1; self.entries.len()];

        json!({
            "data": [{
                "type": "choropleth",
                "locations": locations,
                "locationmode": "ISO-3",
                "z": z,
                "text": names,
                "colorscale": [[0, self.color], [1, self.color]],
                "showscale": false
            }],
            "layout": {
                "title": { "text": self.title },
                "geo": {
                    "projection": { "type": "natural earth" },
                    "showcountries": true
                },
                "showlegend": false
            }
        })
    }
}

impl Tabular for ChoroplethMap {
    fn to_table(&self) -> ResultTable {
        let mut table = ResultTable::new(vec![
            ColumnMetadata::new("country", DataType::Text),
            ColumnMetadata::new("iso_code", DataType::Text),
        ]);
        for entry in &self.entries {
            table.push_row(vec![
                Value::from(entry.country.as_str()),
                Value::from(entry.iso_code.as_str()),
            ]);
        }
        table
    }
}
