use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::{ConfigError, StatsResult};

/// Athlete used by the report and the `athlete` command when none is given
pub const DEFAULT_ATHLETE: &str = "Michael Fred Phelps, II";

/// Main engine configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsConfig {
    pub data: DataConfig,
    pub report: ReportConfig,
    pub presentation: PresentationConfig,
}

/// Location and layout of the source tables
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    pub events_path: PathBuf,
    pub regions_path: PathBuf,
    pub delimiter: char,
}

/// Report configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub athlete: String,
    pub top_n: usize,
}

/// Chart and map configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub terminal_bar_width: usize,
    /// Extra region name to alpha-3 code mappings for the map resolver
    pub country_aliases: HashMap<String, String>,
}

impl StatsConfig {
    /// Load configuration from a JSON file; missing sections take their defaults
    pub fn from_file(path: &Path) -> StatsResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        Ok(config)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            events_path: PathBuf::from("data/athlete_events.csv"),
            regions_path: PathBuf::from("data/noc_regions.csv"),
            delimiter: ',',
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            athlete: DEFAULT_ATHLETE.to_string(),
            top_n: 10,
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            terminal_bar_width: 50,
            country_aliases: HashMap::new(),
        }
    }
}
