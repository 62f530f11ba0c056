use thiserror::Error;

/// Main error type for the statistics engine
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Presentation error: {0}")]
    Presentation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while loading the source tables
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Result type alias for engine operations
pub type StatsResult<T> = Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_error_from_load_error() {
        let load_error = LoadError::FileNotFound("athlete_events.csv".to_string());
        let stats_error: StatsError = load_error.into();

        match stats_error {
            StatsError::Load(LoadError::FileNotFound(path)) => {
                assert_eq!(path, "athlete_events.csv");
            }
            _ => panic!("Expected Load error"),
        }
    }

    #[test]
    fn test_missing_column_display() {
        let error = LoadError::MissingColumn {
            file: "noc_regions.csv".to_string(),
            column: "region".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing required column 'region' in noc_regions.csv"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let stats_error: StatsError = ConfigError::Parse {
            path: "stats.json".to_string(),
            source,
        }
        .into();

        assert!(matches!(stats_error, StatsError::Config(ConfigError::Parse { .. })));
        assert!(stats_error.to_string().contains("Invalid config file stats.json"));
    }

    #[test]
    fn test_error_display() {
        let error = StatsError::Presentation("empty chart".to_string());
        let error_string = format!("{}", error);
        assert!(error_string.contains("Presentation error: empty chart"));
    }

    #[test]
    fn test_stats_result_type() {
        let success: StatsResult<usize> = Ok(42);
        let failure: StatsResult<usize> = Err(StatsError::Internal("test error".to_string()));

        assert!(success.is_ok());

        match failure {
            Err(StatsError::Internal(msg)) => assert_eq!(msg, "test error"),
            _ => panic!("Expected Internal error"),
        }
    }
}
