use csv::{ReaderBuilder, StringRecord, Trim};
use std::fmt::Display;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::engine::Dataset;
use crate::loader::DatasetLoader;
use crate::utils::{
    error::{LoadError, StatsResult},
    types::{EventRecord, RegionRecord},
};

/// Marker the source dataset writes for missing values
const NULL_MARKER: &str = "NA";

/// Loader for the delimited text exports of the events and regions tables
pub struct CsvLoader {
    delimiter: u8,
    supported_extensions: Vec<String>,
}

impl CsvLoader {
    /// Create a comma-delimited loader accepting `.csv` files
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            supported_extensions: vec!["csv".to_string()],
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Check if a file extension is supported
    fn is_supported_extension(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Make sure the path points at a readable file with a supported extension
    fn resolve_file_path(&self, path: &Path) -> Result<PathBuf, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        if !path.is_file() {
            return Err(LoadError::UnsupportedFormat(format!(
                "path is not a file: {}",
                path.display()
            )));
        }

        match path.extension() {
            Some(ext) if self.is_supported_extension(&ext.to_string_lossy()) => {
                Ok(path.to_path_buf())
            }
            Some(ext) => Err(LoadError::UnsupportedFormat(format!(
                "unsupported file extension: {}",
                ext.to_string_lossy()
            ))),
            None => Err(LoadError::UnsupportedFormat(format!(
                "file has no extension: {}",
                path.display()
            ))),
        }
    }

    fn open_reader(&self, path: &Path) -> Result<(csv::Reader<File>, StringRecord), LoadError> {
        let path = self.resolve_file_path(path)?;
        let file = File::open(&path)
            .map_err(|_| LoadError::FileNotFound(path.display().to_string()))?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(Trim::Headers)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| LoadError::Parse {
                file: path.display().to_string(),
                message: format!("failed to read headers: {}", e),
            })?
            .clone();

        Ok((reader, headers))
    }

    /// Parse the athlete events table
    pub fn load_events(&self, path: &Path) -> StatsResult<Vec<EventRecord>> {
        let file = path.display().to_string();
        let (mut reader, headers) = self.open_reader(path)?;
        let columns = EventColumns::locate(&file, &headers)?;

        let mut events = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| LoadError::Parse {
                file: file.clone(),
                message: e.to_string(),
            })?;
            let fields = FieldReader::new(&file, &record);

            events.push(EventRecord {
                id: fields.parse(columns.id, "ID")?,
                name: fields.text(columns.name),
                sex: fields.parse(columns.sex, "Sex")?,
                age: fields.parse_age(columns.age)?,
                height: fields.parse_optional(columns.height, "Height")?,
                weight: fields.parse_optional(columns.weight, "Weight")?,
                team: fields.text(columns.team),
                noc: fields.text(columns.noc),
                games: fields.text(columns.games),
                year: fields.parse(columns.year, "Year")?,
                season: fields.parse(columns.season, "Season")?,
                city: fields.text(columns.city),
                sport: fields.text(columns.sport),
                event: fields.text(columns.event),
                medal: fields.parse_optional(columns.medal, "Medal")?,
            });
        }

        info!(file = %file, rows = events.len(), "loaded events table");
        Ok(events)
    }

    /// Parse the NOC to region mapping table
    pub fn load_regions(&self, path: &Path) -> StatsResult<Vec<RegionRecord>> {
        let file = path.display().to_string();
        let (mut reader, headers) = self.open_reader(path)?;

        let noc = column_position(&file, &headers, "NOC")?;
        let region = column_position(&file, &headers, "region")?;
        // Older exports ship without the notes column
        let notes = headers.iter().position(|h| h == "notes");

        let mut regions = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| LoadError::Parse {
                file: file.clone(),
                message: e.to_string(),
            })?;
            let fields = FieldReader::new(&file, &record);

            regions.push(RegionRecord {
                noc: fields.text(noc),
                region: fields.optional_text(region),
                notes: notes.and_then(|index| fields.optional_text(index)),
            });
        }

        info!(file = %file, rows = regions.len(), "loaded regions table");
        Ok(regions)
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader for CsvLoader {
    fn load(&self, events_path: &Path, regions_path: &Path) -> StatsResult<Dataset> {
        let events = self.load_events(events_path)?;
        let regions = self.load_regions(regions_path)?;
        Ok(Dataset::new(events, regions))
    }

    fn supported_extensions(&self) -> &[String] {
        &self.supported_extensions
    }
}

fn column_position(file: &str, headers: &StringRecord, column: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| LoadError::MissingColumn {
            file: file.to_string(),
            column: column.to_string(),
        })
}

/// Column positions of the events table, resolved from its header row
struct EventColumns {
    id: usize,
    name: usize,
    sex: usize,
    age: usize,
    height: usize,
    weight: usize,
    team: usize,
    noc: usize,
    games: usize,
    year: usize,
    season: usize,
    city: usize,
    sport: usize,
    event: usize,
    medal: usize,
}

impl EventColumns {
    fn locate(file: &str, headers: &StringRecord) -> Result<Self, LoadError> {
        let column = |name: &str| column_position(file, headers, name);

        Ok(Self {
            id: column("ID")?,
            name: column("Name")?,
            sex: column("Sex")?,
            age: column("Age")?,
            height: column("Height")?,
            weight: column("Weight")?,
            team: column("Team")?,
            noc: column("NOC")?,
            games: column("Games")?,
            year: column("Year")?,
            season: column("Season")?,
            city: column("City")?,
            sport: column("Sport")?,
            event: column("Event")?,
            medal: column("Medal")?,
        })
    }
}

/// Typed access to the fields of one record
struct FieldReader<'a> {
    file: &'a str,
    record: &'a StringRecord,
}

impl<'a> FieldReader<'a> {
    fn new(file: &'a str, record: &'a StringRecord) -> Self {
        Self { file, record }
    }

    fn raw(&self, index: usize) -> &str {
        self.record.get(index).unwrap_or("")
    }

    fn text(&self, index: usize) -> String {
        self.raw(index).to_string()
    }

    fn optional_text(&self, index: usize) -> Option<String> {
        let field = self.raw(index);
        if is_null(field) {
            None
        } else {
            Some(field.to_string())
        }
    }

    fn parse_error(&self, column: &str, field: &str, reason: impl Display) -> LoadError {
        let line = self.record.position().map(|p| p.line()).unwrap_or(0);
        LoadError::Parse {
            file: self.file.to_string(),
            message: format!("line {}: invalid {} '{}': {}", line, column, field, reason),
        }
    }

    fn parse<T>(&self, index: usize, column: &str) -> Result<T, LoadError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let field = self.raw(index);
        field.parse().map_err(|e| self.parse_error(column, field, e))
    }

    fn parse_optional<T>(&self, index: usize, column: &str) -> Result<Option<T>, LoadError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let field = self.raw(index);
        if is_null(field) {
            return Ok(None);
        }
        field
            .parse()
            .map(Some)
            .map_err(|e| self.parse_error(column, field, e))
    }

    /// Ages are whole years but some exports write them as floats ("24.0")
    fn parse_age(&self, index: usize) -> Result<Option<u32>, LoadError> {
        let Some(age) = self.parse_optional::<f64>(index, "Age")? else {
            return Ok(None);
        };

        if age.is_finite() && age >= 0.0 && age.fract() == 0.0 && age <= f64::from(u32::MAX) {
            Ok(Some(age as u32))
        } else {
            debug!(age, "rejecting non-integral age");
            Err(self.parse_error("Age", self.raw(index), "not a whole number of years"))
        }
    }
}

fn is_null(field: &str) -> bool {
    field.is_empty() || field == NULL_MARKER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::types::{Medal, Season, Sex};
    use std::fs;
    use tempfile::TempDir;

    const EVENTS_HEADER: &str =
        "\"ID\",\"Name\",\"Sex\",\"Age\",\"Height\",\"Weight\",\"Team\",\"NOC\",\"Games\",\"Year\",\"Season\",\"City\",\"Sport\",\"Event\",\"Medal\"";

    #[test]
    fn test_null_markers() {
        assert!(is_null(""));
        assert!(is_null("NA"));
        assert!(!is_null("NAM"));
        assert!(!is_null("0"));
    }

    #[test]
    fn test_parse_quoted_event_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("athlete_events.csv");
        let content = format!(
            "{}\n1,\"A Dijiang\",\"M\",24,180,80,\"China\",\"CHN\",\"1992 Summer\",1992,\"Summer\",\"Barcelona\",\"Basketball\",\"Basketball Men's Basketball\",NA\n\
             2,\"Michael Fred Phelps, II\",\"M\",23.0,193,91,\"United States\",\"USA\",\"2008 Summer\",2008,\"Summer\",\"Beijing\",\"Swimming\",\"Swimming Men's 200 metres Butterfly\",\"Gold\"\n",
            EVENTS_HEADER
        );
        fs::write(&path, content).unwrap();

        let events = CsvLoader::new().load_events(&path).unwrap();
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].name, "A Dijiang");
        assert_eq!(events[0].medal, None);
        assert_eq!(events[0].season, Season::Summer);

        assert_eq!(events[1].name, "Michael Fred Phelps, II");
        assert_eq!(events[1].sex, Sex::Male);
        assert_eq!(events[1].age, Some(23));
        assert_eq!(events[1].weight, Some(91.0));
        assert_eq!(events[1].medal, Some(Medal::Gold));
    }

    #[test]
    fn test_field_text_is_kept_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("noc_regions.csv");
        fs::write(&path, " NOC , region ,notes\nSWE,\" Sweden \",\n").unwrap();

        let regions = CsvLoader::new().load_regions(&path).unwrap();
        assert_eq!(regions[0].noc, "SWE");
        assert_eq!(regions[0].region.as_deref(), Some(" Sweden "));

        let events_path = dir.path().join("athlete_events.csv");
        let content = format!(
            "{}\n1,\" Jan Boklov\",M,22,NA,NA,Sweden,SWE,1988 Winter,1988,Winter,Calgary,Ski Jumping,Ski Jumping Men's Normal Hill,NA\n",
            EVENTS_HEADER
        );
        fs::write(&events_path, content).unwrap();

        let events = CsvLoader::new().load_events(&events_path).unwrap();
        assert_eq!(events[0].name, " Jan Boklov");
    }

    #[test]
    fn test_fractional_age_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("athlete_events.csv");
        let content = format!(
            "{}\n1,A,M,24.5,NA,NA,China,CHN,1992 Summer,1992,Summer,Barcelona,Judo,Judo Men's Lightweight,NA\n",
            EVENTS_HEADER
        );
        fs::write(&path, content).unwrap();

        let result = CsvLoader::new().load_events(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid Age"));
    }
}
