use std::path::Path;

use crate::engine::Dataset;
use crate::utils::error::StatsResult;

/// Base trait for anything that produces the two source tables
pub trait DatasetLoader {
    /// Load the events and regions tables and join them into a dataset
    fn load(&self, events_path: &Path, regions_path: &Path) -> StatsResult<Dataset>;

    /// File extensions this loader accepts
    fn supported_extensions(&self) -> &[String];
}
