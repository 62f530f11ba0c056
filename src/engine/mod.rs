// Query engine components
pub mod dataset;
pub mod query_engine;
pub mod medal_queries;
pub mod reports;

pub use dataset::*;
pub use query_engine::*;
pub use medal_queries::*;
pub use reports::*;
