// Source table loaders
pub mod loader_trait;
pub mod csv_loader;

pub use loader_trait::*;
pub use csv_loader::*;
