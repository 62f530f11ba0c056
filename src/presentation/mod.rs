// Charts, maps and the country name resolver they depend on
pub mod resolver;
pub mod charts;
pub mod choropleth;

pub use resolver::*;
pub use charts::*;
pub use choropleth::*;
