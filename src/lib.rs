pub mod engine;
pub mod loader;
pub mod presentation;
pub mod cli;
pub mod utils;

pub use engine::*;
pub use loader::*;
pub use presentation::*;
pub use cli::*;
pub use utils::*;
