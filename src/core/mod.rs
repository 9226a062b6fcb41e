pub mod config;
pub mod error;
pub mod types;

pub use config::GameRules;
pub use error::{EngineError, Result};
pub use types::{Presidency, RegionId, Symbol, Turn};
