pub mod config;
pub mod error;
pub mod types;

pub use config::SurgeConfig;
pub use error::{ConfigError, ValidationError};
pub use types::*;
