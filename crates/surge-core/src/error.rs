//! Error types shared across Surge crates.

use thiserror::Error;

/// Malformed input rejected at a decision boundary.
///
/// Validation failures are never retried; the caller gets them back
/// immediately with the offending values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("fleet state invariant violated: desired {desired} outside bounds [{min}, {max}]")]
    FleetBounds { min: u32, desired: u32, max: u32 },

    #[error("alert confidence {0} out of range (0-100)")]
    ConfidenceOutOfRange(u8),
}

/// Bad configuration detected at startup.
///
/// Configuration is process-lifetime: these are fatal at load time and
/// never revalidated per decision.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("fleet id must not be empty")]
    MissingFleetId,

    #[error("min_capacity {min} exceeds max_capacity {max}")]
    InvalidBounds { min: u32, max: u32 },

    #[error("{0} must be positive")]
    NonPositiveIncrement(&'static str),
}
