//! Error types for the tab strip crate.
//!
//! The controller itself never fails: missing measurements, unknown names and
//! stale handles all degrade to "no visible effect". Errors only arise while
//! building a [`StripConfig`](crate::StripConfig).

use thiserror::Error;

/// Errors that can occur while loading or validating strip configuration.
#[derive(Error, Debug)]
pub enum StripError {
    /// The configuration text is not valid TOML or does not match the schema.
    #[error("failed to parse strip configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The justify breakpoint must be a finite, non-negative number.
    #[error("invalid breakpoint: {0}")]
    InvalidBreakpoint(f32),

    /// A timing value that must be positive was zero.
    #[error("timing `{name}` must be greater than zero")]
    InvalidTiming { name: &'static str },

    /// The scroll step must be a finite, positive number.
    #[error("invalid scroll step: {0}")]
    InvalidScrollStep(f32),
}

/// Result type for strip configuration operations.
pub type StripResult<T> = Result<T, StripError>;
