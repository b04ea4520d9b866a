//! Property lookup errors.

use rc_core::RcError;
use thiserror::Error;

/// Result type for property operations.
pub type PropResult<T> = Result<T, PropError>;

/// Errors that can occur while building or querying refrigerant properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropError {
    /// Lookup against an empty sample set.
    #[error("No property data available for {what}")]
    NoData { what: &'static str },

    /// Saturation samples that do not rise together with pressure.
    #[error("Saturation samples not monotonic: {column} decreases at sample {index}")]
    NonMonotonic { index: usize, column: &'static str },

    /// Non-physical values (negative pressure, negative mass flow, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<RcError> for PropError {
    fn from(err: RcError) -> Self {
        match err {
            RcError::NonFinite { what, .. } => PropError::NonPhysical { what },
            RcError::InvalidArg { what } => PropError::InvalidArg { what },
            RcError::Invariant { what } => PropError::NonPhysical { what },
        }
    }
}
