//! Error types for stage operations.

use crate::traits::StageKind;
use rc_props::PropError;
use thiserror::Error;

/// Errors that can occur while configuring or running a stage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    #[error("Not configured: {what}")]
    NotConfigured { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    #[error("{from} cannot feed {to}")]
    InvalidChain { from: StageKind, to: StageKind },

    #[error(transparent)]
    Property(#[from] PropError),
}

pub type StageResult<T> = Result<T, StageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StageError::NotConfigured {
            what: "valve target pressure",
        };
        assert!(err.to_string().contains("valve target pressure"));

        let err = StageError::InvalidChain {
            from: StageKind::Compressor,
            to: StageKind::Evaporator,
        };
        assert_eq!(err.to_string(), "compressor cannot feed evaporator");
    }

    #[test]
    fn property_errors_pass_through() {
        let err: StageError = PropError::NoData { what: "grid" }.into();
        assert_eq!(err.to_string(), PropError::NoData { what: "grid" }.to_string());
    }
}
