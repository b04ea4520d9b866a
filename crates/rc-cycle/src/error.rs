//! Error types for cycle sizing and simulation.

use rc_props::PropError;
use rc_stages::StageError;
use thiserror::Error;

/// Errors raised while sizing, assembling or running a cycle.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Refrigerating effect is not positive ({effect} kJ/kg)")]
    NonPositiveEffect { effect: f64 },

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Property(#[from] PropError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type CycleResult<T> = Result<T, CycleError>;
