//! Cycle sizing and closed-loop simulation for refcycle.
//!
//! Provides:
//! - Auto-configuration of a four-stage cycle for a cooling load
//! - Validated design-point temperatures (`RefrigerantConfig`)
//! - A lumped room model and a fixed-step closed-loop tick model
//! - YAML cycle files

pub mod config;
pub mod configurator;
pub mod environment;
pub mod error;
pub mod file;
pub mod simulation;

// Re-exports for public API
pub use config::RefrigerantConfig;
pub use configurator::{
    CycleConfigurationResult, LoadRequest, SizingOptions, configure_cycle_for_load,
};
pub use environment::ThermalEnvironment;
pub use error::{CycleError, CycleResult};
pub use file::{CycleFile, TableDef, load_yaml, save_yaml};
pub use simulation::{ClosedCycle, SimOptions, SimRecord, StopReason, TickRecord};
