//! rc-stages: refrigeration cycle stages.
//!
//! Provides the four stages of a single-stage vapor-compression cycle:
//! - Evaporator and condenser (air-coupled, fixed pressure)
//! - Compressor driven by a pressure ratio and a pluggable `CompressionModel`
//! - Expansion valve (isoenthalpic throttling)
//!
//! All stages implement the `Stage` trait. Property lookups go through the
//! `&dyn PropertySource` passed to every `process` call.
//!
//! # Example
//!
//! ```
//! use rc_core::units::{k, kgps, m2, pa};
//! use rc_props::{PropertyTable, RefrigerantState};
//! use rc_stages::{Compressor, Evaporator, IsentropicModel, Stage};
//!
//! let table = PropertyTable::builtin();
//! let inlet = RefrigerantState::new(pa(300_000.0), k(278.0), 240.0, 1.1, kgps(0.05)).unwrap();
//!
//! let mut evap = Evaporator::new(k(279.0), m2(3.0), 0.6, pa(300_000.0)).unwrap();
//! let mut comp = Compressor::new(3.0, Box::new(IsentropicModel::new(0.8).unwrap())).unwrap();
//!
//! let s1 = evap.process(&table, &inlet).unwrap();
//! let s2 = comp.process(&table, &s1).unwrap();
//! assert!(s2.enthalpy() > s1.enthalpy());
//! ```

pub mod common;
pub mod compression;
pub mod compressor;
pub mod condenser;
pub mod error;
pub mod evaporator;
pub mod traits;
pub mod valve;

// Re-exports
pub use compression::{CompressionModel, IdealGasModel, IsentropicModel};
pub use compressor::Compressor;
pub use condenser::Condenser;
pub use error::{StageError, StageResult};
pub use evaporator::Evaporator;
pub use traits::{Stage, StageKind, validate_chain};
pub use valve::{ExpansionValve, ValveStyle};
