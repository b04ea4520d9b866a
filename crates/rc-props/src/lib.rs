//! rc-props: refrigerant property lookups for refcycle.
//!
//! Provides:
//! - Tabulated saturation and compression samples (`PropertyTable`)
//! - The `PropertySource` trait the rest of refcycle queries
//! - Refrigerant state snapshots (`RefrigerantState`)
//!
//! # Architecture
//!
//! Stages and the sizing routine only see `&dyn PropertySource`. The built-in
//! table is the default source; any other source answering the same lookups
//! can be substituted.
//!
//! # Example
//!
//! ```
//! use rc_props::{PropertySource, PropertyTable};
//! use rc_core::units::pa;
//!
//! let table = PropertyTable::builtin();
//! let t = table.temperature_from_pressure(pa(300_000.0)).unwrap();
//! assert_eq!(t.value, 273.15);
//! ```

pub mod error;
pub mod interp;
pub mod model;
pub mod state;
pub mod table;

// Re-exports for ergonomics
pub use error::{PropError, PropResult};
pub use model::PropertySource;
pub use state::RefrigerantState;
pub use table::{
    BUILTIN_COMPRESSION, BUILTIN_SATURATION, CompressionSample, PropertyTable, SaturationSample,
};
