//! Core traits for cycle stages.

use crate::error::{StageError, StageResult};
use core::fmt;
use rc_core::units::{Pressure, Temperature};
use rc_props::{PropertySource, RefrigerantState};

/// The four stage kinds of a vapor-compression cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Evaporator,
    Compressor,
    Condenser,
    ExpansionValve,
}

impl StageKind {
    /// The only kind this one may discharge into.
    pub fn successor(self) -> StageKind {
        match self {
            Self::Evaporator => Self::Compressor,
            Self::Compressor => Self::Condenser,
            Self::Condenser => Self::ExpansionValve,
            Self::ExpansionValve => Self::Evaporator,
        }
    }

    pub fn can_feed(self, next: StageKind) -> bool {
        self.successor() == next
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evaporator => write!(f, "evaporator"),
            Self::Compressor => write!(f, "compressor"),
            Self::Condenser => write!(f, "condenser"),
            Self::ExpansionValve => write!(f, "expansion valve"),
        }
    }
}

/// Check that `kinds` form a closed cycle: every stage feeds the next and
/// the last feeds the first.
pub fn validate_chain(kinds: &[StageKind]) -> StageResult<()> {
    if kinds.is_empty() {
        return Err(StageError::InvalidArg {
            what: "a cycle needs at least one stage",
        });
    }
    let closing = (kinds[kinds.len() - 1], kinds[0]);
    for (from, to) in kinds.windows(2).map(|w| (w[0], w[1])).chain([closing]) {
        if !from.can_feed(to) {
            return Err(StageError::InvalidChain { from, to });
        }
    }
    Ok(())
}

/// Trait for a stage that transforms the refrigerant state.
///
/// `process` never modifies its input; it returns the outlet state. A stage
/// may record accounting from its last call (heat rate, shaft power), so it
/// takes `&mut self`. Setter-driven configuration is not synchronized: each
/// stage instance must be owned by a single simulation loop.
pub trait Stage: Send + Sync {
    /// Stage name for debugging and identification.
    fn name(&self) -> &str;

    fn kind(&self) -> StageKind;

    /// Compute the outlet state for `inlet`.
    ///
    /// # Arguments
    /// * `props` - Property source for every saturation lookup
    /// * `inlet` - Refrigerant state entering the stage
    fn process(
        &mut self,
        props: &dyn PropertySource,
        inlet: &RefrigerantState,
    ) -> StageResult<RefrigerantState>;

    /// Fixed outlet pressure, if the stage imposes one.
    ///
    /// `None` for a compressor (its outlet follows the inlet) and for a valve
    /// whose target has not been set.
    fn operating_pressure(&self) -> Option<Pressure>;

    fn can_connect_to(&self, next: StageKind) -> bool {
        self.kind().can_feed(next)
    }

    /// Update the air temperature a heat exchanger works against.
    ///
    /// Default implementation returns NotSupported.
    fn set_ambient_temperature(&mut self, _t: Temperature) -> StageResult<()> {
        Err(StageError::NotSupported {
            what: "ambient temperature not used by this stage",
        })
    }

    /// Set the outlet pressure of a throttling device.
    ///
    /// Default implementation returns NotSupported.
    fn set_target_pressure(&mut self, _p: Pressure) -> StageResult<()> {
        Err(StageError::NotSupported {
            what: "target pressure not used by this stage",
        })
    }
}
