//! Refrigerant state snapshots.

use crate::error::{PropError, PropResult};
use crate::model::PropertySource;
use rc_core::numeric::ensure_finite;
use rc_core::units::{MassRate, Pressure, SpecEnthalpy, SpecEntropy, Temperature};

/// Refrigerant state at one point of the cycle.
///
/// A value type: stages return a new state and never modify their input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefrigerantState {
    p: Pressure,
    t: Temperature,
    h: SpecEnthalpy,
    s: SpecEntropy,
    mdot: MassRate,
}

impl RefrigerantState {
    /// Create a state from its five properties.
    ///
    /// Validates that pressure and temperature are positive, mass flow is
    /// non-negative, and every value is finite.
    pub fn new(
        p: Pressure,
        t: Temperature,
        h: SpecEnthalpy,
        s: SpecEntropy,
        mdot: MassRate,
    ) -> PropResult<Self> {
        if ensure_finite(p.value, "pressure")? <= 0.0 {
            return Err(PropError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        if ensure_finite(t.value, "temperature")? <= 0.0 {
            return Err(PropError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        ensure_finite(h, "enthalpy")?;
        ensure_finite(s, "entropy")?;
        if ensure_finite(mdot.value, "mass flow rate")? < 0.0 {
            return Err(PropError::NonPhysical {
                what: "mass flow rate cannot be negative",
            });
        }

        Ok(Self { p, t, h, s, mdot })
    }

    /// Saturated-vapor state at `p`, all properties from `props`.
    pub fn saturated_vapor(
        props: &dyn PropertySource,
        p: Pressure,
        mdot: MassRate,
    ) -> PropResult<Self> {
        Self::new(
            p,
            props.temperature_from_pressure(p)?,
            props.enthalpy_from_pressure(p)?,
            props.entropy_from_pressure(p)?,
            mdot,
        )
    }

    /// Get pressure.
    pub fn pressure(&self) -> Pressure {
        self.p
    }

    /// Get temperature.
    pub fn temperature(&self) -> Temperature {
        self.t
    }

    /// Specific enthalpy [kJ/kg].
    pub fn enthalpy(&self) -> SpecEnthalpy {
        self.h
    }

    /// Specific entropy [kJ/(kg·K)].
    pub fn entropy(&self) -> SpecEntropy {
        self.s
    }

    pub fn mass_flow(&self) -> MassRate {
        self.mdot
    }
}
