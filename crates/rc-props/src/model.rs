//! Property source trait.

use crate::error::PropResult;
use rc_core::units::{Pressure, SpecEnthalpy, SpecEntropy, Temperature};

/// Trait for refrigerant property sources.
///
/// Four 1-D saturation lookups plus one 2-D lookup used by compression models.
/// Implementations are read-only after construction and must be thread-safe
/// (Send + Sync) so independent simulations can share one source.
pub trait PropertySource: Send + Sync {
    /// Source name (for debugging/logging).
    fn name(&self) -> &str;

    /// Saturation pressure at the given temperature.
    fn pressure_from_temperature(&self, t: Temperature) -> PropResult<Pressure>;

    /// Saturation temperature at the given pressure.
    fn temperature_from_pressure(&self, p: Pressure) -> PropResult<Temperature>;

    /// Saturated-vapor specific enthalpy [kJ/kg] at the given pressure.
    fn enthalpy_from_pressure(&self, p: Pressure) -> PropResult<SpecEnthalpy>;

    /// Saturation specific entropy [kJ/(kg·K)] at the given pressure.
    fn entropy_from_pressure(&self, p: Pressure) -> PropResult<SpecEntropy>;

    /// Specific enthalpy [kJ/kg] at pressure `p` and entropy `s`.
    fn enthalpy_at(&self, p: Pressure, s: SpecEntropy) -> PropResult<SpecEnthalpy>;

    /// Saturated-liquid specific enthalpy [kJ/kg] at the given pressure.
    ///
    /// Sources without a liquid column fall back to the vapor enthalpy.
    fn liquid_enthalpy_from_pressure(&self, p: Pressure) -> PropResult<SpecEnthalpy> {
        self.enthalpy_from_pressure(p)
    }
}
