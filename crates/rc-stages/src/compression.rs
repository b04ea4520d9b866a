//! Compression models: compressor outlet state from inlet and target pressure.

use crate::common::check_finite;
use crate::error::{StageError, StageResult};
use rc_core::units::{Pressure, k};
use rc_props::{PropertySource, RefrigerantState};
use std::fmt::Debug;

/// Strategy computing the compressor outlet state.
pub trait CompressionModel: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Outlet state after compressing `inlet` to `target`.
    fn compute(
        &self,
        props: &dyn PropertySource,
        inlet: &RefrigerantState,
        target: Pressure,
    ) -> StageResult<RefrigerantState>;
}

fn check_efficiency(efficiency: f64) -> StageResult<f64> {
    if !efficiency.is_finite() || efficiency <= 0.0 || efficiency > 1.0 {
        return Err(StageError::InvalidArg {
            what: "isentropic efficiency must be in (0, 1]",
        });
    }
    Ok(efficiency)
}

/// `h2 = h1 + (h2s - h1) / eta`
fn actual_enthalpy(h1: f64, h2s: f64, efficiency: f64) -> f64 {
    h1 + (h2s - h1) / efficiency
}

/// Isentropic compression resolved through the property source.
///
/// ```text
/// h2s = enthalpy_at(P_target, s_in)
/// h2  = h1 + (h2s - h1) / eta
/// ```
///
/// The outlet carries the target pressure, `h2`, and the saturation temperature
/// and entropy at the target pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsentropicModel {
    efficiency: f64,
}

impl IsentropicModel {
    pub fn new(efficiency: f64) -> StageResult<Self> {
        Ok(Self {
            efficiency: check_efficiency(efficiency)?,
        })
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }
}

impl CompressionModel for IsentropicModel {
    fn name(&self) -> &str {
        "isentropic"
    }

    fn compute(
        &self,
        props: &dyn PropertySource,
        inlet: &RefrigerantState,
        target: Pressure,
    ) -> StageResult<RefrigerantState> {
        let h1 = inlet.enthalpy();
        let h2s = props.enthalpy_at(target, inlet.entropy())?;
        let h2 = actual_enthalpy(h1, h2s, self.efficiency);
        check_finite(h2, "compressor outlet enthalpy")?;

        let state = RefrigerantState::new(
            target,
            props.temperature_from_pressure(target)?,
            h2,
            props.entropy_from_pressure(target)?,
            inlet.mass_flow(),
        )?;
        Ok(state)
    }
}

/// Analytic ideal-gas compression with a fixed heat-capacity ratio.
///
/// Does not consult the property source:
///
/// ```text
/// h2s = h1 * (P_target / P_in)^((gamma - 1) / gamma)
/// h2  = h1 + (h2s - h1) / eta
/// T2  = 273.15 + (h2 - 200) * 0.5
/// s2  = h2 / T2
/// ```
///
/// A coarse approximation kept for comparison runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGasModel {
    efficiency: f64,
    gamma: f64,
}

impl IdealGasModel {
    pub const DEFAULT_GAMMA: f64 = 1.4;

    pub fn new(efficiency: f64) -> StageResult<Self> {
        Ok(Self {
            efficiency: check_efficiency(efficiency)?,
            gamma: Self::DEFAULT_GAMMA,
        })
    }

    pub fn with_gamma(mut self, gamma: f64) -> StageResult<Self> {
        if !gamma.is_finite() || gamma <= 1.0 {
            return Err(StageError::InvalidArg {
                what: "heat-capacity ratio must exceed 1",
            });
        }
        self.gamma = gamma;
        Ok(self)
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl CompressionModel for IdealGasModel {
    fn name(&self) -> &str {
        "ideal-gas"
    }

    fn compute(
        &self,
        _props: &dyn PropertySource,
        inlet: &RefrigerantState,
        target: Pressure,
    ) -> StageResult<RefrigerantState> {
        let ratio = target.value / inlet.pressure().value;
        check_finite(ratio, "pressure ratio")?;
        if ratio <= 0.0 {
            return Err(StageError::InvalidArg {
                what: "target pressure must be positive",
            });
        }

        let h1 = inlet.enthalpy();
        let h2s = h1 * ratio.powf((self.gamma - 1.0) / self.gamma);
        let h2 = actual_enthalpy(h1, h2s, self.efficiency);
        let t2 = 273.15 + (h2 - 200.0) * 0.5;
        if t2 <= 0.0 {
            return Err(StageError::NonPhysical {
                what: "ideal-gas outlet temperature below absolute zero",
            });
        }

        let state = RefrigerantState::new(target, k(t2), h2, h2 / t2, inlet.mass_flow())?;
        Ok(state)
    }
}
