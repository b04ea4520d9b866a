//! Common utilities for stage calculations.

use crate::error::{StageError, StageResult};
use rc_core::numeric::{ensure_finite, ensure_positive};
use rc_core::units::{Area, Pressure, Temperature, UValue};
use rc_props::{PropertySource, RefrigerantState};

/// Smallest mass flow rate (kg/s) a heat exchanger can spread heat over.
pub const EPSILON_MDOT: f64 = 1e-9;

/// Ensure a value is finite, returning StageError if not.
pub fn check_finite(value: f64, what: &'static str) -> StageResult<()> {
    ensure_finite(value, what).map_err(|_| StageError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> StageResult<()> {
    ensure_positive(value, what).map_err(|_| StageError::InvalidArg { what })?;
    Ok(())
}

/// Fixed geometry of an air-coupled heat exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Heat-transfer area
    pub area: Area,
    /// Overall heat-transfer coefficient [kW/(m²·K)]
    pub u_value: UValue,
    /// Refrigerant-side pressure, held constant through the exchanger
    pub pressure: Pressure,
}

impl Geometry {
    pub fn new(area: Area, u_value: UValue, pressure: Pressure) -> StageResult<Self> {
        check_positive(area.value, "heat-transfer area must be positive")?;
        check_positive(u_value, "U-value must be positive")?;
        check_positive(pressure.value, "operating pressure must be positive")?;
        Ok(Self {
            area,
            u_value,
            pressure,
        })
    }

    /// `U·A·ΔT` in kW for a temperature difference `hot - cold`.
    pub fn heat_rate_kw(&self, hot: Temperature, cold: Temperature) -> f64 {
        self.u_value * self.area.value * (hot.value - cold.value)
    }

    /// Outlet state after `q_kw` has been added to the refrigerant
    /// (negative removes heat).
    ///
    /// Pressure is fixed at the exchanger pressure; temperature and entropy
    /// come from the saturation line there. Mass flow passes through.
    pub fn outlet(
        &self,
        props: &dyn PropertySource,
        inlet: &RefrigerantState,
        q_kw: f64,
    ) -> StageResult<RefrigerantState> {
        let mdot = inlet.mass_flow().value;
        if mdot <= EPSILON_MDOT {
            return Err(StageError::InvalidArg {
                what: "heat exchanger needs a positive mass flow rate",
            });
        }
        check_finite(q_kw, "heat rate")?;

        let h_out = inlet.enthalpy() + q_kw / mdot;
        let state = RefrigerantState::new(
            self.pressure,
            props.temperature_from_pressure(self.pressure)?,
            h_out,
            props.entropy_from_pressure(self.pressure)?,
            inlet.mass_flow(),
        )?;
        Ok(state)
    }
}
