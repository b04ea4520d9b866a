//! Design-point temperatures of a refrigerant loop.

use crate::error::{CycleError, CycleResult};
use rc_core::units::{MassRate, Pressure, Temperature, kgps};
use rc_props::{PropertySource, RefrigerantState};

/// Lowest evaporation temperature accepted [K].
pub const MIN_EVAPORATION_K: f64 = 200.0;
/// Highest condensation temperature accepted [K].
pub const MAX_CONDENSATION_K: f64 = 400.0;
/// Accepted ambient temperature range [K].
pub const AMBIENT_RANGE_K: (f64, f64) = (200.0, 330.0);

/// Mass flow used by [`RefrigerantConfig::create_initial_state`] when none is given.
pub const DEFAULT_MASS_FLOW: f64 = 0.05;

pub(crate) fn check_evaporation(t: Temperature) -> CycleResult<()> {
    if !t.value.is_finite() || t.value < MIN_EVAPORATION_K {
        return Err(CycleError::InvalidArg {
            what: "evaporation temperature below 200 K",
        });
    }
    Ok(())
}

pub(crate) fn check_condensation(t: Temperature) -> CycleResult<()> {
    if !t.value.is_finite() || t.value > MAX_CONDENSATION_K {
        return Err(CycleError::InvalidArg {
            what: "condensation temperature above 400 K",
        });
    }
    Ok(())
}

pub(crate) fn check_ambient(t: Temperature) -> CycleResult<()> {
    let (lo, hi) = AMBIENT_RANGE_K;
    if !(lo..=hi).contains(&t.value) {
        return Err(CycleError::InvalidArg {
            what: "ambient temperature outside 200-330 K",
        });
    }
    Ok(())
}

/// Validated design point: evaporation below condensation, everything in a
/// physically plausible range.
#[derive(Debug, Clone, PartialEq)]
pub struct RefrigerantConfig {
    refrigerant: String,
    initial: Temperature,
    evaporation: Temperature,
    condensation: Temperature,
    ambient: Temperature,
}

impl RefrigerantConfig {
    /// # Errors
    /// `InvalidArg` when evaporation is not below condensation, the initial
    /// temperature is below evaporation, or any temperature is out of range.
    pub fn new(
        refrigerant: impl Into<String>,
        initial: Temperature,
        evaporation: Temperature,
        condensation: Temperature,
        ambient: Temperature,
    ) -> CycleResult<Self> {
        if evaporation.value >= condensation.value {
            return Err(CycleError::InvalidArg {
                what: "evaporation temperature must be below condensation temperature",
            });
        }
        if initial.value < evaporation.value {
            return Err(CycleError::InvalidArg {
                what: "initial temperature below evaporation temperature",
            });
        }
        check_evaporation(evaporation)?;
        check_condensation(condensation)?;
        check_ambient(ambient)?;

        Ok(Self {
            refrigerant: refrigerant.into(),
            initial,
            evaporation,
            condensation,
            ambient,
        })
    }

    pub fn refrigerant(&self) -> &str {
        &self.refrigerant
    }

    pub fn initial_temperature(&self) -> Temperature {
        self.initial
    }

    pub fn evaporation_temperature(&self) -> Temperature {
        self.evaporation
    }

    pub fn condensation_temperature(&self) -> Temperature {
        self.condensation
    }

    pub fn ambient_temperature(&self) -> Temperature {
        self.ambient
    }

    pub fn evaporation_pressure(&self, props: &dyn PropertySource) -> CycleResult<Pressure> {
        Ok(props.pressure_from_temperature(self.evaporation)?)
    }

    pub fn condensation_pressure(&self, props: &dyn PropertySource) -> CycleResult<Pressure> {
        Ok(props.pressure_from_temperature(self.condensation)?)
    }

    /// State at the evaporation pressure carrying the initial temperature and
    /// the saturation enthalpy and entropy there.
    pub fn create_initial_state(
        &self,
        props: &dyn PropertySource,
        mass_flow: Option<MassRate>,
    ) -> CycleResult<RefrigerantState> {
        let p = self.evaporation_pressure(props)?;
        let state = RefrigerantState::new(
            p,
            self.initial,
            props.enthalpy_from_pressure(p)?,
            props.entropy_from_pressure(p)?,
            mass_flow.unwrap_or_else(|| kgps(DEFAULT_MASS_FLOW)),
        )?;
        Ok(state)
    }
}
