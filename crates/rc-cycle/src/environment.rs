//! Lumped thermal environment cooled by the evaporator.

use crate::error::{CycleError, CycleResult};
use rc_core::units::{Temperature, k};

/// A room with a single temperature and a heat capacity.
///
/// `Q = C * dT`, with `Q` in kJ and `C` in kJ/K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalEnvironment {
    temperature: Temperature,
    heat_capacity: f64,
}

impl ThermalEnvironment {
    pub fn new(temperature: Temperature, heat_capacity_kj_per_k: f64) -> CycleResult<Self> {
        if !temperature.value.is_finite() || temperature.value <= 0.0 {
            return Err(CycleError::InvalidArg {
                what: "room temperature must be positive",
            });
        }
        if !heat_capacity_kj_per_k.is_finite() || heat_capacity_kj_per_k <= 0.0 {
            return Err(CycleError::InvalidArg {
                what: "room heat capacity must be positive",
            });
        }
        Ok(Self {
            temperature,
            heat_capacity: heat_capacity_kj_per_k,
        })
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Heat capacity [kJ/K].
    pub fn heat_capacity(&self) -> f64 {
        self.heat_capacity
    }

    /// Extract `q_kj` of heat, lowering the temperature by `q / C`.
    pub fn remove_heat(&mut self, q_kj: f64) {
        self.temperature = k(self.temperature.value - q_kj / self.heat_capacity);
    }

    /// Add `q_kj` of heat, raising the temperature by `q / C`.
    pub fn add_heat(&mut self, q_kj: f64) {
        self.temperature = k(self.temperature.value + q_kj / self.heat_capacity);
    }
}
