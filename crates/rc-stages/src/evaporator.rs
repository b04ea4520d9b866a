//! Evaporator stage model.

use crate::common::{Geometry, check_positive};
use crate::error::StageResult;
use crate::traits::{Stage, StageKind};
use rc_core::units::{Area, Power, Pressure, Temperature, UValue, kw};
use rc_props::{PropertySource, RefrigerantState};
use tracing::trace;

/// Air-to-refrigerant evaporator at constant pressure.
///
/// ## Model
///
/// ```text
/// Q     = U * A * (T_air - T_in)      [kW]
/// h_out = h_in + Q / mdot
/// ```
///
/// The outlet sits at the evaporator pressure with saturation temperature and
/// entropy there (isobaric boiling, exit superheat ignored).
#[derive(Debug, Clone)]
pub struct Evaporator {
    name: String,
    geometry: Geometry,
    ambient: Temperature,
    last_heat_rate: Power,
}

impl Evaporator {
    /// Create a new evaporator.
    ///
    /// # Arguments
    /// * `ambient` - Air temperature around the coil
    /// * `area` - Heat-transfer area
    /// * `u_value` - Overall coefficient [kW/(m²·K)]
    /// * `pressure` - Evaporating pressure
    pub fn new(
        ambient: Temperature,
        area: Area,
        u_value: UValue,
        pressure: Pressure,
    ) -> StageResult<Self> {
        check_positive(ambient.value, "ambient temperature must be positive")?;
        Ok(Self {
            name: "evaporator".to_string(),
            geometry: Geometry::new(area, u_value, pressure)?,
            ambient,
            last_heat_rate: kw(0.0),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn ambient_temperature(&self) -> Temperature {
        self.ambient
    }

    pub fn area(&self) -> Area {
        self.geometry.area
    }

    pub fn u_value(&self) -> UValue {
        self.geometry.u_value
    }

    /// Heat absorbed by the refrigerant on the last `process`/`absorb` call.
    pub fn last_heat_rate(&self) -> Power {
        self.last_heat_rate
    }

    /// Process `inlet` against an explicit air temperature.
    ///
    /// Leaves the stored ambient temperature untouched.
    pub fn absorb(
        &mut self,
        props: &dyn PropertySource,
        inlet: &RefrigerantState,
        ambient: Temperature,
    ) -> StageResult<RefrigerantState> {
        let q = self.geometry.heat_rate_kw(ambient, inlet.temperature());
        let outlet = self.geometry.outlet(props, inlet, q)?;
        self.last_heat_rate = kw(q);
        trace!(stage = %self.name, q_kw = q, h_in = inlet.enthalpy(), h_out = outlet.enthalpy());
        Ok(outlet)
    }
}

impl Stage for Evaporator {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StageKind {
        StageKind::Evaporator
    }

    fn process(
        &mut self,
        props: &dyn PropertySource,
        inlet: &RefrigerantState,
    ) -> StageResult<RefrigerantState> {
        self.absorb(props, inlet, self.ambient)
    }

    fn operating_pressure(&self) -> Option<Pressure> {
        Some(self.geometry.pressure)
    }

    fn set_ambient_temperature(&mut self, t: Temperature) -> StageResult<()> {
        check_positive(t.value, "ambient temperature must be positive")?;
        self.ambient = t;
        Ok(())
    }
}
