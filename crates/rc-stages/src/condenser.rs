//! Condenser stage model.

use crate::common::{Geometry, check_positive};
use crate::error::StageResult;
use crate::traits::{Stage, StageKind};
use rc_core::units::{Area, Power, Pressure, Temperature, UValue, kw};
use rc_props::{PropertySource, RefrigerantState};
use tracing::trace;

/// Refrigerant-to-air condenser at constant pressure.
///
/// ```text
/// Q     = U * A * (T_in - T_air)      [kW, rejected]
/// h_out = h_in - Q / mdot
/// ```
#[derive(Debug, Clone)]
pub struct Condenser {
    name: String,
    geometry: Geometry,
    ambient: Temperature,
    last_heat_rate: Power,
}

impl Condenser {
    pub fn new(
        ambient: Temperature,
        area: Area,
        u_value: UValue,
        pressure: Pressure,
    ) -> StageResult<Self> {
        check_positive(ambient.value, "ambient temperature must be positive")?;
        Ok(Self {
            name: "condenser".to_string(),
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

    /// Heat rejected by the refrigerant on the last `process` call (positive
    /// when heat leaves the refrigerant).
    pub fn last_heat_rate(&self) -> Power {
        self.last_heat_rate
    }
}

impl Stage for Condenser {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StageKind {
        StageKind::Condenser
    }

    fn process(
        &mut self,
        props: &dyn PropertySource,
        inlet: &RefrigerantState,
    ) -> StageResult<RefrigerantState> {
        let q = self.geometry.heat_rate_kw(inlet.temperature(), self.ambient);
        let outlet = self.geometry.outlet(props, inlet, -q)?;
        self.last_heat_rate = kw(q);
        trace!(stage = %self.name, q_kw = q, h_in = inlet.enthalpy(), h_out = outlet.enthalpy());
        Ok(outlet)
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rc_core::units::{as_kw, k, kgps, m2, pa};
    use rc_props::PropertyTable;

    #[test]
    fn rejects_heat_to_cooler_air() {
        let table = PropertyTable::builtin();
        let mut cond = Condenser::new(k(303.15), m2(3.0), 0.6, pa(900_000.0)).unwrap();
        let inlet =
            RefrigerantState::new(pa(900_000.0), k(333.15), 380.0, 1.42, kgps(0.05)).unwrap();
        let out = cond.process(&table, &inlet).unwrap();

        let q = 0.6 * 3.0 * (333.15 - 303.15);
        assert_relative_eq!(as_kw(cond.last_heat_rate()), q, epsilon = 1e-9);
        assert_relative_eq!(out.enthalpy(), 380.0 - q / 0.05, epsilon = 1e-9);
        assert_eq!(out.pressure().value, 900_000.0);
        assert_eq!(out.temperature().value, 333.15);
        assert_eq!(out.entropy(), 1.42);
    }

    #[test]
    fn pressure_is_fixed_regardless_of_inlet() {
        let table = PropertyTable::builtin();
        let mut cond = Condenser::new(k(303.15), m2(3.0), 0.6, pa(700_000.0)).unwrap();
        let inlet =
            RefrigerantState::new(pa(900_000.0), k(340.0), 380.0, 1.42, kgps(0.05)).unwrap();
        let out = cond.process(&table, &inlet).unwrap();
        assert_eq!(out.pressure().value, 700_000.0);
        assert_eq!(out.temperature().value, 313.15);
    }

    #[test]
    fn feeds_only_the_valve() {
        let cond = Condenser::new(k(303.15), m2(3.0), 0.6, pa(900_000.0)).unwrap();
        assert!(cond.can_connect_to(StageKind::ExpansionValve));
        assert!(!cond.can_connect_to(StageKind::Evaporator));
    }

    #[test]
    fn rejects_bad_u_value() {
        assert!(Condenser::new(k(303.15), m2(3.0), -0.6, pa(900_000.0)).is_err());
    }
}
