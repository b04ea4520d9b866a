//! Expansion valve: isoenthalpic throttling to a configured pressure.

use crate::common::check_positive;
use crate::error::{StageError, StageResult};
use crate::traits::{Stage, StageKind};
use rc_core::units::Pressure;
use rc_props::{PropertySource, RefrigerantState};
use tracing::trace;

/// Physical style of the throttling device. Both throttle identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveStyle {
    Thermostatic,
    CapillaryTube,
}

/// Throttling device with `h_out = h_in`.
///
/// The outlet pressure must be set with [`Stage::set_target_pressure`] before
/// the first `process` call.
#[derive(Debug, Clone)]
pub struct ExpansionValve {
    name: String,
    style: ValveStyle,
    target: Option<Pressure>,
}

impl ExpansionValve {
    pub fn new(style: ValveStyle) -> Self {
        let name = match style {
            ValveStyle::Thermostatic => "txv",
            ValveStyle::CapillaryTube => "capillary tube",
        };
        Self {
            name: name.to_string(),
            style,
            target: None,
        }
    }

    pub fn thermostatic() -> Self {
        Self::new(ValveStyle::Thermostatic)
    }

    pub fn capillary_tube() -> Self {
        Self::new(ValveStyle::CapillaryTube)
    }

    /// Builder form of `set_target_pressure`.
    pub fn with_target_pressure(mut self, p: Pressure) -> StageResult<Self> {
        self.set_target_pressure(p)?;
        Ok(self)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn style(&self) -> ValveStyle {
        self.style
    }

    pub fn target_pressure(&self) -> Option<Pressure> {
        self.target
    }
}

impl Stage for ExpansionValve {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StageKind {
        StageKind::ExpansionValve
    }

    fn process(
        &mut self,
        props: &dyn PropertySource,
        inlet: &RefrigerantState,
    ) -> StageResult<RefrigerantState> {
        let p = self.target.ok_or(StageError::NotConfigured {
            what: "expansion valve target pressure",
        })?;
        let outlet = RefrigerantState::new(
            p,
            props.temperature_from_pressure(p)?,
            inlet.enthalpy(),
            props.entropy_from_pressure(p)?,
            inlet.mass_flow(),
        )?;
        trace!(stage = %self.name, p_out = p.value, t_out = outlet.temperature().value);
        Ok(outlet)
    }

    fn operating_pressure(&self) -> Option<Pressure> {
        self.target
    }

    fn set_target_pressure(&mut self, p: Pressure) -> StageResult<()> {
        check_positive(p.value, "valve target pressure must be positive")?;
        self.target = Some(p);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_core::units::{k, kgps, pa};
    use rc_props::PropertyTable;

    fn inlet() -> RefrigerantState {
        RefrigerantState::new(pa(900_000.0), k(333.15), 120.0, 1.42, kgps(0.05)).unwrap()
    }

    #[test]
    fn throttles_at_constant_enthalpy() {
        let table = PropertyTable::builtin();
        let mut valve = ExpansionValve::thermostatic();
        valve.set_target_pressure(pa(300_000.0)).unwrap();
        let out = valve.process(&table, &inlet()).unwrap();
        assert_eq!(out.enthalpy(), 120.0);
        assert_eq!(out.pressure().value, 300_000.0);
        assert_eq!(out.temperature().value, 273.15);
        assert_eq!(out.entropy(), 1.10);
        assert_eq!(out.mass_flow().value, 0.05);
    }

    #[test]
    fn unconfigured_valve_fails() {
        let table = PropertyTable::builtin();
        let mut valve = ExpansionValve::capillary_tube();
        assert_eq!(valve.operating_pressure(), None);
        assert!(matches!(
            valve.process(&table, &inlet()),
            Err(StageError::NotConfigured { .. })
        ));
    }

    #[test]
    fn styles_behave_identically() {
        let table = PropertyTable::builtin();
        let mut txv = ExpansionValve::thermostatic()
            .with_target_pressure(pa(250_000.0))
            .unwrap();
        let mut cap = ExpansionValve::capillary_tube()
            .with_target_pressure(pa(250_000.0))
            .unwrap();
        assert_eq!(
            txv.process(&table, &inlet()).unwrap(),
            cap.process(&table, &inlet()).unwrap()
        );
        assert_ne!(txv.style(), cap.style());
    }

    #[test]
    fn rejects_non_positive_target() {
        let mut valve = ExpansionValve::thermostatic();
        assert!(valve.set_target_pressure(pa(0.0)).is_err());
        assert_eq!(valve.target_pressure(), None);
    }

    #[test]
    fn ambient_is_not_supported() {
        let mut valve = ExpansionValve::thermostatic();
        assert!(matches!(
            valve.set_ambient_temperature(k(300.0)),
            Err(StageError::NotSupported { .. })
        ));
    }
}
