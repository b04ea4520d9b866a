//! Compressor stage.

use crate::common::check_positive;
use crate::compression::CompressionModel;
use crate::error::StageResult;
use crate::traits::{Stage, StageKind};
use rc_core::units::{Power, Pressure, kw};
use rc_props::{PropertySource, RefrigerantState};
use tracing::trace;

/// Compressor driven by a fixed pressure ratio.
///
/// The outlet pressure is `P_in * ratio`; the outlet state comes from the
/// compression model. Shaft power `mdot * (h_out - h_in)` of the last call is
/// kept in [`Compressor::power_consumed`] rather than in the returned state.
#[derive(Debug)]
pub struct Compressor {
    name: String,
    ratio: f64,
    model: Box<dyn CompressionModel>,
    power_consumed: Power,
}

impl Compressor {
    pub fn new(ratio: f64, model: Box<dyn CompressionModel>) -> StageResult<Self> {
        check_positive(ratio, "compression ratio must be positive")?;
        Ok(Self {
            name: "compressor".to_string(),
            ratio,
            model,
            power_consumed: kw(0.0),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn model(&self) -> &dyn CompressionModel {
        self.model.as_ref()
    }

    /// Shaft power drawn on the last `process` call.
    pub fn power_consumed(&self) -> Power {
        self.power_consumed
    }
}

impl Stage for Compressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StageKind {
        StageKind::Compressor
    }

    fn process(
        &mut self,
        props: &dyn PropertySource,
        inlet: &RefrigerantState,
    ) -> StageResult<RefrigerantState> {
        let target = inlet.pressure() * self.ratio;
        let outlet = self.model.compute(props, inlet, target)?;
        self.power_consumed = kw(inlet.mass_flow().value * (outlet.enthalpy() - inlet.enthalpy()));
        trace!(
            stage = %self.name,
            model = self.model.name(),
            p_out = target.value,
            h_out = outlet.enthalpy(),
            "compressed"
        );
        Ok(outlet)
    }

    fn operating_pressure(&self) -> Option<Pressure> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::{IdealGasModel, IsentropicModel};
    use crate::error::StageError;
    use approx::assert_relative_eq;
    use rc_core::units::{as_kw, k, kgps, pa};
    use rc_props::PropertyTable;

    fn compressor(ratio: f64) -> Compressor {
        Compressor::new(ratio, Box::new(IsentropicModel::new(0.8).unwrap())).unwrap()
    }

    #[test]
    fn outlet_pressure_follows_ratio() {
        let table = PropertyTable::builtin();
        let mut c = compressor(2.0);
        let inlet =
            RefrigerantState::new(pa(200_000.0), k(260.15), 230.0, 1.05, kgps(0.05)).unwrap();
        let out = c.process(&table, &inlet).unwrap();
        assert_relative_eq!(out.pressure().value, 400_000.0, epsilon = 1e-6);
    }

    #[test]
    fn records_power_of_last_call() {
        let table = PropertyTable::builtin();
        let mut c = compressor(3.0);
        assert_eq!(as_kw(c.power_consumed()), 0.0);
        let inlet =
            RefrigerantState::new(pa(300_000.0), k(273.15), 250.0, 1.10, kgps(0.05)).unwrap();
        let out = c.process(&table, &inlet).unwrap();
        // enthalpy_at(9e5, 1.10) = 305, h2 = 250 + 55 / 0.8
        assert_relative_eq!(out.enthalpy(), 318.75, epsilon = 1e-9);
        assert_relative_eq!(as_kw(c.power_consumed()), 0.05 * 68.75, epsilon = 1e-9);
    }

    #[test]
    fn model_is_pluggable() {
        let table = PropertyTable::builtin();
        let mut c = Compressor::new(3.0, Box::new(IdealGasModel::new(0.8).unwrap())).unwrap();
        let inlet =
            RefrigerantState::new(pa(300_000.0), k(273.15), 250.0, 1.10, kgps(0.05)).unwrap();
        let out = c.process(&table, &inlet).unwrap();
        assert_eq!(c.model().name(), "ideal-gas");
        assert!(out.enthalpy() > inlet.enthalpy());
    }

    #[test]
    fn has_no_fixed_pressure() {
        let c = compressor(3.0);
        assert_eq!(c.operating_pressure(), None);
        assert!(c.can_connect_to(StageKind::Condenser));
    }

    #[test]
    fn rejects_non_positive_ratio() {
        let model = Box::new(IsentropicModel::new(0.8).unwrap());
        assert!(matches!(
            Compressor::new(0.0, model),
            Err(StageError::InvalidArg { .. })
        ));
    }
}
