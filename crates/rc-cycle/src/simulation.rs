//! Closed-loop tick model: the refrigerant circulates and cools a room.

use crate::configurator::CycleConfigurationResult;
use crate::environment::ThermalEnvironment;
use crate::error::{CycleError, CycleResult};
use rc_core::units::{Power, Temperature, celsius, k, kgps, kw, m2, pa};
use rc_props::{PropertySource, RefrigerantState};
use rc_stages::{
    Compressor, Condenser, Evaporator, ExpansionValve, IsentropicModel, Stage, StageError,
    validate_chain,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options for closed-cycle runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    /// Fixed tick length (seconds)
    pub dt_s: f64,
    /// Maximum number of ticks (safety limit)
    pub max_ticks: usize,
    /// Room temperature at the first tick (°C)
    pub initial_room_temp_c: f64,
    /// Stop once the room is at or below this temperature (°C)
    pub stop_room_temp_c: f64,
    /// Lumped room heat capacity (kJ/K)
    pub room_heat_capacity_kj_per_k: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt_s: 1.0,
            max_ticks: 10_000,
            initial_room_temp_c: 30.0,
            stop_room_temp_c: 16.0,
            room_heat_capacity_kj_per_k: 10_000.0,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> CycleResult<()> {
        if !self.dt_s.is_finite() || self.dt_s <= 0.0 {
            return Err(CycleError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if self.max_ticks == 0 {
            return Err(CycleError::InvalidArg {
                what: "max_ticks must be positive",
            });
        }
        if !self.stop_room_temp_c.is_finite() {
            return Err(CycleError::InvalidArg {
                what: "stop temperature must be finite",
            });
        }
        self.room()?;
        Ok(())
    }

    /// Room described by these options.
    pub fn room(&self) -> CycleResult<ThermalEnvironment> {
        ThermalEnvironment::new(
            celsius(self.initial_room_temp_c),
            self.room_heat_capacity_kj_per_k,
        )
    }
}

/// Everything observed during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRecord {
    /// 1-based tick index
    pub tick: usize,
    /// Simulated time at the end of the tick (seconds)
    pub time_s: f64,
    /// Room temperature after the tick's heat was removed
    pub room_temp: Temperature,
    pub evaporator_out: RefrigerantState,
    pub compressor_out: RefrigerantState,
    pub condenser_out: RefrigerantState,
    pub valve_out: RefrigerantState,
    pub q_evap: Power,
    pub w_comp: Power,
    pub q_cond: Power,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TargetReached,
    MaxTicks,
}

/// Record of a closed-cycle run.
#[derive(Debug, Clone)]
pub struct SimRecord {
    pub ticks: Vec<TickRecord>,
    pub stop: StopReason,
}

impl SimRecord {
    pub fn final_room_temp(&self) -> Option<Temperature> {
        self.ticks.last().map(|t| t.room_temp)
    }
}

/// One refrigerant loop serving one room.
///
/// The valve outlet of each tick is the evaporator inlet of the next. The
/// evaporator always works against the current room temperature.
#[derive(Debug)]
pub struct ClosedCycle {
    evaporator: Evaporator,
    compressor: Compressor,
    condenser: Condenser,
    valve: ExpansionValve,
    room: ThermalEnvironment,
    state: RefrigerantState,
    ticks: usize,
    time_s: f64,
}

impl ClosedCycle {
    /// Assemble a loop from its four stages.
    ///
    /// # Errors
    /// `Stage(NotConfigured)` if the valve has no target pressure.
    pub fn new(
        evaporator: Evaporator,
        compressor: Compressor,
        condenser: Condenser,
        valve: ExpansionValve,
        room: ThermalEnvironment,
        initial: RefrigerantState,
    ) -> CycleResult<Self> {
        validate_chain(&[
            evaporator.kind(),
            compressor.kind(),
            condenser.kind(),
            valve.kind(),
        ])?;
        if valve.target_pressure().is_none() {
            return Err(StageError::NotConfigured {
                what: "expansion valve target pressure",
            }
            .into());
        }
        Ok(Self {
            evaporator,
            compressor,
            condenser,
            valve,
            room,
            state: initial,
            ticks: 0,
            time_s: 0.0,
        })
    }

    /// Loop built from a sizing result, starting from its evaporator-exit state.
    pub fn from_configuration(
        config: CycleConfigurationResult,
        room: ThermalEnvironment,
    ) -> CycleResult<Self> {
        Self::new(
            config.evaporator,
            config.compressor,
            config.condenser,
            config.valve,
            room,
            config.evaporator_exit,
        )
    }

    /// Fixed demonstration loop: 300/900 kPa, ratio 3 at 80 % efficiency,
    /// 3 m² coils at 0.6 kW/(m²·K), a 10 000 kJ/K room starting at 30 °C.
    pub fn demonstration() -> CycleResult<Self> {
        let evaporator = Evaporator::new(k(295.0), m2(3.0), 0.6, pa(300_000.0))?
            .with_name("demo evaporator");
        let compressor = Compressor::new(3.0, Box::new(IsentropicModel::new(0.8)?))?
            .with_name("demo compressor");
        let condenser = Condenser::new(k(303.15), m2(3.0), 0.6, pa(900_000.0))?
            .with_name("demo condenser");
        let valve = ExpansionValve::thermostatic()
            .with_name("demo txv")
            .with_target_pressure(pa(300_000.0))?;
        let room = ThermalEnvironment::new(k(303.15), 10_000.0)?;
        let initial = RefrigerantState::new(pa(300_000.0), k(278.0), 240.0, 1.1, kgps(0.05))?;
        Self::new(evaporator, compressor, condenser, valve, room, initial)
    }

    pub fn room(&self) -> &ThermalEnvironment {
        &self.room
    }

    /// Evaporator inlet for the next tick.
    pub fn state(&self) -> &RefrigerantState {
        &self.state
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Stage names in flow order.
    pub fn stage_names(&self) -> [&str; 4] {
        [
            self.evaporator.name(),
            self.compressor.name(),
            self.condenser.name(),
            self.valve.name(),
        ]
    }

    /// Advance one tick of `dt_s` seconds.
    ///
    /// On error the loop state, the room and the tick count are left as they
    /// were. Stages that ran before the failing one keep the accounting from
    /// this attempt.
    pub fn tick(&mut self, props: &dyn PropertySource, dt_s: f64) -> CycleResult<TickRecord> {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return Err(CycleError::InvalidArg {
                what: "dt must be positive",
            });
        }

        let inlet = self.state;
        let room_temp = self.room.temperature();
        let s1 = self.evaporator.absorb(props, &inlet, room_temp)?;
        let s2 = self.compressor.process(props, &s1)?;
        let s3 = self.condenser.process(props, &s2)?;
        let s4 = self.valve.process(props, &s3)?;

        let q_evap_kw = s1.mass_flow().value * (s1.enthalpy() - inlet.enthalpy());
        self.room.remove_heat(q_evap_kw * dt_s);
        self.state = s4;
        self.ticks += 1;
        self.time_s += dt_s;

        let record = TickRecord {
            tick: self.ticks,
            time_s: self.time_s,
            room_temp: self.room.temperature(),
            evaporator_out: s1,
            compressor_out: s2,
            condenser_out: s3,
            valve_out: s4,
            q_evap: kw(q_evap_kw),
            w_comp: self.compressor.power_consumed(),
            q_cond: self.condenser.last_heat_rate(),
        };
        debug!(
            tick = record.tick,
            room_k = record.room_temp.value,
            q_evap_kw,
            "tick"
        );
        Ok(record)
    }

    /// Tick until the room reaches `opts.stop_room_temp_c` or `opts.max_ticks`
    /// have run.
    pub fn run(&mut self, props: &dyn PropertySource, opts: &SimOptions) -> CycleResult<SimRecord> {
        self.run_with_observer(props, opts, None)
    }

    /// Like [`ClosedCycle::run`], handing each tick to `observer` as it completes.
    pub fn run_with_observer(
        &mut self,
        props: &dyn PropertySource,
        opts: &SimOptions,
        mut observer: Option<&mut dyn FnMut(&TickRecord)>,
    ) -> CycleResult<SimRecord> {
        opts.validate()?;
        let stop_at = celsius(opts.stop_room_temp_c);

        let mut ticks = Vec::new();
        let stop = loop {
            if self.room.temperature().value <= stop_at.value {
                break StopReason::TargetReached;
            }
            if ticks.len() >= opts.max_ticks {
                break StopReason::MaxTicks;
            }
            let record = self.tick(props, opts.dt_s)?;
            if let Some(cb) = observer.as_mut() {
                cb(&record);
            }
            ticks.push(record);
        };

        debug!(ticks = ticks.len(), ?stop, "run finished");
        Ok(SimRecord { ticks, stop })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rc_core::units::{Pressure, as_kw};
    use rc_props::{PropError, PropResult, PropertyTable};

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.dt_s, 1.0);
        assert_eq!(opts.stop_room_temp_c, 16.0);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn sim_options_invalid() {
        let opts = SimOptions {
            dt_s: 0.0,
            ..SimOptions::default()
        };
        assert!(opts.validate().is_err());
        let opts = SimOptions {
            max_ticks: 0,
            ..SimOptions::default()
        };
        assert!(opts.validate().is_err());
        let opts = SimOptions {
            initial_room_temp_c: -400.0,
            ..SimOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn valve_output_feeds_next_tick() {
        let table = PropertyTable::builtin();
        let mut cycle = ClosedCycle::demonstration().unwrap();
        let first = cycle.tick(&table, 1.0).unwrap();
        assert_eq!(*cycle.state(), first.valve_out);
        let second = cycle.tick(&table, 1.0).unwrap();
        assert_eq!(second.tick, 2);
        assert_eq!(second.time_s, 2.0);
        // Second tick starts at the valve outlet: 273.15 K against the room.
        let expected = 0.6 * 3.0 * (first.room_temp.value - 273.15);
        assert_relative_eq!(as_kw(second.q_evap), expected, epsilon = 1e-9);
    }

    /// Saturation lookups work but the compression grid is unavailable.
    struct NoCompressionGrid(PropertyTable);

    impl PropertySource for NoCompressionGrid {
        fn name(&self) -> &str {
            "no-compression-grid"
        }
        fn pressure_from_temperature(&self, t: Temperature) -> PropResult<Pressure> {
            self.0.pressure_from_temperature(t)
        }
        fn temperature_from_pressure(&self, p: Pressure) -> PropResult<Temperature> {
            self.0.temperature_from_pressure(p)
        }
        fn enthalpy_from_pressure(&self, p: Pressure) -> PropResult<f64> {
            self.0.enthalpy_from_pressure(p)
        }
        fn entropy_from_pressure(&self, p: Pressure) -> PropResult<f64> {
            self.0.entropy_from_pressure(p)
        }
        fn enthalpy_at(&self, _p: Pressure, _s: f64) -> PropResult<f64> {
            Err(PropError::NoData {
                what: "compression grid",
            })
        }
    }

    #[test]
    fn compressor_failure_keeps_loop_and_room() {
        let source = NoCompressionGrid(PropertyTable::builtin());
        let mut cycle = ClosedCycle::demonstration().unwrap();
        let state = *cycle.state();
        let room = cycle.room().temperature();

        let err = cycle.tick(&source, 1.0).unwrap_err();
        assert!(matches!(
            err,
            CycleError::Stage(StageError::Property(PropError::NoData { .. }))
        ));
        assert_eq!(*cycle.state(), state);
        assert_eq!(cycle.room().temperature(), room);
        assert_eq!(cycle.ticks(), 0);
        // The evaporator ran before the compressor failed.
        assert!(as_kw(cycle.evaporator.last_heat_rate()) > 0.0);
    }

    #[test]
    fn room_loses_the_absorbed_heat() {
        let table = PropertyTable::builtin();
        let mut cycle = ClosedCycle::demonstration().unwrap();
        let before = cycle.room().temperature().value;
        let rec = cycle.tick(&table, 2.0).unwrap();
        let dt_room = as_kw(rec.q_evap) * 2.0 / 10_000.0;
        assert_relative_eq!(rec.room_temp.value, before - dt_room, epsilon = 1e-9);
    }

    #[test]
    fn demonstration_stages_are_named() {
        let cycle = ClosedCycle::demonstration().unwrap();
        assert_eq!(
            cycle.stage_names(),
            ["demo evaporator", "demo compressor", "demo condenser", "demo txv"]
        );
    }

    #[test]
    fn unconfigured_valve_is_rejected() {
        let evaporator = Evaporator::new(k(295.0), m2(3.0), 0.6, pa(300_000.0)).unwrap();
        let compressor =
            Compressor::new(3.0, Box::new(IsentropicModel::new(0.8).unwrap())).unwrap();
        let condenser = Condenser::new(k(303.15), m2(3.0), 0.6, pa(900_000.0)).unwrap();
        let room = ThermalEnvironment::new(k(303.15), 10_000.0).unwrap();
        let initial =
            RefrigerantState::new(pa(300_000.0), k(278.0), 240.0, 1.1, kgps(0.05)).unwrap();
        let r = ClosedCycle::new(
            evaporator,
            compressor,
            condenser,
            ExpansionValve::thermostatic(),
            room,
            initial,
        );
        assert!(matches!(
            r,
            Err(CycleError::Stage(StageError::NotConfigured { .. }))
        ));
    }

    #[test]
    fn run_stops_at_max_ticks() {
        let table = PropertyTable::builtin();
        let mut cycle = ClosedCycle::demonstration().unwrap();
        let opts = SimOptions {
            max_ticks: 5,
            ..SimOptions::default()
        };
        let rec = cycle.run(&table, &opts).unwrap();
        assert_eq!(rec.stop, StopReason::MaxTicks);
        assert_eq!(rec.ticks.len(), 5);
        assert_eq!(cycle.ticks(), 5);
    }

    #[test]
    fn run_without_work_when_already_cold() {
        let table = PropertyTable::builtin();
        let mut cycle = ClosedCycle::demonstration().unwrap();
        let opts = SimOptions {
            stop_room_temp_c: 35.0,
            ..SimOptions::default()
        };
        let rec = cycle.run(&table, &opts).unwrap();
        assert_eq!(rec.stop, StopReason::TargetReached);
        assert!(rec.ticks.is_empty());
        assert_eq!(rec.final_room_temp(), None);
    }

    #[test]
    fn observer_sees_every_tick() {
        let table = PropertyTable::builtin();
        let mut cycle = ClosedCycle::demonstration().unwrap();
        let opts = SimOptions {
            max_ticks: 3,
            ..SimOptions::default()
        };
        let mut seen = Vec::new();
        let mut cb = |r: &TickRecord| seen.push(r.tick);
        let rec = cycle.run_with_observer(&table, &opts, Some(&mut cb)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(rec.ticks.len(), 3);
    }
}
