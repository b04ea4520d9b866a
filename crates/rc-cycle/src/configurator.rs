//! Auto-sizing of a cycle for a target cooling load.

use crate::config::{check_ambient, check_condensation, check_evaporation};
use crate::error::{CycleError, CycleResult};
use rc_core::units::{Area, MassRate, Pressure, Temperature, as_kw, celsius, k, kgps, m2};
use rc_props::{PropertySource, RefrigerantState};
use rc_stages::{Compressor, Condenser, Evaporator, ExpansionValve, IsentropicModel, Stage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Smallest evaporator air-to-refrigerant temperature difference [K].
pub const MIN_EVAPORATOR_DT_K: f64 = 1.0;
/// Smallest condenser refrigerant-to-air temperature difference [K].
pub const MIN_CONDENSER_DT_K: f64 = 2.0;
/// Floor on compressor power in the COP denominator [kW].
pub const MIN_COP_WORK_KW: f64 = 1e-9;

/// Cooling duty and the temperatures it is delivered at. Temperatures in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadRequest {
    pub load_kw: f64,
    pub product_temp_c: f64,
    pub room_temp_c: f64,
    pub ambient_temp_c: f64,
}

/// Design margins and coefficients used while sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingOptions {
    /// Compressor isentropic efficiency, (0, 1]
    pub efficiency: f64,
    /// Evaporation temperature margin below the product [K]
    pub superheat_k: f64,
    /// Condensation temperature margin above ambient [K]
    pub approach_k: f64,
    /// Evaporator U-value [kW/(m²·K)]
    pub u_evap: f64,
    /// Condenser U-value [kW/(m²·K)]
    pub u_cond: f64,
}

impl Default for SizingOptions {
    fn default() -> Self {
        Self {
            efficiency: 0.8,
            superheat_k: 2.0,
            approach_k: 8.0,
            u_evap: 0.6,
            u_cond: 0.6,
        }
    }
}

/// Output of [`configure_cycle_for_load`]: the sized stages, the two marker
/// states and the derived scalars. Heat and power rates in kW.
#[derive(Debug)]
pub struct CycleConfigurationResult {
    pub evaporator: Evaporator,
    pub compressor: Compressor,
    pub condenser: Condenser,
    pub valve: ExpansionValve,

    /// State 1: evaporator exit / compressor inlet
    pub evaporator_exit: RefrigerantState,
    /// State 2: compressor exit
    pub compressor_exit: RefrigerantState,

    pub mass_flow: MassRate,
    pub q_evap_kw: f64,
    pub w_comp_kw: f64,
    pub q_cond_kw: f64,
    pub cop: f64,
    pub p_evap: Pressure,
    pub p_cond: Pressure,
    pub t_evap: Temperature,
    pub t_cond: Temperature,
    pub evaporator_area: Area,
    pub condenser_area: Area,
}

fn check_options(opts: &SizingOptions) -> CycleResult<()> {
    if !opts.efficiency.is_finite() || opts.efficiency <= 0.0 || opts.efficiency > 1.0 {
        return Err(CycleError::InvalidArg {
            what: "isentropic efficiency must be in (0, 1]",
        });
    }
    if !(opts.superheat_k.is_finite() && opts.superheat_k >= 0.0) {
        return Err(CycleError::InvalidArg {
            what: "superheat must be non-negative",
        });
    }
    if !(opts.approach_k.is_finite() && opts.approach_k >= 0.0) {
        return Err(CycleError::InvalidArg {
            what: "condenser approach must be non-negative",
        });
    }
    if !(opts.u_evap.is_finite() && opts.u_evap > 0.0) {
        return Err(CycleError::InvalidArg {
            what: "evaporator U-value must be positive",
        });
    }
    if !(opts.u_cond.is_finite() && opts.u_cond > 0.0) {
        return Err(CycleError::InvalidArg {
            what: "condenser U-value must be positive",
        });
    }
    Ok(())
}

fn check_plausible(t: Temperature, what: &'static str) -> CycleResult<()> {
    if !(200.0..=400.0).contains(&t.value) {
        return Err(CycleError::InvalidArg { what });
    }
    Ok(())
}

/// Size an evaporator/compressor/condenser/valve set able to deliver
/// `load.load_kw` of cooling.
///
/// Evaporation sits `superheat_k` below the product temperature and
/// condensation `approach_k` above ambient; neither is iterated. Nothing is
/// returned unless every step succeeds.
///
/// # Errors
/// - `InvalidArg` for a non-positive load, bad options, or implausible temperatures
/// - `NonPositiveEffect` when the chosen pressures leave no refrigerating effect
/// - `Property`/`Stage` errors from lookups and stage construction
pub fn configure_cycle_for_load(
    props: &dyn PropertySource,
    load: &LoadRequest,
    opts: &SizingOptions,
) -> CycleResult<CycleConfigurationResult> {
    if !load.load_kw.is_finite() || load.load_kw <= 0.0 {
        return Err(CycleError::InvalidArg {
            what: "cooling load must be positive",
        });
    }
    check_options(opts)?;

    let t_product = celsius(load.product_temp_c);
    let t_room = celsius(load.room_temp_c);
    let t_ambient = celsius(load.ambient_temp_c);
    check_plausible(t_product, "product temperature outside 200-400 K")?;
    check_plausible(t_room, "room temperature outside 200-400 K")?;
    check_ambient(t_ambient)?;

    let t_evap = k(t_product.value - opts.superheat_k);
    let t_cond = k(t_ambient.value + opts.approach_k);
    check_evaporation(t_evap)?;
    check_condensation(t_cond)?;
    if t_evap.value >= t_cond.value {
        return Err(CycleError::InvalidArg {
            what: "evaporation temperature must be below condensation temperature",
        });
    }

    let p_evap = props.pressure_from_temperature(t_evap)?;
    let p_cond = props.pressure_from_temperature(t_cond)?;

    let h_vapor = props.enthalpy_from_pressure(p_evap)?;
    let h_liquid = props.liquid_enthalpy_from_pressure(p_cond)?;
    let effect = h_vapor - h_liquid;
    if effect <= 0.0 {
        return Err(CycleError::NonPositiveEffect { effect });
    }

    let mdot = load.load_kw / effect;
    debug!(
        t_evap_k = t_evap.value,
        t_cond_k = t_cond.value,
        p_evap_pa = p_evap.value,
        p_cond_pa = p_cond.value,
        effect_kj_per_kg = effect,
        mdot_kg_s = mdot,
        "design point"
    );

    let evaporator_exit = RefrigerantState::saturated_vapor(props, p_evap, kgps(mdot))?;

    let model = IsentropicModel::new(opts.efficiency)?;
    let mut compressor = Compressor::new(p_cond.value / p_evap.value, Box::new(model))?;
    let compressor_exit = compressor.process(props, &evaporator_exit)?;
    let w_comp_kw = as_kw(compressor.power_consumed());

    let q_evap_kw = mdot * effect;
    let q_cond_kw = q_evap_kw + w_comp_kw;

    let mut dt_evap = t_room.value - t_evap.value;
    if dt_evap < MIN_EVAPORATOR_DT_K {
        warn!(dt_k = dt_evap, "evaporator temperature difference floored at 1 K");
        dt_evap = MIN_EVAPORATOR_DT_K;
    }
    let evaporator_area = m2(q_evap_kw / (opts.u_evap * dt_evap));

    let mut dt_cond = compressor_exit.temperature().value - t_ambient.value;
    if dt_cond < MIN_CONDENSER_DT_K {
        warn!(dt_k = dt_cond, "condenser temperature difference floored at 2 K");
        dt_cond = MIN_CONDENSER_DT_K;
    }
    let condenser_area = m2(q_cond_kw / (opts.u_cond * dt_cond));

    if w_comp_kw < MIN_COP_WORK_KW {
        warn!(w_comp_kw, "compressor power below COP floor");
    }
    let cop = q_evap_kw / w_comp_kw.max(MIN_COP_WORK_KW);

    let evaporator = Evaporator::new(t_room, evaporator_area, opts.u_evap, p_evap)?;
    let condenser = Condenser::new(t_ambient, condenser_area, opts.u_cond, p_cond)?;
    let valve = ExpansionValve::thermostatic().with_target_pressure(p_evap)?;

    debug!(
        q_evap_kw,
        w_comp_kw,
        q_cond_kw,
        cop,
        evaporator_area_m2 = evaporator_area.value,
        condenser_area_m2 = condenser_area.value,
        "cycle sized"
    );

    Ok(CycleConfigurationResult {
        evaporator,
        compressor,
        condenser,
        valve,
        evaporator_exit,
        compressor_exit,
        mass_flow: kgps(mdot),
        q_evap_kw,
        w_comp_kw,
        q_cond_kw,
        cop,
        p_evap,
        p_cond,
        t_evap,
        t_cond,
        evaporator_area,
        condenser_area,
    })
}
