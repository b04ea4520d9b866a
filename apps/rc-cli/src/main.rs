use clap::{Args, Parser, Subcommand};
use rc_core::units::{as_celsius, as_kw, pa};
use rc_cycle::{
    ClosedCycle, CycleConfigurationResult, CycleFile, CycleResult, LoadRequest, SimOptions,
    SizingOptions, StopReason, TickRecord, configure_cycle_for_load, load_yaml,
};
use rc_props::{PropertySource, PropertyTable, RefrigerantState};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(about = "refcycle CLI - vapor-compression refrigeration sizing and simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size a cycle for a cooling load
    Size(DesignArgs),
    /// Size a cycle, then run it against a room until it cools down
    Simulate {
        #[command(flatten)]
        design: DesignArgs,
        /// Run the fixed demonstration loop instead of a sized one
        #[arg(long)]
        demo: bool,
        /// Wall-clock delay between ticks in milliseconds
        #[arg(long, default_value_t = 0)]
        tick_delay_ms: u64,
        /// Override the tick length in seconds
        #[arg(long)]
        dt: Option<f64>,
        /// Override the tick limit
        #[arg(long)]
        max_ticks: Option<usize>,
        /// Print every N-th tick
        #[arg(long, default_value_t = 1)]
        every: usize,
    },
    /// Print saturation properties at a pressure
    Table {
        /// Pressure in Pa
        pressure_pa: f64,
        /// Also look up the compression grid at this entropy [kJ/(kg·K)]
        #[arg(long)]
        entropy: Option<f64>,
        /// Cycle YAML file carrying a custom property table
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct DesignArgs {
    /// Cycle YAML file; overrides the flags below
    #[arg(long)]
    config: Option<PathBuf>,
    /// Cooling load in kW
    #[arg(long, default_value_t = 5.0)]
    load_kw: f64,
    /// Product temperature in °C
    #[arg(long, default_value_t = -18.0, allow_hyphen_values = true)]
    product_temp_c: f64,
    /// Room temperature in °C
    #[arg(long, default_value_t = -15.0, allow_hyphen_values = true)]
    room_temp_c: f64,
    /// Outdoor ambient temperature in °C
    #[arg(long, default_value_t = 32.0, allow_hyphen_values = true)]
    ambient_temp_c: f64,
    /// Compressor isentropic efficiency
    #[arg(long)]
    efficiency: Option<f64>,
}

impl DesignArgs {
    fn to_file(&self) -> CycleResult<CycleFile> {
        let mut file = match &self.config {
            Some(path) => load_yaml(path)?,
            None => CycleFile {
                design: LoadRequest {
                    load_kw: self.load_kw,
                    product_temp_c: self.product_temp_c,
                    room_temp_c: self.room_temp_c,
                    ambient_temp_c: self.ambient_temp_c,
                },
                options: SizingOptions::default(),
                simulation: SimOptions::default(),
                properties: None,
            },
        };
        if let Some(eta) = self.efficiency {
            file.options.efficiency = eta;
        }
        Ok(file)
    }
}

fn main() -> CycleResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Size(design) => cmd_size(&design),
        Commands::Simulate {
            design,
            demo,
            tick_delay_ms,
            dt,
            max_ticks,
            every,
        } => cmd_simulate(&design, demo, tick_delay_ms, dt, max_ticks, every),
        Commands::Table {
            pressure_pa,
            entropy,
            config,
        } => cmd_table(pressure_pa, entropy, config.as_deref()),
    }
}

fn cmd_size(design: &DesignArgs) -> CycleResult<()> {
    let file = design.to_file()?;
    let table = file.property_table()?;
    let result = configure_cycle_for_load(&table, &file.design, &file.options)?;
    print_sizing(&file.design, &result);
    Ok(())
}

fn cmd_simulate(
    design: &DesignArgs,
    demo: bool,
    tick_delay_ms: u64,
    dt: Option<f64>,
    max_ticks: Option<usize>,
    every: usize,
) -> CycleResult<()> {
    let file = design.to_file()?;
    let table = file.property_table()?;
    let mut opts = file.simulation;
    if let Some(dt) = dt {
        opts.dt_s = dt;
    }
    if let Some(n) = max_ticks {
        opts.max_ticks = n;
    }

    let mut cycle = if demo {
        ClosedCycle::demonstration()?
    } else {
        let result = configure_cycle_for_load(&table, &file.design, &file.options)?;
        print_sizing(&file.design, &result);
        ClosedCycle::from_configuration(result, opts.room()?)?
    };

    info!(dt_s = opts.dt_s, max_ticks = opts.max_ticks, demo, "starting simulation");
    println!("\nLoop: {}", cycle.stage_names().join(" -> "));
    println!(
        "\nCooling room from {:.2} °C to {:.2} °C",
        as_celsius(cycle.room().temperature()),
        opts.stop_room_temp_c
    );

    let delay = Duration::from_millis(tick_delay_ms);
    let every = every.max(1);
    let started = Instant::now();
    let mut observer = |rec: &TickRecord| {
        if rec.tick % every == 0 {
            print_tick(rec);
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    };
    let record = cycle.run_with_observer(&table, &opts, Some(&mut observer))?;

    match record.stop {
        StopReason::TargetReached => println!("\n✓ Target temperature reached"),
        StopReason::MaxTicks => println!("\n✗ Tick limit reached before target"),
    }
    if let Some(last) = record.ticks.last() {
        println!(
            "  Ticks: {}  simulated: {:.0} s  room: {:.2} °C",
            last.tick,
            last.time_s,
            as_celsius(last.room_temp)
        );
    }
    println!("  Elapsed: {:.3}s", started.elapsed().as_secs_f64());
    Ok(())
}

fn cmd_table(pressure_pa: f64, entropy: Option<f64>, config: Option<&Path>) -> CycleResult<()> {
    let table = match config {
        Some(path) => load_yaml(path)?.property_table()?,
        None => PropertyTable::builtin(),
    };
    let p = pa(pressure_pa);

    println!("Table '{}' at {:.0} Pa:", table.name(), pressure_pa);
    println!("  T_sat:      {:.2} K", table.temperature_from_pressure(p)?.value);
    println!("  h (vapor):  {:.2} kJ/kg", table.enthalpy_from_pressure(p)?);
    println!("  h (liquid): {:.2} kJ/kg", table.liquid_enthalpy_from_pressure(p)?);
    println!("  s:          {:.4} kJ/kg·K", table.entropy_from_pressure(p)?);
    if let Some(s) = entropy {
        println!("  h(P, s={:.3}): {:.2} kJ/kg", s, table.enthalpy_at(p, s)?);
    }
    Ok(())
}

fn print_sizing(load: &LoadRequest, r: &CycleConfigurationResult) {
    println!(
        "Sizing for {:.2} kW: product {:.1} °C, room {:.1} °C, ambient {:.1} °C",
        load.load_kw, load.product_temp_c, load.room_temp_c, load.ambient_temp_c
    );
    println!("\nDesign point:");
    println!(
        "  Evaporation:  {:.2} K at {:.0} Pa",
        r.t_evap.value, r.p_evap.value
    );
    println!(
        "  Condensation: {:.2} K at {:.0} Pa",
        r.t_cond.value, r.p_cond.value
    );
    println!("  Mass flow:    {:.4} kg/s", r.mass_flow.value);

    println!("\nStates:");
    print_state("After evaporator", &r.evaporator_exit);
    print_state("After compressor", &r.compressor_exit);

    println!("\nEnergy:");
    println!("  Q_evap: {:.3} kW", r.q_evap_kw);
    println!("  W_comp: {:.3} kW", r.w_comp_kw);
    println!("  Q_cond: {:.3} kW", r.q_cond_kw);
    println!("  COP:    {:.2}", r.cop);

    println!("\nSizes:");
    println!("  Evaporator area: {:.3} m²", r.evaporator_area.value);
    println!("  Condenser area:  {:.3} m²", r.condenser_area.value);
}

fn print_state(label: &str, s: &RefrigerantState) {
    println!(
        "  {:<18} P={:>9.0} Pa  T={:>7.2} °C  h={:>8.2} kJ/kg  s={:.4} kJ/kg·K  mdot={:.4} kg/s",
        label,
        s.pressure().value,
        as_celsius(s.temperature()),
        s.enthalpy(),
        s.entropy(),
        s.mass_flow().value
    );
}

fn print_tick(rec: &TickRecord) {
    println!(
        "\n[t={:.0}s] room {:.2} °C  Q_evap={:.2} kW  W_comp={:.2} kW  Q_cond={:.2} kW",
        rec.time_s,
        as_celsius(rec.room_temp),
        as_kw(rec.q_evap),
        as_kw(rec.w_comp),
        as_kw(rec.q_cond)
    );
    print_state("Evaporator", &rec.evaporator_out);
    print_state("Compressor", &rec.compressor_out);
    print_state("Condenser", &rec.condenser_out);
    print_state("Expansion valve", &rec.valve_out);
}
