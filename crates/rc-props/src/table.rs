//! Tabulated refrigerant properties.

use crate::error::{PropError, PropResult};
use crate::interp::{interpolate_1d, interpolate_2d};
use crate::model::PropertySource;
use rc_core::units::{Pressure, SpecEnthalpy, SpecEntropy, Temperature, k, pa};
use serde::{Deserialize, Serialize};

/// One point on the saturation line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationSample {
    /// Pressure [Pa]
    pub pressure_pa: f64,
    /// Saturation temperature [K]
    pub temperature_k: f64,
    /// Saturated-vapor enthalpy [kJ/kg]
    pub enthalpy: SpecEnthalpy,
    /// Saturated-liquid enthalpy [kJ/kg]
    pub liquid_enthalpy: SpecEnthalpy,
    /// Entropy [kJ/(kg·K)]
    pub entropy: SpecEntropy,
}

/// One point of the (pressure, entropy) → enthalpy compression grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressionSample {
    /// Pressure [Pa]
    pub pressure_pa: f64,
    /// Entropy [kJ/(kg·K)]
    pub entropy: SpecEntropy,
    /// Enthalpy [kJ/kg]
    pub enthalpy: SpecEnthalpy,
}

const fn sat(p: f64, t: f64, h: f64, hf: f64, s: f64) -> SaturationSample {
    SaturationSample {
        pressure_pa: p,
        temperature_k: t,
        enthalpy: h,
        liquid_enthalpy: hf,
        entropy: s,
    }
}

const fn cmp(p: f64, s: f64, h: f64) -> CompressionSample {
    CompressionSample {
        pressure_pa: p,
        entropy: s,
        enthalpy: h,
    }
}

/// Built-in saturation line, ordered by pressure.
pub const BUILTIN_SATURATION: [SaturationSample; 10] = [
    sat(100_000.0, 247.15, 200.0, 10.0, 0.95),
    sat(200_000.0, 260.15, 230.0, 26.9, 1.05),
    sat(300_000.0, 273.15, 250.0, 43.8, 1.10),
    sat(400_000.0, 283.15, 275.0, 56.8, 1.20),
    sat(500_000.0, 293.15, 300.0, 69.8, 1.30),
    sat(600_000.0, 303.15, 320.0, 82.8, 1.35),
    sat(700_000.0, 313.15, 340.0, 95.8, 1.38),
    sat(800_000.0, 323.15, 355.0, 108.8, 1.40),
    sat(900_000.0, 333.15, 370.0, 121.8, 1.42),
    sat(1_000_000.0, 343.15, 385.0, 134.8, 1.45),
];

/// Built-in compression grid, three entropy points per pressure.
pub const BUILTIN_COMPRESSION: [CompressionSample; 15] = [
    cmp(200_000.0, 1.00, 220.0),
    cmp(200_000.0, 1.20, 250.0),
    cmp(200_000.0, 1.40, 280.0),
    cmp(300_000.0, 1.00, 230.0),
    cmp(300_000.0, 1.20, 260.0),
    cmp(300_000.0, 1.40, 290.0),
    cmp(400_000.0, 1.00, 240.0),
    cmp(400_000.0, 1.20, 270.0),
    cmp(400_000.0, 1.40, 300.0),
    cmp(500_000.0, 1.00, 250.0),
    cmp(500_000.0, 1.20, 280.0),
    cmp(500_000.0, 1.40, 310.0),
    cmp(600_000.0, 1.00, 260.0),
    cmp(600_000.0, 1.20, 290.0),
    cmp(600_000.0, 1.40, 320.0),
];

/// Read-only refrigerant property table.
///
/// Saturation samples rise together in every column as pressure rises; the
/// compression grid holds at least one sample. Both are fixed after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTable {
    name: String,
    saturation: Vec<SaturationSample>,
    compression: Vec<CompressionSample>,
}

impl PropertyTable {
    /// Build a table, validating the sample sets.
    ///
    /// # Errors
    /// - `NonMonotonic` if any saturation column decreases from one sample to the next
    /// - `NonPhysical` for non-finite values or non-positive pressures/temperatures
    /// - `NoData` if the compression grid is empty
    pub fn new(
        name: impl Into<String>,
        saturation: Vec<SaturationSample>,
        compression: Vec<CompressionSample>,
    ) -> PropResult<Self> {
        validate_saturation(&saturation)?;
        if compression.is_empty() {
            return Err(PropError::NoData {
                what: "compression grid",
            });
        }
        for c in &compression {
            if !(c.pressure_pa.is_finite() && c.entropy.is_finite() && c.enthalpy.is_finite()) {
                return Err(PropError::NonPhysical {
                    what: "compression sample must be finite",
                });
            }
            if c.pressure_pa <= 0.0 {
                return Err(PropError::NonPhysical {
                    what: "compression sample pressure must be positive",
                });
            }
        }

        Ok(Self {
            name: name.into(),
            saturation,
            compression,
        })
    }

    /// The built-in sample set.
    pub fn builtin() -> Self {
        Self {
            name: "builtin".to_string(),
            saturation: BUILTIN_SATURATION.to_vec(),
            compression: BUILTIN_COMPRESSION.to_vec(),
        }
    }

    pub fn saturation_samples(&self) -> &[SaturationSample] {
        &self.saturation
    }

    pub fn compression_samples(&self) -> &[CompressionSample] {
        &self.compression
    }

    fn by_pressure(
        &self,
        p: Pressure,
        value: impl Fn(&SaturationSample) -> f64,
    ) -> PropResult<f64> {
        interpolate_1d(
            p.value,
            &self.saturation,
            |s| s.pressure_pa,
            value,
            "saturation table",
        )
    }
}

impl Default for PropertyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_saturation(samples: &[SaturationSample]) -> PropResult<()> {
    type Column = (&'static str, fn(&SaturationSample) -> f64);
    let columns: [Column; 5] = [
        ("pressure", |s: &SaturationSample| s.pressure_pa),
        ("temperature", |s: &SaturationSample| s.temperature_k),
        ("enthalpy", |s: &SaturationSample| s.enthalpy),
        ("liquid enthalpy", |s: &SaturationSample| s.liquid_enthalpy),
        ("entropy", |s: &SaturationSample| s.entropy),
    ];

    for s in samples {
        if columns.iter().any(|(_, col)| !col(s).is_finite()) {
            return Err(PropError::NonPhysical {
                what: "saturation sample must be finite",
            });
        }
        if s.pressure_pa <= 0.0 || s.temperature_k <= 0.0 {
            return Err(PropError::NonPhysical {
                what: "saturation pressure and temperature must be positive",
            });
        }
    }

    for (index, pair) in samples.windows(2).enumerate() {
        for &(column, col) in &columns {
            if col(&pair[1]) < col(&pair[0]) {
                return Err(PropError::NonMonotonic {
                    index: index + 1,
                    column,
                });
            }
        }
    }
    Ok(())
}

impl PropertySource for PropertyTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn pressure_from_temperature(&self, t: Temperature) -> PropResult<Pressure> {
        let p = interpolate_1d(
            t.value,
            &self.saturation,
            |s| s.temperature_k,
            |s| s.pressure_pa,
            "saturation table",
        )?;
        Ok(pa(p))
    }

    fn temperature_from_pressure(&self, p: Pressure) -> PropResult<Temperature> {
        Ok(k(self.by_pressure(p, |s| s.temperature_k)?))
    }

    fn enthalpy_from_pressure(&self, p: Pressure) -> PropResult<SpecEnthalpy> {
        self.by_pressure(p, |s| s.enthalpy)
    }

    fn entropy_from_pressure(&self, p: Pressure) -> PropResult<SpecEntropy> {
        self.by_pressure(p, |s| s.entropy)
    }

    fn enthalpy_at(&self, p: Pressure, s: SpecEntropy) -> PropResult<SpecEnthalpy> {
        interpolate_2d(p.value, s, &self.compression)
    }

    fn liquid_enthalpy_from_pressure(&self, p: Pressure) -> PropResult<SpecEnthalpy> {
        self.by_pressure(p, |s| s.liquid_enthalpy)
    }
}
