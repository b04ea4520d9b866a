//! YAML cycle description: design load, sizing options, run options and an
//! optional custom property table.

use crate::configurator::{LoadRequest, SizingOptions};
use crate::error::CycleResult;
use crate::simulation::SimOptions;
use rc_props::{CompressionSample, PropertyTable, SaturationSample};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleFile {
    pub design: LoadRequest,
    #[serde(default)]
    pub options: SizingOptions,
    #[serde(default)]
    pub simulation: SimOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<TableDef>,
}

/// Property samples given inline in a cycle file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    #[serde(default = "default_table_name")]
    pub name: String,
    pub saturation: Vec<SaturationSample>,
    pub compression: Vec<CompressionSample>,
}

fn default_table_name() -> String {
    "custom".to_string()
}

impl CycleFile {
    pub fn from_yaml_str(content: &str) -> CycleResult<Self> {
        let file: CycleFile = serde_yaml::from_str(content)?;
        file.simulation.validate()?;
        // Builds the table once so bad samples surface at load time.
        file.property_table()?;
        Ok(file)
    }

    pub fn to_yaml_string(&self) -> CycleResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Table described by the file, or the built-in table when none is given.
    pub fn property_table(&self) -> CycleResult<PropertyTable> {
        match &self.properties {
            Some(def) => Ok(PropertyTable::new(
                def.name.clone(),
                def.saturation.clone(),
                def.compression.clone(),
            )?),
            None => Ok(PropertyTable::builtin()),
        }
    }
}

pub fn load_yaml(path: &Path) -> CycleResult<CycleFile> {
    let content = std::fs::read_to_string(path)?;
    CycleFile::from_yaml_str(&content)
}

pub fn save_yaml(path: &Path, file: &CycleFile) -> CycleResult<()> {
    let content = file.to_yaml_string()?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CycleError;
    use rc_props::{PropError, PropertySource};

    const MINIMAL: &str = "
design:
  load_kw: 5.0
  product_temp_c: -18.0
  room_temp_c: -15.0
  ambient_temp_c: 32.0
";

    #[test]
    fn minimal_file_takes_defaults() {
        let file = CycleFile::from_yaml_str(MINIMAL).unwrap();
        assert_eq!(file.design.load_kw, 5.0);
        assert_eq!(file.options, SizingOptions::default());
        assert_eq!(file.simulation, SimOptions::default());
        assert_eq!(file.property_table().unwrap().name(), "builtin");
    }

    #[test]
    fn partial_options_keep_other_defaults() {
        let yaml = format!("{MINIMAL}options:\n  efficiency: 0.7\n");
        let file = CycleFile::from_yaml_str(&yaml).unwrap();
        assert_eq!(file.options.efficiency, 0.7);
        assert_eq!(file.options.approach_k, 8.0);
    }

    #[test]
    fn inline_table_is_validated() {
        let yaml = format!(
            "{MINIMAL}properties:
  saturation:
    - {{ pressure_pa: 100000.0, temperature_k: 250.0, enthalpy: 200.0, liquid_enthalpy: 10.0, entropy: 0.9 }}
    - {{ pressure_pa: 200000.0, temperature_k: 240.0, enthalpy: 230.0, liquid_enthalpy: 20.0, entropy: 1.0 }}
  compression:
    - {{ pressure_pa: 200000.0, entropy: 1.0, enthalpy: 220.0 }}
"
        );
        let err = CycleFile::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(
            err,
            CycleError::Property(PropError::NonMonotonic {
                index: 1,
                column: "temperature"
            })
        ));
    }

    #[test]
    fn room_options_are_checked_at_load_time() {
        let yaml = format!("{MINIMAL}simulation:\n  room_heat_capacity_kj_per_k: -5.0\n");
        let err = CycleFile::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, CycleError::InvalidArg { .. }));

        let yaml = format!("{MINIMAL}simulation:\n  initial_room_temp_c: -400.0\n");
        assert!(CycleFile::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = CycleFile::from_yaml_str("design: [not, a, map]").unwrap_err();
        assert!(matches!(err, CycleError::Yaml(_)));
    }

    #[test]
    fn round_trips_through_a_file() {
        let file = CycleFile::from_yaml_str(MINIMAL).unwrap();
        let path = std::env::temp_dir().join(format!("rc-cycle-{}.yaml", std::process::id()));
        save_yaml(&path, &file).unwrap();
        let back = load_yaml(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(back, file);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_yaml(Path::new("/nonexistent/cycle.yaml")).unwrap_err();
        assert!(matches!(err, CycleError::Io(_)));
    }
}
