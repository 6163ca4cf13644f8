// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Value;
use crate::errors::ConfigError;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Declarative description of one component to build.
///
/// The component's id is its key in the enclosing [`BuildGroupSpec`].
///
/// # Fields
/// * `target` - Registered constructor name, `namespace.TypeName`
/// * `init` - Constructor arguments; strings equal to another component's id
///   and `!ref` values are replaced with the built component
/// * `defaults` - Properties assigned after construction, best-effort
///
/// # Example
/// ```yaml
/// laser_488:
///   target: simulated.Laser
///   init:
///     wavelength_nm: 488
///     modulation_source: daq
///   defaults:
///     power_mw: 20.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentSpec {
    pub target: String,
    #[serde(default)]
    pub init: IndexMap<String, Value>,
    #[serde(default)]
    pub defaults: IndexMap<String, Value>,
}

impl ComponentSpec {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            init: IndexMap::new(),
            defaults: IndexMap::new(),
        }
    }

    pub fn with_init(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.init.insert(name.into(), value.into());
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }
}

/// Named component specs, in document order.
pub type BuildGroupSpec = IndexMap<String, ComponentSpec>;

/// Complete instrument document: identity, devices and how they are grouped.
///
/// # Example
/// ```yaml
/// info:
///   instrument_uid: exaspim-01
///   instrument_type: exaspim
///   instrument_version: 1.0
/// devices:
///   daq: { target: simulated.Daq }
///   x_axis: { target: simulated.LinearAxis }
/// stage: { x: x_axis, y: y_axis, z: z_axis }
/// profiles:
///   green:
///     camera: camera
///     laser: laser_488
///     filters: { filter_wheel: 525/50 }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentConfig {
    pub info: InstrumentInfo,
    pub devices: BuildGroupSpec,
    pub stage: StageConfig,
    #[serde(default)]
    pub profiles: IndexMap<String, ProfileConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentInfo {
    pub instrument_uid: String,
    pub instrument_type: String,
    pub instrument_version: f64,
}

/// Device ids of the three stage axes.
#[derive(Debug, Clone, Deserialize)]
pub struct StageConfig {
    pub x: String,
    pub y: String,
    pub z: String,
}

/// A named imaging channel: which camera and laser it uses, and the filter
/// wheel positions (by label) it needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    pub camera: String,
    pub laser: String,
    #[serde(default)]
    pub filters: IndexMap<String, String>,
    #[serde(default)]
    pub focusing_axes: Vec<String>,
}

fn parse_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a component group from a YAML, JSON or TOML file
pub fn load_build_group<P: AsRef<Path>>(path: P) -> Result<BuildGroupSpec, ConfigError> {
    parse_document(path.as_ref())
}

/// Load a component group and validate its reference graph
pub fn load_build_group_and_validate<P: AsRef<Path>>(
    path: P,
) -> Result<BuildGroupSpec, ConfigError> {
    let specs = load_build_group(path)?;
    crate::config::validate_build_group(&specs).map_err(ConfigError::Validation)?;
    Ok(specs)
}

/// Load an instrument document from a YAML, JSON or TOML file
pub fn load_instrument_config<P: AsRef<Path>>(path: P) -> Result<InstrumentConfig, ConfigError> {
    parse_document(path.as_ref())
}

/// Load an instrument document and validate its device graph
pub fn load_instrument_config_and_validate<P: AsRef<Path>>(
    path: P,
) -> Result<InstrumentConfig, ConfigError> {
    let config = load_instrument_config(path)?;
    crate::config::validate_build_group(&config.devices).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_basic_group() {
        let yaml = r#"
daq:
  target: simulated.Daq
camera:
  target: simulated.Camera
  init:
    trigger_source: daq
  defaults:
    exposure_ms: 12.5
"#;

        let specs: BuildGroupSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs.keys().collect::<Vec<_>>(), vec!["daq", "camera"]);
        assert_eq!(specs["camera"].init["trigger_source"], Value::from("daq"));
        assert_eq!(specs["camera"].defaults["exposure_ms"], Value::Float(12.5));
        assert!(specs["daq"].init.is_empty());
    }

    #[test]
    fn test_unknown_spec_field_rejected() {
        let yaml = r#"
daq:
  target: simulated.Daq
  depends_on: [camera]
"#;
        let result: Result<BuildGroupSpec, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_yaml_json_and_toml() {
        let yaml = write_temp(".yaml", "a:\n  target: test.Widget\n  init: { dep: !ref b }\nb:\n  target: test.Widget\n");
        let json = write_temp(
            ".json",
            r#"{"a": {"target": "test.Widget", "init": {"dep": {"$ref": "b"}}}, "b": {"target": "test.Widget"}}"#,
        );
        let toml = write_temp(
            ".toml",
            "[a]\ntarget = \"test.Widget\"\n[a.init]\ndep = { \"$ref\" = \"b\" }\n[b]\ntarget = \"test.Widget\"\n",
        );

        for file in [&yaml, &json, &toml] {
            let specs = load_build_group(file.path()).unwrap();
            assert_eq!(specs.len(), 2);
            assert_eq!(specs["a"].init["dep"], Value::reference("b"));
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".ini", "a = 1");
        let result = load_build_group(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_build_group("does/not/exist.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_and_validate_cyclic_group() {
        let file = write_temp(
            ".yaml",
            r#"
a:
  target: test.Widget
  init: { dep: b }
b:
  target: test.Widget
  init: { dep: a }
"#,
        );

        let result = load_build_group_and_validate(file.path());
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("Configuration validation failed"));
        assert!(error_msg.contains("Cyclic dependency detected"));
    }

    #[test]
    fn test_load_instrument_config() {
        let file = write_temp(
            ".yml",
            r#"
info:
  instrument_uid: exaspim-01
  instrument_type: exaspim
  instrument_version: 1.0
devices:
  x_axis: { target: simulated.LinearAxis }
stage: { x: x_axis, y: x_axis, z: x_axis }
profiles:
  green:
    camera: camera
    laser: laser_488
    filters: { filter_wheel: 525/50 }
"#,
        );

        let config = load_instrument_config_and_validate(file.path()).unwrap();
        assert_eq!(config.info.instrument_uid, "exaspim-01");
        assert_eq!(config.stage.x, "x_axis");
        assert_eq!(config.profiles["green"].filters["filter_wheel"], "525/50");
        assert!(config.profiles["green"].focusing_axes.is_empty());
    }
}
