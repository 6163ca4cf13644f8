// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{check_choice, check_range, optional_daq, property_f64, property_str};
use crate::build::InitArgs;
use crate::config::Value;
use crate::errors::{ConstructError, PropertyError};
use crate::traits::{Camera, Component, Instance};
use std::any::Any;

pub const MAX_WIDTH_PX: u32 = 14192;
pub const MAX_HEIGHT_PX: u32 = 10640;
const MIN_EXPOSURE_TIME_MS: f64 = 0.001;
const MAX_EXPOSURE_TIME_MS: f64 = 6e4;
const BINNINGS: [u32; 3] = [1, 2, 4];
const PIXEL_TYPES: [&str; 2] = ["mono8", "mono16"];

/// Simulated sCMOS camera.
///
/// Init args: `width_px`, `height_px` (both optional, default full sensor),
/// `trigger_source` (optional DAQ).
///
/// Properties: `exposure_time_ms`, `binning`, `pixel_type`.
pub struct SimulatedCamera {
    uid: String,
    width_px: u32,
    height_px: u32,
    exposure_time_ms: f64,
    binning: u32,
    pixel_type: &'static str,
    trigger_source: Option<Instance>,
}

impl SimulatedCamera {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            width_px: MAX_WIDTH_PX,
            height_px: MAX_HEIGHT_PX,
            exposure_time_ms: 10.0,
            binning: 1,
            pixel_type: "mono16",
            trigger_source: None,
        }
    }

    pub fn from_args(args: &InitArgs) -> Result<Self, ConstructError> {
        args.expect_only(&["width_px", "height_px", "trigger_source"])?;

        let mut camera = Self::new(args.uid());
        if let Some(width) = args.optional_i64("width_px")? {
            camera.width_px = sensor_dimension("width_px", width, MAX_WIDTH_PX)?;
        }
        if let Some(height) = args.optional_i64("height_px")? {
            camera.height_px = sensor_dimension("height_px", height, MAX_HEIGHT_PX)?;
        }
        camera.trigger_source = optional_daq(args, "trigger_source")?;
        Ok(camera)
    }

    pub fn binning(&self) -> u32 {
        self.binning
    }

    pub fn pixel_type(&self) -> &str {
        self.pixel_type
    }

    pub fn trigger_source(&self) -> Option<&Instance> {
        self.trigger_source.as_ref()
    }
}

fn sensor_dimension(name: &str, value: i64, max: u32) -> Result<u32, ConstructError> {
    u32::try_from(value)
        .ok()
        .filter(|v| (1..=max).contains(v))
        .ok_or_else(|| ConstructError::InvalidArgument {
            name: name.to_string(),
            expected: "pixel count within the sensor",
            found: value.to_string(),
        })
}

impl Component for SimulatedCamera {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        match name {
            "exposure_time_ms" => {
                let ms = property_f64(name, value)?;
                self.exposure_time_ms =
                    check_range(name, ms, MIN_EXPOSURE_TIME_MS, MAX_EXPOSURE_TIME_MS)?;
            }
            "binning" => {
                let binning = value
                    .as_i64()
                    .and_then(|b| u32::try_from(b).ok())
                    .filter(|b| BINNINGS.contains(b))
                    .ok_or_else(|| PropertyError::invalid(name, format!("must be one of {:?}", BINNINGS)))?;
                self.binning = binning;
            }
            "pixel_type" => {
                self.pixel_type = check_choice(name, property_str(name, value)?, &PIXEL_TYPES)?;
            }
            _ => return Err(PropertyError::unknown(name)),
        }
        tracing::debug!(camera = %self.uid, property = name, "camera property set");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_camera(&self) -> Option<&dyn Camera> {
        Some(self)
    }
}

impl Camera for SimulatedCamera {
    fn sensor_size(&self) -> (u32, u32) {
        (self.width_px / self.binning, self.height_px / self.binning)
    }

    fn exposure_ms(&self) -> f64 {
        self.exposure_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::SimulatedDaq;
    use indexmap::IndexMap;
    use std::sync::Arc;

    fn args(pairs: Vec<(&str, Value)>) -> InitArgs {
        let mut map: IndexMap<String, Value> = IndexMap::new();
        map.insert("uid".into(), Value::from("cam"));
        for (k, v) in pairs {
            map.insert(k.to_string(), v);
        }
        InitArgs::new(map)
    }

    #[test]
    fn test_defaults_to_full_sensor() {
        let camera = SimulatedCamera::from_args(&args(vec![])).unwrap();
        assert_eq!(camera.sensor_size(), (MAX_WIDTH_PX, MAX_HEIGHT_PX));
        assert_eq!(camera.exposure_ms(), 10.0);
    }

    #[test]
    fn test_properties() {
        let mut camera = SimulatedCamera::new("cam");

        camera.set_property("exposure_time_ms", &Value::Float(25.5)).unwrap();
        camera.set_property("binning", &Value::Int(2)).unwrap();
        camera.set_property("pixel_type", &Value::from("mono8")).unwrap();

        assert_eq!(camera.exposure_ms(), 25.5);
        assert_eq!(camera.sensor_size(), (MAX_WIDTH_PX / 2, MAX_HEIGHT_PX / 2));
        assert_eq!(camera.pixel_type(), "mono8");
    }

    #[test]
    fn test_rejects_bad_properties() {
        let mut camera = SimulatedCamera::new("cam");

        assert!(camera.set_property("exposure_time_ms", &Value::Float(1e9)).is_err());
        assert!(camera.set_property("binning", &Value::Int(3)).is_err());
        assert!(camera.set_property("pixel_type", &Value::from("rgb")).is_err());
        assert_eq!(
            camera.set_property("gain", &Value::Int(1)),
            Err(PropertyError::unknown("gain"))
        );
        assert_eq!(camera.exposure_ms(), 10.0);
    }

    #[test]
    fn test_trigger_source_must_be_daq() {
        let daq: Instance = Arc::new(SimulatedDaq::new("daq"));
        let other: Instance = Arc::new(SimulatedCamera::new("other"));

        let camera =
            SimulatedCamera::from_args(&args(vec![("trigger_source", Value::from(daq))])).unwrap();
        assert_eq!(camera.trigger_source().map(|d| d.uid()), Some("daq"));

        assert!(SimulatedCamera::from_args(&args(vec![("trigger_source", Value::from(other))])).is_err());
    }

    #[test]
    fn test_rejects_oversized_sensor() {
        let result = SimulatedCamera::from_args(&args(vec![("width_px", Value::Int(20000))]));
        assert!(matches!(result, Err(ConstructError::InvalidArgument { .. })));
    }
}
