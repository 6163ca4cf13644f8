// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Simulated devices used by the example instrument and the test suite.
//!
//! Each device is registered under `simulated.<TypeName>`. Configuration
//! arrives through constructor arguments; anything tunable after
//! construction is exposed through `set_property` so it can be listed under
//! a spec's `defaults`.

pub mod axis;
pub mod camera;
pub mod daq;
pub mod filter_wheel;
pub mod laser;

pub use axis::SimulatedLinearAxis;
pub use camera::SimulatedCamera;
pub use daq::SimulatedDaq;
pub use filter_wheel::SimulatedFilterWheel;
pub use laser::SimulatedLaser;

use crate::config::{Registry, Value};
use crate::errors::{ConstructError, PropertyError};
use crate::traits::Instance;

pub const SIMULATED_NAMESPACE: &str = "simulated";

/// Register every simulated device with `registry`.
pub fn register_simulated_devices(registry: &mut Registry) {
    registry
        .register("simulated.Camera", |args| {
            Ok(Box::new(SimulatedCamera::from_args(&args)?))
        })
        .register("simulated.Daq", |args| Ok(Box::new(SimulatedDaq::from_args(&args)?)))
        .register("simulated.FilterWheel", |args| {
            Ok(Box::new(SimulatedFilterWheel::from_args(&args)?))
        })
        .register("simulated.Laser", |args| {
            Ok(Box::new(SimulatedLaser::from_args(&args)?))
        })
        .register("simulated.LinearAxis", |args| {
            Ok(Box::new(SimulatedLinearAxis::from_args(&args)?))
        });
}

fn property_f64(name: &str, value: &Value) -> Result<f64, PropertyError> {
    value
        .as_f64()
        .ok_or_else(|| PropertyError::invalid(name, format!("expected number, found {}", value.type_name())))
}

fn property_str<'v>(name: &str, value: &'v Value) -> Result<&'v str, PropertyError> {
    value
        .as_str()
        .ok_or_else(|| PropertyError::invalid(name, format!("expected string, found {}", value.type_name())))
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<f64, PropertyError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(PropertyError::invalid(
            name,
            format!("{} outside [{}, {}]", value, min, max),
        ))
    }
}

fn check_choice<'c>(name: &str, value: &str, choices: &[&'c str]) -> Result<&'c str, PropertyError> {
    choices
        .iter()
        .find(|choice| **choice == value)
        .copied()
        .ok_or_else(|| PropertyError::invalid(name, format!("'{}' not one of {:?}", value, choices)))
}

/// An optional dependency that must be a DAQ when present.
fn optional_daq(args: &crate::build::InitArgs, name: &str) -> Result<Option<Instance>, ConstructError> {
    match args.optional_instance(name)? {
        Some(instance) if instance.as_daq().is_none() => Err(ConstructError::InvalidArgument {
            name: name.to_string(),
            expected: "daq",
            found: instance.uid().to_string(),
        }),
        other => Ok(other),
    }
}
