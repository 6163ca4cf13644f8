// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{check_choice, check_range, property_f64, property_str};
use crate::build::InitArgs;
use crate::config::Value;
use crate::errors::{ConstructError, PropertyError};
use crate::traits::{Axis, Component};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

const DEFAULT_LIMITS_MM: (f64, f64) = (-10000.0, 10000.0);
const MODES: [&str; 3] = ["step shoot", "off", "stage scan"];

/// Simulated linear stage axis. Moves complete instantly.
///
/// Init args: `hardware_axis`, `instrument_axis` (both required),
/// `limits_mm` (optional `[min, max]`).
///
/// Properties: `speed_mm_s`, `backlash_mm`, `mode`.
pub struct SimulatedLinearAxis {
    uid: String,
    hardware_axis: String,
    instrument_axis: String,
    limits_mm: (f64, f64),
    speed_mm_s: f64,
    backlash_mm: f64,
    mode: &'static str,
    position_mm: Mutex<f64>,
    moving: AtomicBool,
}

impl SimulatedLinearAxis {
    pub fn new(uid: impl Into<String>, hardware_axis: &str, instrument_axis: &str) -> Self {
        Self {
            uid: uid.into(),
            hardware_axis: hardware_axis.to_uppercase(),
            instrument_axis: instrument_axis.to_lowercase(),
            limits_mm: DEFAULT_LIMITS_MM,
            speed_mm_s: 1.0,
            backlash_mm: 0.1,
            mode: "off",
            position_mm: Mutex::new(0.0),
            moving: AtomicBool::new(false),
        }
    }

    pub fn from_args(args: &InitArgs) -> Result<Self, ConstructError> {
        args.expect_only(&["hardware_axis", "instrument_axis", "limits_mm"])?;

        let mut axis = Self::new(
            args.uid(),
            args.str("hardware_axis")?,
            args.str("instrument_axis")?,
        );
        match args.get("limits_mm") {
            None | Some(Value::Null) => {}
            Some(_) => axis.limits_mm = parse_limits(args.list("limits_mm")?)?,
        }
        Ok(axis)
    }

    pub fn hardware_axis(&self) -> &str {
        &self.hardware_axis
    }

    pub fn instrument_axis(&self) -> &str {
        &self.instrument_axis
    }

    pub fn limits_mm(&self) -> (f64, f64) {
        self.limits_mm
    }

    pub fn speed_mm_s(&self) -> f64 {
        self.speed_mm_s
    }

    pub fn mode(&self) -> &str {
        self.mode
    }

    pub fn is_moving(&self) -> bool {
        self.moving.load(Ordering::SeqCst)
    }
}

fn parse_limits(values: &[Value]) -> Result<(f64, f64), ConstructError> {
    let invalid = || ConstructError::InvalidArgument {
        name: "limits_mm".to_string(),
        expected: "[min, max] with min < max",
        found: format!("{:?}", values),
    };
    match values {
        [min, max] => {
            let (min, max) = (min.as_f64().ok_or_else(invalid)?, max.as_f64().ok_or_else(invalid)?);
            if min < max {
                Ok((min, max))
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}

impl Component for SimulatedLinearAxis {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        match name {
            "speed_mm_s" => {
                let speed = property_f64(name, value)?;
                if speed <= 0.0 {
                    return Err(PropertyError::invalid(name, "speed must be positive"));
                }
                self.speed_mm_s = speed;
            }
            "backlash_mm" => {
                let backlash = property_f64(name, value)?;
                self.backlash_mm = check_range(name, backlash, 0.0, f64::MAX)?;
            }
            "mode" => {
                self.mode = check_choice(name, property_str(name, value)?, &MODES)?;
            }
            "position_mm" => {
                let target = property_f64(name, value)?;
                self.move_to(target)?;
            }
            _ => return Err(PropertyError::unknown(name)),
        }
        tracing::debug!(axis = %self.uid, property = name, "axis property set");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_axis(&self) -> Option<&dyn Axis> {
        Some(self)
    }
}

impl Axis for SimulatedLinearAxis {
    fn position_mm(&self) -> f64 {
        match self.position_mm.lock() {
            Ok(position) => *position,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn move_to(&self, position_mm: f64) -> Result<(), PropertyError> {
        let (min, max) = self.limits_mm;
        let target = check_range("position_mm", position_mm, min, max)?;

        self.moving.store(true, Ordering::SeqCst);
        match self.position_mm.lock() {
            Ok(mut position) => *position = target,
            Err(poisoned) => *poisoned.into_inner() = target,
        }
        self.moving.store(false, Ordering::SeqCst);

        tracing::info!(
            axis = %self.uid,
            hardware_axis = %self.hardware_axis,
            position_mm = target,
            "absolute move"
        );
        Ok(())
    }

    fn halt(&self) {
        self.moving.store(false, Ordering::SeqCst);
        tracing::info!(axis = %self.uid, hardware_axis = %self.hardware_axis, "halted");
    }
}
