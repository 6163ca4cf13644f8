// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{check_choice, check_range, optional_daq, property_f64, property_str};
use crate::build::InitArgs;
use crate::config::Value;
use crate::errors::{ConstructError, PropertyError};
use crate::traits::{Component, Instance, Laser};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};

const DEFAULT_MAX_POWER_MW: f64 = 100.0;
const MODULATION_MODES: [&str; 3] = ["off", "analog", "digital"];

/// Simulated continuous-wave laser.
///
/// Init args: `wavelength` (nm, required), `maximum_power_mw` (optional),
/// `modulation_source` (optional DAQ).
///
/// Properties: `power_setpoint_mw`, `modulation_mode`. `temperature_c` is
/// read-only.
pub struct SimulatedLaser {
    uid: String,
    wavelength_nm: u32,
    max_power_mw: f64,
    power_setpoint_mw: f64,
    modulation_mode: &'static str,
    modulation_source: Option<Instance>,
    enabled: AtomicBool,
}

impl SimulatedLaser {
    pub fn new(uid: impl Into<String>, wavelength_nm: u32) -> Self {
        Self {
            uid: uid.into(),
            wavelength_nm,
            max_power_mw: DEFAULT_MAX_POWER_MW,
            power_setpoint_mw: 10.0,
            modulation_mode: "digital",
            modulation_source: None,
            enabled: AtomicBool::new(false),
        }
    }

    pub fn from_args(args: &InitArgs) -> Result<Self, ConstructError> {
        args.expect_only(&["wavelength", "maximum_power_mw", "modulation_source"])?;

        let wavelength = args.i64("wavelength")?;
        let wavelength_nm = u32::try_from(wavelength)
            .ok()
            .filter(|nm| *nm > 0)
            .ok_or_else(|| ConstructError::InvalidArgument {
                name: "wavelength".to_string(),
                expected: "positive wavelength in nm",
                found: wavelength.to_string(),
            })?;

        let mut laser = Self::new(args.uid(), wavelength_nm);
        if let Some(max) = args.optional_f64("maximum_power_mw")? {
            if max <= 0.0 {
                return Err(ConstructError::InvalidArgument {
                    name: "maximum_power_mw".to_string(),
                    expected: "positive power",
                    found: max.to_string(),
                });
            }
            laser.max_power_mw = max;
            laser.power_setpoint_mw = laser.power_setpoint_mw.min(max);
        }
        laser.modulation_source = optional_daq(args, "modulation_source")?;
        Ok(laser)
    }

    pub fn power_setpoint_mw(&self) -> f64 {
        self.power_setpoint_mw
    }

    pub fn modulation_mode(&self) -> &str {
        self.modulation_mode
    }

    pub fn modulation_source(&self) -> Option<&Instance> {
        self.modulation_source.as_ref()
    }
}

impl Component for SimulatedLaser {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        match name {
            "power_setpoint_mw" => {
                let mw = property_f64(name, value)?;
                self.power_setpoint_mw = check_range(name, mw, 0.0, self.max_power_mw)?;
            }
            "modulation_mode" => {
                self.modulation_mode =
                    check_choice(name, property_str(name, value)?, &MODULATION_MODES)?;
            }
            "temperature_c" | "wavelength" => {
                return Err(PropertyError::ReadOnly {
                    name: name.to_string(),
                })
            }
            _ => return Err(PropertyError::unknown(name)),
        }
        tracing::debug!(laser = %self.uid, property = name, "laser property set");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_laser(&self) -> Option<&dyn Laser> {
        Some(self)
    }
}

impl Laser for SimulatedLaser {
    fn wavelength_nm(&self) -> u32 {
        self.wavelength_nm
    }

    fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
        tracing::info!(laser = %self.uid, wavelength_nm = self.wavelength_nm, "laser enabled");
    }

    fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
        tracing::info!(laser = %self.uid, wavelength_nm = self.wavelength_nm, "laser disabled");
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: Vec<(&str, Value)>) -> InitArgs {
        let mut map = InitArgs::for_uid("488nm").into_inner();
        for (k, v) in pairs {
            map.insert(k.to_string(), v);
        }
        InitArgs::new(map)
    }

    #[test]
    fn test_from_args() {
        let laser = SimulatedLaser::from_args(&args(vec![
            ("wavelength", Value::Int(488)),
            ("maximum_power_mw", Value::Float(50.0)),
        ]))
        .unwrap();

        assert_eq!(laser.uid(), "488nm");
        assert_eq!(laser.wavelength_nm(), 488);
        assert!(!laser.is_enabled());
    }

    #[test]
    fn test_wavelength_required() {
        assert_eq!(
            SimulatedLaser::from_args(&args(vec![])).err(),
            Some(ConstructError::MissingArgument {
                name: "wavelength".into()
            })
        );
    }

    #[test]
    fn test_unexpected_argument() {
        let result = SimulatedLaser::from_args(&args(vec![
            ("wavelength", Value::Int(561)),
            ("colour", Value::from("green")),
        ]));
        assert!(matches!(result, Err(ConstructError::UnexpectedArgument { .. })));
    }

    #[test]
    fn test_enable_through_shared_reference() {
        let laser = SimulatedLaser::new("639nm", 639);
        let shared: &dyn Laser = &laser;

        shared.enable();
        assert!(laser.is_enabled());
        shared.disable();
        assert!(!laser.is_enabled());
    }

    #[test]
    fn test_power_setpoint_bounded_by_maximum() {
        let mut laser = SimulatedLaser::new("405nm", 405);

        laser.set_property("power_setpoint_mw", &Value::Int(80)).unwrap();
        assert_eq!(laser.power_setpoint_mw(), 80.0);
        assert!(laser.set_property("power_setpoint_mw", &Value::Float(150.0)).is_err());
        assert!(laser.set_property("modulation_mode", &Value::from("pulsed")).is_err());
        assert!(matches!(
            laser.set_property("temperature_c", &Value::Float(25.0)),
            Err(PropertyError::ReadOnly { .. })
        ));
    }
}
