// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{check_range, property_f64};
use crate::build::InitArgs;
use crate::config::Value;
use crate::errors::{ConstructError, PropertyError};
use crate::traits::{Component, Daq};
use std::any::Any;

const AO_CHANNEL_COUNT: i64 = 32;
const CO_PHYSICAL_CHANS: [&str; 2] = ["ctr0", "ctr1"];
const DO_PHYSICAL_CHANS: [&str; 2] = ["port0", "port1"];
const MIN_AO_RATE_HZ: f64 = 1e3;
const MAX_AO_RATE_HZ: f64 = 350e3;

/// Simulated multifunction DAQ card.
///
/// Init args: `ao_channels` (optional, default 32).
/// Properties: `ao_rate_hz`.
pub struct SimulatedDaq {
    uid: String,
    channels: Vec<String>,
    ao_rate_hz: f64,
}

impl SimulatedDaq {
    pub fn new(uid: impl Into<String>) -> Self {
        let uid = uid.into();
        let channels = physical_channels(&uid, AO_CHANNEL_COUNT);
        Self {
            uid,
            channels,
            ao_rate_hz: MAX_AO_RATE_HZ,
        }
    }

    pub fn from_args(args: &InitArgs) -> Result<Self, ConstructError> {
        args.expect_only(&["ao_channels"])?;

        let mut daq = Self::new(args.uid());
        if let Some(count) = args.optional_i64("ao_channels")? {
            if !(0..=AO_CHANNEL_COUNT).contains(&count) {
                return Err(ConstructError::InvalidArgument {
                    name: "ao_channels".to_string(),
                    expected: "channel count between 0 and 32",
                    found: count.to_string(),
                });
            }
            daq.channels = physical_channels(&daq.uid, count);
        }
        Ok(daq)
    }

    pub fn ao_rate_hz(&self) -> f64 {
        self.ao_rate_hz
    }
}

fn physical_channels(uid: &str, ao_count: i64) -> Vec<String> {
    (0..ao_count)
        .map(|i| format!("{}/ao{}", uid, i))
        .chain(
            CO_PHYSICAL_CHANS
                .iter()
                .chain(DO_PHYSICAL_CHANS.iter())
                .map(|chan| format!("{}/{}", uid, chan)),
        )
        .collect()
}

impl Component for SimulatedDaq {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        match name {
            "ao_rate_hz" => {
                let rate = property_f64(name, value)?;
                self.ao_rate_hz = check_range(name, rate, MIN_AO_RATE_HZ, MAX_AO_RATE_HZ)?;
                Ok(())
            }
            "channels" => Err(PropertyError::ReadOnly {
                name: name.to_string(),
            }),
            _ => Err(PropertyError::unknown(name)),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_daq(&self) -> Option<&dyn Daq> {
        Some(self)
    }
}

impl Daq for SimulatedDaq {
    fn channels(&self) -> Vec<String> {
        self.channels.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_prefixed_with_uid() {
        let daq = SimulatedDaq::new("pcie-6738");
        let channels = daq.channels();

        assert_eq!(channels.len(), 36);
        assert_eq!(channels[0], "pcie-6738/ao0");
        assert_eq!(channels[31], "pcie-6738/ao31");
        assert_eq!(channels[35], "pcie-6738/port1");
    }

    #[test]
    fn test_ao_channel_count() {
        let mut args = InitArgs::for_uid("daq").into_inner();
        args.insert("ao_channels".into(), Value::Int(4));

        let daq = SimulatedDaq::from_args(&InitArgs::new(args)).unwrap();
        assert_eq!(daq.channels().len(), 8);
    }

    #[test]
    fn test_rate_property() {
        let mut daq = SimulatedDaq::new("daq");

        daq.set_property("ao_rate_hz", &Value::Float(10e3)).unwrap();
        assert_eq!(daq.ao_rate_hz(), 10e3);
        assert!(daq.set_property("ao_rate_hz", &Value::Float(1e6)).is_err());
        assert!(matches!(
            daq.set_property("channels", &Value::Null),
            Err(PropertyError::ReadOnly { .. })
        ));
    }
}
