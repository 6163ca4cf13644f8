// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Instrument bring-up on top of the build pass.
//!
//! [`Instrument::new`] builds every configured device, refuses to start if
//! any device failed, then classifies the built components by capability.
//! There is no partial-success startup: one failed device aborts the whole
//! instrument with a report listing every failure.

use crate::build::{build_objects, BuiltObjects};
use crate::config::{InstrumentConfig, InstrumentInfo, ProfileConfig, StageConfig};
use crate::errors::InstrumentError;
use crate::observability::messages::instrument::{InstrumentReady, ProfileActivated};
use crate::observability::messages::StructuredLog;
use crate::traits::{Axis, Component, DiscreteAxis, Instance, Laser, TypeRegistry};
use indexmap::IndexMap;

pub struct Instrument {
    info: InstrumentInfo,
    devices: BuiltObjects,
    camera: Instance,
    daq: Instance,
    stage: StageConfig,
    lasers: Vec<String>,
    filter_wheels: Vec<String>,
    axes: Vec<String>,
    focusing_axes: Vec<String>,
    profiles: IndexMap<String, ProfileConfig>,
    active_profile: Option<String>,
}

impl Instrument {
    /// Build and classify every device in `config`.
    ///
    /// The first profile, if any, becomes active without touching hardware;
    /// call [`Instrument::set_active_profile`] to apply it.
    pub fn new<R: TypeRegistry + ?Sized>(
        config: InstrumentConfig,
        registry: &R,
    ) -> Result<Self, InstrumentError> {
        let (devices, errors) = build_objects(&config.devices, registry);
        if !errors.is_empty() {
            return Err(InstrumentError::Build {
                errors: errors.into_values().collect(),
            });
        }

        let camera = first_with(&devices, |c| c.as_camera().is_some())
            .ok_or(InstrumentError::MissingDevice { capability: "camera" })?;
        let daq = first_with(&devices, |c| c.as_daq().is_some())
            .ok_or(InstrumentError::MissingDevice { capability: "daq" })?;

        for (axis, device) in [
            ("x", &config.stage.x),
            ("y", &config.stage.y),
            ("z", &config.stage.z),
        ] {
            if devices.get(device).and_then(|d| d.as_axis()).is_none() {
                return Err(InstrumentError::InvalidStageAxis {
                    axis,
                    device: device.clone(),
                });
            }
        }

        let ids_with = |has: fn(&dyn Component) -> bool| -> Vec<String> {
            devices
                .iter()
                .filter(|(_, d)| has(d.as_ref()))
                .map(|(id, _)| id.clone())
                .collect()
        };
        let lasers = ids_with(|c| c.as_laser().is_some());
        let filter_wheels = ids_with(|c| c.as_discrete_axis().is_some());
        let axes = ids_with(|c| c.as_axis().is_some());
        let stage_ids = [&config.stage.x, &config.stage.y, &config.stage.z];
        let focusing_axes = axes
            .iter()
            .filter(|id| !stage_ids.contains(id))
            .cloned()
            .collect();

        let instrument = Self {
            info: config.info,
            devices,
            camera,
            daq,
            stage: config.stage,
            lasers,
            filter_wheels,
            axes,
            focusing_axes,
            active_profile: config.profiles.keys().next().cloned(),
            profiles: config.profiles,
        };

        for (name, profile) in &instrument.profiles {
            instrument.check_profile(name, profile)?;
        }

        InstrumentReady {
            instrument_uid: &instrument.info.instrument_uid,
            device_count: instrument.devices.len(),
            laser_count: instrument.lasers.len(),
            axis_count: instrument.axes.len(),
        }
        .log();

        Ok(instrument)
    }

    pub fn info(&self) -> &InstrumentInfo {
        &self.info
    }

    pub fn uid(&self) -> &str {
        &self.info.instrument_uid
    }

    pub fn devices(&self) -> &BuiltObjects {
        &self.devices
    }

    pub fn device(&self, id: &str) -> Option<&Instance> {
        self.devices.get(id)
    }

    /// The primary camera. Always exposes [`Component::as_camera`].
    pub fn camera(&self) -> &Instance {
        &self.camera
    }

    /// The primary DAQ. Always exposes [`Component::as_daq`].
    pub fn daq(&self) -> &Instance {
        &self.daq
    }

    pub fn lasers(&self) -> impl Iterator<Item = (&str, &dyn Laser)> {
        self.with_capability(&self.lasers, |c| c.as_laser())
    }

    pub fn filter_wheels(&self) -> impl Iterator<Item = (&str, &dyn DiscreteAxis)> {
        self.with_capability(&self.filter_wheels, |c| c.as_discrete_axis())
    }

    /// Every axis, stage axes included.
    pub fn axes(&self) -> impl Iterator<Item = (&str, &dyn Axis)> {
        self.with_capability(&self.axes, |c| c.as_axis())
    }

    /// Axes that are not part of the x/y/z stage.
    pub fn focusing_axes(&self) -> impl Iterator<Item = (&str, &dyn Axis)> {
        self.with_capability(&self.focusing_axes, |c| c.as_axis())
    }

    /// Stage axes in x, y, z order.
    pub fn stage(&self) -> impl Iterator<Item = (&'static str, &dyn Axis)> {
        [
            ("x", &self.stage.x),
            ("y", &self.stage.y),
            ("z", &self.stage.z),
        ]
        .into_iter()
        .filter_map(move |(axis, id)| {
            self.devices
                .get(id)
                .and_then(|d| d.as_axis())
                .map(|a| (axis, a))
        })
    }

    pub fn profiles(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn active_profile(&self) -> Option<&str> {
        self.active_profile.as_deref()
    }

    /// The laser of the active profile.
    pub fn active_channel_laser(&self) -> Option<&dyn Laser> {
        let profile = self.profiles.get(self.active_profile.as_deref()?)?;
        self.devices.get(&profile.laser)?.as_laser()
    }

    pub fn disable_lasers(&self) {
        for (_, laser) in self.lasers() {
            laser.disable();
        }
    }

    pub fn halt_stage(&self) {
        for (_, axis) in self.axes() {
            axis.halt();
        }
    }

    /// Switch channels: disable every laser, then move each filter wheel the
    /// profile names to its label. The profile's laser stays off.
    pub fn set_active_profile(&mut self, name: &str) -> Result<(), InstrumentError> {
        let profile = self
            .profiles
            .get(name)
            .ok_or_else(|| InstrumentError::UnknownProfile(name.to_string()))?;

        self.disable_lasers();
        for (wheel_id, label) in &profile.filters {
            let wheel = self
                .devices
                .get(wheel_id)
                .and_then(|d| d.as_discrete_axis())
                .ok_or_else(|| InstrumentError::ProfileDevice {
                    profile: name.to_string(),
                    capability: "filter wheel",
                    device: wheel_id.clone(),
                })?;
            wheel
                .move_to_label(label)
                .map_err(|source| InstrumentError::FilterWheel {
                    wheel: wheel_id.clone(),
                    source,
                })?;
        }

        self.active_profile = Some(name.to_string());
        ProfileActivated {
            instrument_uid: &self.info.instrument_uid,
            profile: name,
        }
        .log();
        Ok(())
    }

    /// Put the hardware in a safe state: lasers off, motion stopped.
    pub fn shutdown(&self) {
        self.disable_lasers();
        self.halt_stage();
    }

    fn with_capability<'s, T, F>(
        &'s self,
        ids: &'s [String],
        cast: F,
    ) -> impl Iterator<Item = (&'s str, &'s T)> + 's
    where
        T: ?Sized + 's,
        F: Fn(&'s dyn Component) -> Option<&'s T> + 's,
    {
        ids.iter().filter_map(move |id| {
            let device = self.devices.get(id)?;
            cast(device.as_ref()).map(|c| (id.as_str(), c))
        })
    }

    fn check_profile(&self, name: &str, profile: &ProfileConfig) -> Result<(), InstrumentError> {
        let missing = |capability: &'static str, device: &str| InstrumentError::ProfileDevice {
            profile: name.to_string(),
            capability,
            device: device.to_string(),
        };

        let is = |id: &str, has: fn(&dyn Component) -> bool| {
            self.devices.get(id).map_or(false, |d| has(d.as_ref()))
        };

        if !is(profile.camera.as_str(), |c| c.as_camera().is_some()) {
            return Err(missing("camera", profile.camera.as_str()));
        }
        if !is(profile.laser.as_str(), |c| c.as_laser().is_some()) {
            return Err(missing("laser", profile.laser.as_str()));
        }
        for axis in &profile.focusing_axes {
            if !is(axis.as_str(), |c| c.as_axis().is_some()) {
                return Err(missing("axis", axis.as_str()));
            }
        }
        for (wheel_id, label) in &profile.filters {
            let wheel = self
                .devices
                .get(wheel_id)
                .and_then(|d| d.as_discrete_axis())
                .ok_or_else(|| missing("filter wheel", wheel_id.as_str()))?;
            if !wheel.labels().iter().any(|l| l == label) {
                return Err(missing("filter", label.as_str()));
            }
        }
        Ok(())
    }
}

fn first_with(devices: &BuiltObjects, has: fn(&dyn Component) -> bool) -> Option<Instance> {
    devices.values().find(|d| has(d.as_ref())).cloned()
}
