// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Device capabilities the instrument groups built components by.
//!
//! Every method takes `&self`: devices are shared after the build pass.

use crate::errors::PropertyError;

pub trait Camera: Send + Sync {
    /// Sensor size in pixels, `(width, height)`.
    fn sensor_size(&self) -> (u32, u32);

    fn exposure_ms(&self) -> f64;
}

pub trait Laser: Send + Sync {
    fn wavelength_nm(&self) -> u32;

    fn enable(&self);

    fn disable(&self);

    fn is_enabled(&self) -> bool;
}

/// A continuous motion axis.
pub trait Axis: Send + Sync {
    fn position_mm(&self) -> f64;

    fn move_to(&self, position_mm: f64) -> Result<(), PropertyError>;

    /// Stop any motion immediately.
    fn halt(&self);
}

/// An axis with labelled slots, such as a filter wheel.
pub trait DiscreteAxis: Send + Sync {
    fn position(&self) -> usize;

    fn label(&self) -> Option<String>;

    fn labels(&self) -> Vec<String>;

    fn move_to_label(&self, label: &str) -> Result<(), PropertyError>;
}

pub trait Daq: Send + Sync {
    fn channels(&self) -> Vec<String>;
}
