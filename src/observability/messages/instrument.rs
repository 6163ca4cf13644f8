// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for instrument bring-up and profile changes.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Instrument devices built and grouped.
///
/// # Log Level
/// `info!` - Important operational event
pub struct InstrumentReady<'a> {
    pub instrument_uid: &'a str,
    pub device_count: usize,
    pub laser_count: usize,
    pub axis_count: usize,
}

impl Display for InstrumentReady<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Instrument '{}' ready: {} devices ({} lasers, {} axes)",
            self.instrument_uid, self.device_count, self.laser_count, self.axis_count
        )
    }
}

impl StructuredLog for InstrumentReady<'_> {
    fn log(&self) {
        tracing::info!(
            instrument_uid = self.instrument_uid,
            device_count = self.device_count,
            laser_count = self.laser_count,
            axis_count = self.axis_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "instrument",
            span_name = name,
            instrument_uid = self.instrument_uid,
        )
    }
}

/// Active imaging profile changed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ProfileActivated<'a> {
    pub instrument_uid: &'a str,
    pub profile: &'a str,
}

impl Display for ProfileActivated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Instrument '{}' switched to profile '{}'",
            self.instrument_uid, self.profile
        )
    }
}

impl StructuredLog for ProfileActivated<'_> {
    fn log(&self) {
        tracing::info!(
            instrument_uid = self.instrument_uid,
            profile = self.profile,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "profile",
            span_name = name,
            instrument_uid = self.instrument_uid,
            profile = self.profile,
        )
    }
}
