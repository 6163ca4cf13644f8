// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{BuildError, PropertyError};
use thiserror::Error;

/// Errors raised while bringing up or driving an instrument.
#[derive(Debug, Error)]
pub enum InstrumentError {
    /// One or more devices failed to build. Startup is aborted.
    #[error("Device build errors:\n{}", report(.errors))]
    Build { errors: Vec<BuildError> },

    /// No built device exposes a required capability.
    #[error("no {capability} device configured")]
    MissingDevice { capability: &'static str },

    /// A stage axis name is absent or does not refer to an axis.
    #[error("stage axis '{axis}' refers to '{device}', which is not a built axis")]
    InvalidStageAxis { axis: &'static str, device: String },

    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("profile '{profile}' refers to unknown {capability} '{device}'")]
    ProfileDevice {
        profile: String,
        capability: &'static str,
        device: String,
    },

    #[error("failed to move filter wheel '{wheel}': {source}")]
    FilterWheel {
        wheel: String,
        #[source]
        source: PropertyError,
    },
}

fn report(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
