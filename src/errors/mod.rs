// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod build;
mod config;
mod instrument;
mod registry;

pub use build::{BuildError, BuildErrorKind};
pub use config::{ConfigError, ValidationError};
pub use instrument::InstrumentError;
pub use registry::{ConstructError, ImportError, PropertyError};
