// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with a `Display`
//! implementation, so log text lives in one place instead of as magic strings
//! scattered through the builder.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::build` - Build pass lifecycle and per-component outcomes
//! * `messages::instrument` - Instrument bring-up and profile changes
//! * `messages::validation` - Component group validation warnings and errors
//!
//! # Usage
//!
//! ```rust
//! use voxel_build::errors::BuildError;
//! use voxel_build::observability::messages::build::ComponentFailed;
//!
//! let error = BuildError::instantiation("camera", "sensor offline");
//! let msg = ComponentFailed { error: &error };
//!
//! tracing::error!("{}", msg);
//! ```

pub mod messages;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
