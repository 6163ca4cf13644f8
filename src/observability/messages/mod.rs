// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! [`StructuredLog`] to emit a `tracing` event with the message's fields
//! attached.
//!
//! # Organization
//!
//! * `build` - Build pass lifecycle and per-component outcomes
//! * `instrument` - Instrument bring-up and profile changes
//! * `validation` - Component group validation warnings and errors
//!
//! # Usage Pattern
//!
//! ```rust
//! use voxel_build::observability::messages::build::BuildStarted;
//! use voxel_build::observability::messages::StructuredLog;
//!
//! let msg = BuildStarted { component_count: 5 };
//!
//! tracing::info!("{}", msg);
//! msg.log();
//! ```

use tracing::Span;

pub mod build;
pub mod instrument;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event at its level.
    fn log(&self);

    /// Create a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
