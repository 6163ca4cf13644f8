// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for component group validation warnings and errors.
//!
//! This module contains message types for logging events related to:
//! * Cyclic reference detection
//! * Dangling explicit references
//! * Malformed target names
//! * Plain-string references inferred from constructor arguments

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cyclic dependency detected in a component group.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use voxel_build::observability::messages::validation::CyclicDependencyDetected;
///
/// let cycle = vec!["camera", "daq", "camera"];
/// let msg = CyclicDependencyDetected {
///     cycle: &cycle,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CyclicDependencyDetected<'a> {
    pub cycle: &'a [&'a str],
}

impl Display for CyclicDependencyDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic dependency detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicDependencyDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "validation",
            span_name = name,
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
        )
    }
}

/// Explicit reference to a component that is not in the group.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DanglingReference<'a> {
    pub component_id: &'a str,
    pub missing_reference: &'a str,
}

impl Display for DanglingReference<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Component '{}' references missing component '{}'",
            self.component_id, self.missing_reference
        )
    }
}

impl StructuredLog for DanglingReference<'_> {
    fn log(&self) {
        tracing::error!(
            component_id = self.component_id,
            missing_reference = self.missing_reference,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "validation",
            span_name = name,
            component_id = self.component_id,
            missing_reference = self.missing_reference,
        )
    }
}

/// Target name is not of the form `namespace.TypeName`.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct MalformedTarget<'a> {
    pub component_id: &'a str,
    pub target: &'a str,
}

impl Display for MalformedTarget<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Component '{}' has malformed target '{}'",
            self.component_id, self.target
        )
    }
}

impl StructuredLog for MalformedTarget<'_> {
    fn log(&self) {
        tracing::error!(
            component_id = self.component_id,
            component_target = self.target,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "validation",
            span_name = name,
            component_id = self.component_id,
            component_target = self.target,
        )
    }
}

/// A plain string argument matched another component's id.
///
/// # Log Level
/// `debug!` - A literal that collides with a sibling's id is wired the same
/// way, so these are worth seeing when a component gets an unexpected argument.
pub struct ImplicitReferenceFound<'a> {
    pub component_id: &'a str,
    pub referenced_id: &'a str,
}

impl Display for ImplicitReferenceFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Component '{}' refers to '{}' by plain string; use !ref to make it explicit",
            self.component_id, self.referenced_id
        )
    }
}

impl StructuredLog for ImplicitReferenceFound<'_> {
    fn log(&self) {
        tracing::debug!(
            component_id = self.component_id,
            referenced_id = self.referenced_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "validation",
            span_name = name,
            component_id = self.component_id,
            referenced_id = self.referenced_id,
        )
    }
}
