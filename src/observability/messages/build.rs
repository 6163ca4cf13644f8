// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for build pass lifecycle and per-component outcomes.
//!
//! This module contains message types for logging events related to:
//! * Build pass start and completion
//! * Component resolution, construction and failure
//! * Circular reference detection during resolution
//! * Best-effort default property assignment

use crate::errors::BuildError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Build pass started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use voxel_build::observability::messages::build::BuildStarted;
///
/// let msg = BuildStarted { component_count: 7 };
///
/// tracing::info!("{}", msg);
/// ```
pub struct BuildStarted {
    pub component_count: usize,
}

impl Display for BuildStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Building {} components", self.component_count)
    }
}

impl StructuredLog for BuildStarted {
    fn log(&self) {
        tracing::info!(component_count = self.component_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "build_pass",
            span_name = name,
            component_count = self.component_count,
        )
    }
}

/// Build pass finished. Fires whether or not any component failed.
///
/// # Log Level
/// `info!` when everything built, `warn!` otherwise
pub struct BuildCompleted {
    pub built: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl Display for BuildCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Build pass completed: {} built, {} failed in {:?}",
            self.built, self.failed, self.duration
        )
    }
}

impl StructuredLog for BuildCompleted {
    fn log(&self) {
        if self.failed == 0 {
            tracing::info!(
                built = self.built,
                failed = self.failed,
                duration_ms = self.duration.as_millis() as u64,
                "{}", self
            );
        } else {
            tracing::warn!(
                built = self.built,
                failed = self.failed,
                duration_ms = self.duration.as_millis() as u64,
                "{}", self
            );
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "build_pass_completed",
            span_name = name,
            built = self.built,
            failed = self.failed,
            duration = ?self.duration,
        )
    }
}

/// `build()` called on a context that already ran.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct BuildAlreadyCompleted;

impl Display for BuildAlreadyCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "BuildContext::build() called again; nothing to do")
    }
}

impl StructuredLog for BuildAlreadyCompleted {
    fn log(&self) {
        tracing::debug!("{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("build_pass", span_name = name)
    }
}

/// One component is being resolved. Used for its span.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct ComponentResolving<'a> {
    pub component_id: &'a str,
    pub target: &'a str,
}

impl Display for ComponentResolving<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Resolving component '{}' ({})", self.component_id, self.target)
    }
}

impl StructuredLog for ComponentResolving<'_> {
    fn log(&self) {
        tracing::debug!(
            component_id = self.component_id,
            component_target = self.target,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "component",
            span_name = name,
            component_id = self.component_id,
            component_target = self.target,
        )
    }
}

/// Component constructed and stored.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct ComponentBuilt<'a> {
    pub component_id: &'a str,
    pub target: &'a str,
    pub dependency_count: usize,
}

impl Display for ComponentBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built component '{}' ({}) with {} dependencies",
            self.component_id, self.target, self.dependency_count
        )
    }
}

impl StructuredLog for ComponentBuilt<'_> {
    fn log(&self) {
        tracing::debug!(
            component_id = self.component_id,
            component_target = self.target,
            dependency_count = self.dependency_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "component_built",
            span_name = name,
            component_id = self.component_id,
            component_target = self.target,
        )
    }
}

/// Component ended in a build error.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ComponentFailed<'a> {
    pub error: &'a BuildError,
}

impl Display for ComponentFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Component '{}' failed to build ({}): {}",
            self.error.id, self.error.kind, self.error.detail
        )
    }
}

impl StructuredLog for ComponentFailed<'_> {
    fn log(&self) {
        tracing::error!(
            component_id = %self.error.id,
            kind = %self.error.kind,
            detail = %self.error.detail,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "component_failed",
            span_name = name,
            component_id = %self.error.id,
            kind = %self.error.kind,
        )
    }
}

/// Component reached again while still being resolved.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct CircularReferenceDetected<'a> {
    pub component_id: &'a str,
    pub in_progress: usize,
}

impl Display for CircularReferenceDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Circular reference: '{}' reached again with {} components in progress",
            self.component_id, self.in_progress
        )
    }
}

impl StructuredLog for CircularReferenceDetected<'_> {
    fn log(&self) {
        tracing::error!(
            component_id = self.component_id,
            in_progress = self.in_progress,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "circular_reference",
            span_name = name,
            component_id = self.component_id,
        )
    }
}

/// A plain string argument was replaced with a built component.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct ImplicitReferenceResolved<'a> {
    pub component_id: &'a str,
    pub referenced_id: &'a str,
}

impl Display for ImplicitReferenceResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Treating string '{}' in '{}' as a component reference",
            self.referenced_id, self.component_id
        )
    }
}

impl StructuredLog for ImplicitReferenceResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            component_id = self.component_id,
            referenced_id = self.referenced_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "implicit_reference",
            span_name = name,
            component_id = self.component_id,
            referenced_id = self.referenced_id,
        )
    }
}

/// A default property could not be applied. The component still builds.
///
/// # Log Level
/// `warn!` - Degraded but continuing
pub struct PropertyAssignmentFailed<'a> {
    pub component_id: &'a str,
    pub property: &'a str,
    pub reason: &'a str,
}

impl Display for PropertyAssignmentFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to set property {} for {}: {}",
            self.property, self.component_id, self.reason
        )
    }
}

impl StructuredLog for PropertyAssignmentFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            component_id = self.component_id,
            property = self.property,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "property_assignment",
            span_name = name,
            component_id = self.component_id,
            property = self.property,
        )
    }
}
