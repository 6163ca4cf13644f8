// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Terminal build outcomes for components that could not be constructed.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Classification of a failed component build.
///
/// The kinds are mutually exclusive per component. A component that fails
/// because one of its dependencies failed is `Dependency`, regardless of why
/// the dependency itself failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildErrorKind {
    /// The target could not be resolved to a constructor.
    Import,
    /// The constructor returned an error or panicked.
    Instantiation,
    /// A referenced dependency ended in error.
    Dependency,
    /// The component was reached again while it was still being resolved.
    Circular,
    /// Anything else escaping the resolution logic.
    Unknown,
}

impl fmt::Display for BuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildErrorKind::Import => "import",
            BuildErrorKind::Instantiation => "instantiation",
            BuildErrorKind::Dependency => "dependency",
            BuildErrorKind::Circular => "circular",
            BuildErrorKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A component that failed to build during a build pass.
///
/// Once recorded, a `BuildError` is final for that component within the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{id}: {kind} - {detail}")]
pub struct BuildError {
    pub id: String,
    pub kind: BuildErrorKind,
    pub detail: String,
}

impl BuildError {
    pub fn new(id: impl Into<String>, kind: BuildErrorKind, detail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            detail: detail.into(),
        }
    }

    pub fn import(id: &str, detail: impl Into<String>) -> Self {
        Self::new(id, BuildErrorKind::Import, detail)
    }

    pub fn instantiation(id: &str, detail: impl Into<String>) -> Self {
        Self::new(id, BuildErrorKind::Instantiation, detail)
    }

    /// `id` failed because `dependency` did.
    pub fn dependency(id: &str, dependency: &str) -> Self {
        Self::new(
            id,
            BuildErrorKind::Dependency,
            format!("Dependency {} failed to build", dependency),
        )
    }

    pub fn circular(id: &str) -> Self {
        Self::new(
            id,
            BuildErrorKind::Circular,
            format!("Circular dependency detected for object: {}", id),
        )
    }

    pub fn unknown(id: &str, detail: impl Into<String>) -> Self {
        Self::new(id, BuildErrorKind::Unknown, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_report_line() {
        let err = BuildError::dependency("laser_488", "daq");
        assert_eq!(
            err.to_string(),
            "laser_488: dependency - Dependency daq failed to build"
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let err = BuildError::circular("a");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "circular");
        assert_eq!(json["id"], "a");
    }
}
