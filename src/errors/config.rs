// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during component group validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A circular reference was detected between components
    CyclicDependency {
        /// The cycle path, closed on the first component
        cycle: Vec<String>,
    },
    /// An explicit reference names a component that doesn't exist
    DanglingReference {
        /// The component holding the reference
        component_id: String,
        /// The referenced id that couldn't be found
        missing_reference: String,
    },
    /// A target name is not of the form `namespace.TypeName`
    MalformedTarget {
        component_id: String,
        target: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CyclicDependency { cycle } => {
                write!(f, "Cyclic dependency detected: {}", cycle.join(" -> "))
            }
            ValidationError::DanglingReference {
                component_id,
                missing_reference,
            } => {
                write!(
                    f,
                    "Component '{}' references '{}' which does not exist",
                    component_id, missing_reference
                )
            }
            ValidationError::MalformedTarget {
                component_id,
                target,
            } => {
                write!(
                    f,
                    "Component '{}' has malformed target '{}'",
                    component_id, target
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors that can occur while loading a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format for {path}: expected .yaml, .yml, .json or .toml")]
    UnsupportedFormat { path: PathBuf },

    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Validation(Vec<ValidationError>),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
