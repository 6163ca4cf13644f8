// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for target resolution, component construction and property assignment.

use thiserror::Error;

/// A target name could not be resolved to a constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Target names must look like `namespace.TypeName`.
    #[error("Invalid target '{target}': expected 'namespace.TypeName'")]
    InvalidTarget { target: String },

    /// Nothing is registered under this target name.
    #[error("No component registered for target '{target}'")]
    UnknownTarget { target: String },
}

/// A constructor rejected its arguments or failed to bring the component up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructError {
    #[error("missing required argument '{name}'")]
    MissingArgument { name: String },

    #[error("argument '{name}' expected {expected}, found {found}")]
    InvalidArgument {
        name: String,
        expected: &'static str,
        found: String,
    },

    #[error("unexpected argument '{name}'")]
    UnexpectedArgument { name: String },

    #[error("{0}")]
    Failed(String),
}

impl ConstructError {
    pub fn failed(reason: impl Into<String>) -> Self {
        ConstructError::Failed(reason.into())
    }
}

/// A post-construction property assignment was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    #[error("unknown property '{name}'")]
    Unknown { name: String },

    #[error("invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("property '{name}' is read-only")]
    ReadOnly { name: String },
}

impl PropertyError {
    pub fn unknown(name: &str) -> Self {
        PropertyError::Unknown {
            name: name.to_string(),
        }
    }

    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        PropertyError::InvalidValue {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
