// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::build::InitArgs;
use crate::errors::{ConstructError, ImportError};
use crate::traits::Component;
use std::sync::Arc;

/// Builds a component from its resolved constructor arguments.
pub type Constructor =
    Arc<dyn Fn(InitArgs) -> Result<Box<dyn Component>, ConstructError> + Send + Sync>;

/// Resolves a target name to a constructor.
///
/// The builder only ever asks for constructors by name, so tests can swap in
/// a registry of fakes and applications can back this with whatever plugin
/// table they like.
pub trait TypeRegistry {
    fn resolve(&self, target: &str) -> Result<Constructor, ImportError>;
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for &R {
    fn resolve(&self, target: &str) -> Result<Constructor, ImportError> {
        (**self).resolve(target)
    }
}
