// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Value;
use crate::errors::PropertyError;
use crate::traits::device::{Axis, Camera, Daq, DiscreteAxis, Laser};
use std::any::Any;
use std::sync::Arc;

/// A built component, shared with whoever consumes the build results.
pub type Instance = Arc<dyn Component>;

/// Anything a build pass can construct.
///
/// Components are configured once through [`Component::set_property`] right
/// after construction, while the builder still holds the only reference.
/// After that they are shared, so devices that change state at runtime use
/// interior mutability.
///
/// The `as_*` hooks let a caller classify built components by capability
/// without knowing their concrete types.
pub trait Component: Any + Send + Sync {
    fn uid(&self) -> &str;

    /// Assign a named property. The default refuses every name.
    fn set_property(&mut self, name: &str, _value: &Value) -> Result<(), PropertyError> {
        Err(PropertyError::unknown(name))
    }

    fn as_any(&self) -> &dyn Any;

    fn as_camera(&self) -> Option<&dyn Camera> {
        None
    }

    fn as_laser(&self) -> Option<&dyn Laser> {
        None
    }

    fn as_axis(&self) -> Option<&dyn Axis> {
        None
    }

    fn as_discrete_axis(&self) -> Option<&dyn DiscreteAxis> {
        None
    }

    fn as_daq(&self) -> Option<&dyn Daq> {
        None
    }
}

impl dyn Component {
    /// Borrow the concrete type behind a built component.
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Component>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
