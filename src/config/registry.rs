// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::build::InitArgs;
use crate::config::validation::is_well_formed_target;
use crate::errors::{ConstructError, ImportError};
use crate::traits::{Component, Constructor, TypeRegistry};
use std::collections::HashMap;
use std::sync::Arc;

/// Map-backed target registry.
///
/// # Examples
///
/// ```
/// use voxel_build::config::Registry;
/// use voxel_build::traits::TypeRegistry;
///
/// let registry = Registry::with_simulated_devices();
/// assert!(registry.contains("simulated.Camera"));
/// assert!(registry.resolve("simulated.Teleporter").is_err());
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    constructors: HashMap<String, Constructor>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the simulated device set
    pub fn with_simulated_devices() -> Self {
        let mut registry = Self::new();
        crate::devices::register_simulated_devices(&mut registry);
        registry
    }

    /// Register a constructor under `target`, replacing any previous one
    pub fn register<F>(&mut self, target: &str, constructor: F) -> &mut Self
    where
        F: Fn(InitArgs) -> Result<Box<dyn Component>, ConstructError> + Send + Sync + 'static,
    {
        self.constructors
            .insert(target.to_string(), Arc::new(constructor));
        self
    }

    /// Check if a target is registered
    pub fn contains(&self, target: &str) -> bool {
        self.constructors.contains_key(target)
    }

    /// All registered targets, sorted
    pub fn targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        targets.sort_unstable();
        targets
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl TypeRegistry for Registry {
    fn resolve(&self, target: &str) -> Result<Constructor, ImportError> {
        if !is_well_formed_target(target) {
            return Err(ImportError::InvalidTarget {
                target: target.to_string(),
            });
        }

        self.constructors
            .get(target)
            .cloned()
            .ok_or_else(|| ImportError::UnknownTarget {
                target: target.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Probe {
        uid: String,
    }

    impl Component for Probe {
        fn uid(&self) -> &str {
            &self.uid
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn probe_registry() -> Registry {
        let mut registry = Registry::new();
        registry.register("test.Probe", |args| {
            Ok(Box::new(Probe {
                uid: args.uid().to_string(),
            }))
        });
        registry
    }

    #[test]
    fn test_resolve_registered_target() {
        let registry = probe_registry();
        let constructor = registry.resolve("test.Probe").unwrap();

        let component = constructor(InitArgs::for_uid("p1")).unwrap();
        assert_eq!(component.uid(), "p1");
    }

    #[test]
    fn test_unknown_target() {
        let registry = probe_registry();
        assert_eq!(
            registry.resolve("test.Missing").err(),
            Some(ImportError::UnknownTarget {
                target: "test.Missing".into()
            })
        );
    }

    #[test]
    fn test_malformed_target_rejected_before_lookup() {
        let mut registry = probe_registry();
        registry.register("Probe", |args| {
            Ok(Box::new(Probe {
                uid: args.uid().to_string(),
            }))
        });

        assert!(matches!(
            registry.resolve("Probe"),
            Err(ImportError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_simulated_devices_listed() {
        let registry = Registry::with_simulated_devices();
        assert_eq!(
            registry.targets(),
            vec![
                "simulated.Camera",
                "simulated.Daq",
                "simulated.FilterWheel",
                "simulated.Laser",
                "simulated.LinearAxis",
            ]
        );
    }
}
