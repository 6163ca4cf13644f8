// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dependency-resolving build pass over a group of component specs.
//!
//! # Algorithm
//!
//! Depth-first, memoized recursion. For each id:
//!
//! 1. Return the cached outcome if the id is already built or failed
//! 2. If the id is already on the resolution stack, record a `circular` error
//! 3. Push the id onto the stack
//! 4. Discover references in `init` and resolve each of them first
//! 5. Fail with `dependency` if any of them failed
//! 6. Resolve the target through the [`TypeRegistry`] (`import` on failure)
//! 7. Substitute built dependencies into a copy of `init`, inject `uid` and
//!    call the constructor (`instantiation` on error or panic)
//! 8. Apply `defaults` best-effort, logging and skipping failures
//! 9. Store the instance
//! 10. Pop the id off the stack on every exit path
//!
//! Failures never abort the pass. Every id in the group ends up in exactly one
//! of `built` or `errors`.

use crate::build::args::InitArgs;
use crate::config::consts::UID_ARG;
use crate::config::{scan_references, BuildGroupSpec, ComponentSpec, ReferenceKind, Value};
use crate::errors::{BuildError, BuildErrorKind};
use crate::observability::messages::build::{
    BuildAlreadyCompleted, BuildCompleted, BuildStarted, CircularReferenceDetected,
    ComponentBuilt, ComponentFailed, ComponentResolving, ImplicitReferenceResolved,
    PropertyAssignmentFailed,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{Component, Instance, TypeRegistry};
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// Successfully built components, in the order they finished building.
pub type BuiltObjects = IndexMap<String, Instance>;

/// Components that failed, in the order they failed.
pub type BuildErrors = IndexMap<String, BuildError>;

/// Outcome of resolving one component.
#[derive(Clone)]
pub enum Resolved {
    Built(Instance),
    Failed(BuildError),
}

impl Resolved {
    pub fn instance(&self) -> Option<&Instance> {
        match self {
            Resolved::Built(instance) => Some(instance),
            Resolved::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&BuildError> {
        match self {
            Resolved::Built(_) => None,
            Resolved::Failed(error) => Some(error),
        }
    }

    pub fn is_built(&self) -> bool {
        matches!(self, Resolved::Built(_))
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolved::Built(instance) => write!(f, "Built({:?})", instance.uid()),
            Resolved::Failed(error) => f.debug_tuple("Failed").field(error).finish(),
        }
    }
}

/// A dependency turned out to be failed while its dependent's arguments were
/// being substituted.
struct FailedDependency {
    dependency: String,
}

/// Mutable state for one build pass over a fixed spec group.
///
/// Create one per pass. All mutation goes through `&mut self`, so a context
/// cannot be shared between concurrent passes.
pub struct BuildContext<'a, R: TypeRegistry + ?Sized> {
    specs: &'a BuildGroupSpec,
    registry: &'a R,
    built: BuiltObjects,
    errors: BuildErrors,
    in_progress: HashSet<String>,
    done: bool,
}

impl<'a, R: TypeRegistry + ?Sized> BuildContext<'a, R> {
    pub fn new(specs: &'a BuildGroupSpec, registry: &'a R) -> Self {
        Self {
            specs,
            registry,
            built: IndexMap::new(),
            errors: IndexMap::new(),
            in_progress: HashSet::new(),
            done: false,
        }
    }

    /// Resolve every component not yet resolved, in insertion order.
    ///
    /// A second call is a no-op.
    pub fn build(&mut self) {
        if self.done {
            BuildAlreadyCompleted.log();
            return;
        }

        let started = Instant::now();
        let pass = BuildStarted {
            component_count: self.specs.len(),
        };
        let _span = pass.span("build").entered();
        pass.log();

        let specs = self.specs;
        for id in specs.keys() {
            if !self.is_resolved(id) {
                self.resolve(id);
            }
        }
        self.done = true;

        BuildCompleted {
            built: self.built.len(),
            failed: self.errors.len(),
            duration: started.elapsed(),
        }
        .log();
    }

    /// Resolve one component, building its dependencies first.
    ///
    /// Idempotent: a resolved id returns its cached outcome without
    /// constructing anything. An id that is not in the group yields an
    /// `unknown` error that is not recorded.
    pub fn resolve(&mut self, id: &str) -> Resolved {
        if let Some(instance) = self.built.get(id) {
            return Resolved::Built(Arc::clone(instance));
        }
        if let Some(error) = self.errors.get(id) {
            return Resolved::Failed(error.clone());
        }

        let specs = self.specs;
        let spec = match specs.get(id) {
            Some(spec) => spec,
            None => {
                return Resolved::Failed(BuildError::unknown(
                    id,
                    format!("no component named '{}' in this build group", id),
                ))
            }
        };

        if self.in_progress.contains(id) {
            CircularReferenceDetected {
                component_id: id,
                in_progress: self.in_progress.len(),
            }
            .log();
            return self.record_error(BuildError::circular(id));
        }

        let _span = ComponentResolving {
            component_id: id,
            target: &spec.target,
        }
        .span("resolve")
        .entered();

        self.in_progress.insert(id.to_string());
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.build_component(id, spec)));
        self.in_progress.remove(id);

        // A cycle closing on this id has already recorded `circular`; keep it.
        if let Some(error) = self.errors.get(id) {
            return Resolved::Failed(error.clone());
        }

        match outcome {
            Ok(Ok((instance, dependency_count))) => {
                ComponentBuilt {
                    component_id: id,
                    target: &spec.target,
                    dependency_count,
                }
                .log();
                self.built.insert(id.to_string(), Arc::clone(&instance));
                Resolved::Built(instance)
            }
            Ok(Err(error)) => self.record_error(error),
            Err(payload) => self.record_error(BuildError::unknown(
                id,
                format!("panic during resolution: {}", panic_message(payload.as_ref())),
            )),
        }
    }

    pub fn is_resolved(&self, id: &str) -> bool {
        self.built.contains_key(id) || self.errors.contains_key(id)
    }

    pub fn built(&self) -> &BuiltObjects {
        &self.built
    }

    pub fn errors(&self) -> &BuildErrors {
        &self.errors
    }

    /// Ids currently on the resolution stack. Empty between calls.
    pub fn in_progress(&self) -> &HashSet<String> {
        &self.in_progress
    }

    pub fn into_parts(self) -> (BuiltObjects, BuildErrors) {
        (self.built, self.errors)
    }

    fn record_error(&mut self, error: BuildError) -> Resolved {
        ComponentFailed { error: &error }.log();
        self.errors.insert(error.id.clone(), error.clone());
        Resolved::Failed(error)
    }

    /// Steps 4 to 9. Returns the instance and its dependency count.
    fn build_component(
        &mut self,
        id: &str,
        spec: &'a ComponentSpec,
    ) -> Result<(Instance, usize), BuildError> {
        let references = scan_references(id, &spec.init, self.specs);

        for reference in &references {
            if !self.specs.contains_key(reference.id.as_str()) {
                return Err(BuildError::new(
                    id,
                    BuildErrorKind::Dependency,
                    format!("Dependency {} is not defined", reference.id),
                ));
            }
            if reference.kind == ReferenceKind::Implicit {
                ImplicitReferenceResolved {
                    component_id: id,
                    referenced_id: &reference.id,
                }
                .log();
            }

            self.resolve(&reference.id);
            if self.errors.contains_key(reference.id.as_str()) {
                return Err(BuildError::dependency(id, &reference.id));
            }
        }

        let constructor = self
            .registry
            .resolve(&spec.target)
            .map_err(|e| BuildError::import(id, e.to_string()))?;

        let mut resolved_init = IndexMap::with_capacity(spec.init.len() + 1);
        for (name, value) in &spec.init {
            let value = self
                .substitute(value.clone())
                .map_err(|failed| BuildError::dependency(id, &failed.dependency))?;
            resolved_init.insert(name.clone(), value);
        }
        resolved_init.insert(UID_ARG.to_string(), Value::from(id));

        let args = InitArgs::new(resolved_init);
        let mut component = match panic::catch_unwind(AssertUnwindSafe(|| constructor(args))) {
            Ok(Ok(component)) => component,
            Ok(Err(e)) => return Err(BuildError::instantiation(id, e.to_string())),
            Err(payload) => {
                return Err(BuildError::instantiation(
                    id,
                    format!("constructor panicked: {}", panic_message(payload.as_ref())),
                ))
            }
        };

        apply_defaults(id, component.as_mut(), &spec.defaults);

        Ok((Arc::from(component), references.len()))
    }

    /// Replace built component ids with their instances, recursively.
    ///
    /// Strings that match nothing pass through unchanged.
    fn substitute(&self, value: Value) -> Result<Value, FailedDependency> {
        match value {
            Value::String(s) => self.lookup(s, false),
            Value::Ref(id) => self.lookup(id, true),
            Value::List(items) => items
                .into_iter()
                .map(|item| self.substitute(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Value::Map(map) => map
                .into_iter()
                .map(|(k, v)| self.substitute(v).map(|v| (k, v)))
                .collect::<Result<IndexMap<_, _>, _>>()
                .map(Value::Map),
            other => Ok(other),
        }
    }

    fn lookup(&self, id: String, explicit: bool) -> Result<Value, FailedDependency> {
        if let Some(instance) = self.built.get(id.as_str()) {
            return Ok(Value::Instance(Arc::clone(instance)));
        }
        if self.errors.contains_key(id.as_str()) {
            return Err(FailedDependency { dependency: id });
        }
        if explicit {
            Ok(Value::Ref(id))
        } else {
            Ok(Value::String(id))
        }
    }
}

/// Assign each default, logging and skipping the ones that fail.
fn apply_defaults(id: &str, component: &mut dyn Component, defaults: &IndexMap<String, Value>) {
    for (name, value) in defaults {
        let result = panic::catch_unwind(AssertUnwindSafe(|| component.set_property(name, value)));
        let reason = match result {
            Ok(Ok(())) => continue,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => format!("setter panicked: {}", panic_message(payload.as_ref())),
        };
        PropertyAssignmentFailed {
            component_id: id,
            property: name,
            reason: &reason,
        }
        .log();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Build every component in `specs`, dependencies first.
///
/// Never fails as a whole: each id ends up in exactly one of the two maps.
///
/// # Example
/// ```
/// use voxel_build::build::build_objects;
/// use voxel_build::config::{BuildGroupSpec, ComponentSpec, Registry};
///
/// let mut specs = BuildGroupSpec::new();
/// specs.insert("daq".into(), ComponentSpec::new("simulated.Daq"));
/// specs.insert(
///     "camera".into(),
///     ComponentSpec::new("simulated.Camera").with_init("trigger_source", "daq"),
/// );
///
/// let (built, errors) = build_objects(&specs, &Registry::with_simulated_devices());
/// assert!(errors.is_empty());
/// assert_eq!(built.keys().collect::<Vec<_>>(), vec!["daq", "camera"]);
/// ```
pub fn build_objects<R: TypeRegistry + ?Sized>(
    specs: &BuildGroupSpec,
    registry: &R,
) -> (BuiltObjects, BuildErrors) {
    let mut context = BuildContext::new(specs, registry);
    context.build();
    context.into_parts()
}

/// Build a single spec with no dependency resolution.
///
/// `init` is passed as-is, without reference substitution or `uid` injection.
/// Defaults are applied best-effort.
pub fn build_object<R: TypeRegistry + ?Sized>(
    spec: &ComponentSpec,
    registry: &R,
) -> Result<Instance, BuildError> {
    let id = spec.target.as_str();
    let constructor = registry
        .resolve(&spec.target)
        .map_err(|e| BuildError::import(id, e.to_string()))?;

    let args = InitArgs::new(spec.init.clone());
    let mut component = match panic::catch_unwind(AssertUnwindSafe(|| constructor(args))) {
        Ok(Ok(component)) => component,
        Ok(Err(e)) => return Err(BuildError::instantiation(id, e.to_string())),
        Err(payload) => {
            return Err(BuildError::instantiation(
                id,
                format!("constructor panicked: {}", panic_message(payload.as_ref())),
            ))
        }
    };

    apply_defaults(id, component.as_mut(), &spec.defaults);
    Ok(Arc::from(component))
}
