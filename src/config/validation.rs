// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Static validation of a component group before it is built.
//!
//! Building never requires validation: the builder records cycles and missing
//! references as per-component errors. Validating first gives a complete
//! report up front, with the full path of any cycle, instead of one
//! `circular`/`dependency` error per affected component.
//!
//! # Validation Pipeline
//!
//! 1. **Target Validation**: every target looks like `namespace.TypeName`
//! 2. **Reference Validation**: every `!ref` points at a component in the group
//! 3. **Cycle Detection**: DFS over the reference graph
//!
//! Cycle detection runs only when reference validation passes, since a
//! dangling edge has nowhere to go.
//!
//! ## Cycle Detection Algorithm
//! Uses **Depth-First Search (DFS) with recursion stack**:
//! - **Time Complexity**: O(V + E) where V = components, E = references
//! - **Space Complexity**: O(V) for visited set and recursion stack
//! - **Advantage**: Provides the actual cycle path for debugging
//!
//! # Example
//! ```rust
//! use voxel_build::config::{validate_build_group, BuildGroupSpec, ComponentSpec};
//! use voxel_build::errors::ValidationError;
//!
//! let mut specs = BuildGroupSpec::new();
//! specs.insert("a".into(), ComponentSpec::new("test.Widget").with_init("dep", "b"));
//! specs.insert("b".into(), ComponentSpec::new("test.Widget").with_init("dep", "a"));
//!
//! let errors = validate_build_group(&specs).unwrap_err();
//! assert_eq!(
//!     errors,
//!     vec![ValidationError::CyclicDependency {
//!         cycle: vec!["a".into(), "b".into(), "a".into()],
//!     }]
//! );
//! ```

use crate::config::consts::TARGET_SEPARATOR;
use crate::config::{BuildGroupSpec, DependencyGraph};
use crate::errors::ValidationError;
use crate::observability::messages::validation::{
    CyclicDependencyDetected, DanglingReference, ImplicitReferenceFound, MalformedTarget,
};
use crate::observability::messages::StructuredLog;
use std::collections::HashSet;

/// Validates a component group's targets and reference graph.
///
/// # Returns
///
/// * `Ok(())` - Every target is well-formed, every explicit reference
///   resolves and the graph is acyclic
/// * `Err(Vec<ValidationError>)` - Every problem found
///
/// Plain-string references are reported at debug level but never rejected.
pub fn validate_build_group(specs: &BuildGroupSpec) -> Result<(), Vec<ValidationError>> {
    let graph = DependencyGraph::from_specs(specs);
    let mut errors = Vec::new();

    for (owner, referenced) in graph.implicit_references() {
        ImplicitReferenceFound {
            component_id: owner,
            referenced_id: referenced,
        }
        .log();
    }

    if let Err(target_errors) = validate_targets(specs) {
        errors.extend(target_errors);
    }

    let mut references_ok = true;
    if let Err(reference_errors) = validate_references(specs, &graph) {
        references_ok = false;
        errors.extend(reference_errors);
    }

    if references_ok {
        if let Err(cycle_errors) = validate_acyclic_graph(&graph) {
            errors.extend(cycle_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `namespace.TypeName`, both parts non-empty.
pub fn is_well_formed_target(target: &str) -> bool {
    match target.rsplit_once(TARGET_SEPARATOR) {
        Some((namespace, name)) => {
            !namespace.is_empty()
                && !name.is_empty()
                && !target.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn validate_targets(specs: &BuildGroupSpec) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = specs
        .iter()
        .filter(|(_, spec)| !is_well_formed_target(&spec.target))
        .map(|(id, spec)| {
            MalformedTarget {
                component_id: id,
                target: &spec.target,
            }
            .log();
            ValidationError::MalformedTarget {
                component_id: id.clone(),
                target: spec.target.clone(),
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_references(
    specs: &BuildGroupSpec,
    graph: &DependencyGraph,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for component_id in graph.keys() {
        for dependency in graph.dependencies_of(component_id) {
            if !specs.contains_key(dependency) {
                DanglingReference {
                    component_id,
                    missing_reference: dependency,
                }
                .log();
                errors.push(ValidationError::DanglingReference {
                    component_id: component_id.clone(),
                    missing_reference: dependency.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects a cycle using the "three colors" DFS approach.
///
/// Gray nodes are those on the current recursion stack; reaching a gray node
/// again closes a cycle. Only the first cycle found is reported.
fn validate_acyclic_graph(graph: &DependencyGraph) -> Result<(), Vec<ValidationError>> {
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for component_id in graph.keys() {
        if !visited.contains(component_id.as_str()) {
            if let Some(cycle) =
                dfs_cycle_detection(component_id, graph, &mut visited, &mut rec_stack, &mut path)
            {
                let cycle_refs: Vec<&str> = cycle.iter().map(String::as_str).collect();
                CyclicDependencyDetected { cycle: &cycle_refs }.log();
                return Err(vec![ValidationError::CyclicDependency { cycle }]);
            }
        }
    }

    Ok(())
}

/// Depth-first search with path tracking.
///
/// For graph A → B → C → A the returned cycle is `[A, B, C, A]`.
fn dfs_cycle_detection(
    node: &str,
    graph: &DependencyGraph,
    visited: &mut HashSet<String>,
    rec_stack: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> Option<Vec<String>> {
    visited.insert(node.to_string());
    rec_stack.insert(node.to_string());
    path.push(node.to_string());

    for neighbor in graph.dependencies_of(node) {
        if !visited.contains(neighbor) {
            if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path) {
                return Some(cycle);
            }
        } else if rec_stack.contains(neighbor) {
            if let Some(cycle_start) = path.iter().position(|x| x == neighbor) {
                let mut cycle = path[cycle_start..].to_vec();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComponentSpec, Value};

    fn component(id: &str, refs: Vec<&str>) -> (String, ComponentSpec) {
        let mut spec = ComponentSpec::new("test.Widget");
        for (i, r) in refs.into_iter().enumerate() {
            spec = spec.with_init(format!("dep{}", i), r);
        }
        (id.to_string(), spec)
    }

    fn group(components: Vec<(String, ComponentSpec)>) -> BuildGroupSpec {
        components.into_iter().collect()
    }

    #[test]
    fn test_valid_empty_group() {
        assert!(validate_build_group(&BuildGroupSpec::new()).is_ok());
    }

    #[test]
    fn test_valid_diamond() {
        let specs = group(vec![
            component("a", vec![]),
            component("b", vec!["a"]),
            component("c", vec!["a"]),
            component("d", vec!["b", "c"]),
        ]);

        assert!(validate_build_group(&specs).is_ok());
    }

    #[test]
    fn test_literal_string_not_matching_any_id_is_fine() {
        let specs = group(vec![component("a", vec!["missing_id"])]);
        assert!(validate_build_group(&specs).is_ok());
    }

    #[test]
    fn test_dangling_explicit_reference() {
        let mut specs = group(vec![component("a", vec![])]);
        specs.insert(
            "b".into(),
            ComponentSpec::new("test.Widget").with_init("dep", Value::reference("nonexistent")),
        );

        let errors = validate_build_group(&specs).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DanglingReference {
                component_id: "b".into(),
                missing_reference: "nonexistent".into(),
            }]
        );
    }

    #[test]
    fn test_simple_cycle_path() {
        let specs = group(vec![component("a", vec!["b"]), component("b", vec!["a"])]);

        let errors = validate_build_group(&specs).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec!["a".into(), "b".into(), "a".into()],
            }]
        );
    }

    #[test]
    fn test_explicit_self_reference_is_a_cycle() {
        let specs = BuildGroupSpec::from([(
            "a".to_string(),
            ComponentSpec::new("test.Widget").with_init("me", Value::reference("a")),
        )]);

        let errors = validate_build_group(&specs).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec!["a".into(), "a".into()],
            }]
        );
    }

    #[test]
    fn test_complex_cycle_reports_inner_loop() {
        let specs = group(vec![
            component("a", vec!["b"]),
            component("b", vec!["c"]),
            component("c", vec!["d"]),
            component("d", vec!["b"]),
        ]);

        let errors = validate_build_group(&specs).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec!["b".into(), "c".into(), "d".into(), "b".into()],
            }]
        );
    }

    #[test]
    fn test_malformed_targets() {
        assert!(is_well_formed_target("simulated.Camera"));
        assert!(is_well_formed_target("voxel.devices.laser.SimulatedLaser"));
        assert!(!is_well_formed_target("Camera"));
        assert!(!is_well_formed_target(".Camera"));
        assert!(!is_well_formed_target("simulated."));
        assert!(!is_well_formed_target("simulated. Camera"));
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let specs = BuildGroupSpec::from([
            ("a".to_string(), ComponentSpec::new("NoNamespace")),
            (
                "b".to_string(),
                ComponentSpec::new("test.Widget").with_init("dep", Value::reference("missing")),
            ),
        ]);

        let errors = validate_build_group(&specs).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::MalformedTarget { .. }));
        assert!(matches!(errors[1], ValidationError::DanglingReference { .. }));
    }
}
