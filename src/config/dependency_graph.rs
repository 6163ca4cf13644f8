// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::references::{scan_references, Reference, ReferenceKind};
use crate::config::BuildGroupSpec;
use indexmap::IndexMap;

/// Newtype wrapper mapping each component to the references its `init` holds.
///
/// Edges point from a component to the components it needs built first.
/// Explicit references to missing ids are kept as edges; everything else in
/// the graph is a key of the source group.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph(pub IndexMap<String, Vec<Reference>>);

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Scan every component of a group for references
    pub fn from_specs(specs: &BuildGroupSpec) -> Self {
        Self(
            specs
                .iter()
                .map(|(id, spec)| (id.clone(), scan_references(id, &spec.init, specs)))
                .collect(),
        )
    }

    /// Ids `component_id` depends on
    pub fn dependencies_of(&self, component_id: &str) -> impl Iterator<Item = &str> {
        self.0
            .get(component_id)
            .into_iter()
            .flatten()
            .map(|r| r.id.as_str())
    }

    /// Ids that depend on `component_id`
    pub fn dependents_of<'a>(&'a self, component_id: &'a str) -> impl Iterator<Item = &'a str> {
        self.0
            .iter()
            .filter(move |(_, refs)| refs.iter().any(|r| r.id == component_id))
            .map(|(id, _)| id.as_str())
    }

    /// Components with no dependencies
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, refs)| refs.is_empty())
            .map(|(id, _)| id.as_str())
    }

    /// `(owner, referenced id)` pairs inferred from plain strings rather than `!ref`
    pub fn implicit_references(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(owner, refs)| {
            refs.iter()
                .filter(|r| r.kind == ReferenceKind::Implicit)
                .map(move |r| (owner.as_str(), r.id.as_str()))
        })
    }

    /// Get all component IDs in the graph
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComponentSpec, Value};

    fn sample() -> BuildGroupSpec {
        BuildGroupSpec::from([
            ("daq".to_string(), ComponentSpec::new("simulated.Daq")),
            (
                "camera".to_string(),
                ComponentSpec::new("simulated.Camera").with_init("trigger_source", "daq"),
            ),
            (
                "laser".to_string(),
                ComponentSpec::new("simulated.Laser")
                    .with_init("modulation_source", Value::reference("daq")),
            ),
        ])
    }

    #[test]
    fn test_edges_and_roots() {
        let graph = DependencyGraph::from_specs(&sample());

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.dependencies_of("camera").collect::<Vec<_>>(), vec!["daq"]);
        assert_eq!(graph.dependencies_of("daq").count(), 0);
        assert_eq!(graph.dependents_of("daq").collect::<Vec<_>>(), vec!["camera", "laser"]);
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec!["daq"]);
    }

    #[test]
    fn test_implicit_references_listed() {
        let graph = DependencyGraph::from_specs(&sample());
        assert_eq!(
            graph.implicit_references().collect::<Vec<_>>(),
            vec![("camera", "daq")]
        );
    }

    #[test]
    fn test_unknown_component_has_no_dependencies() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.dependencies_of("ghost").count(), 0);
    }
}
