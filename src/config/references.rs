// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural dependency discovery over constructor arguments.
//!
//! A component depends on another when its `init` values contain either an
//! explicit reference (`!ref id`) or a plain string that exactly equals another
//! component's id. Only values are scanned, never map keys, and nesting depth is
//! unlimited.
//!
//! Plain-string matching cannot tell a wiring reference from a literal that
//! happens to collide with a sibling's id. Prefer `!ref` for new configs.

use crate::config::{BuildGroupSpec, Value};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// A plain string equal to another component's id.
    Implicit,
    /// A `Value::Ref`.
    Explicit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub id: String,
    pub kind: ReferenceKind,
}

/// Collects the references held by `owner`'s constructor arguments.
///
/// Each id appears once, in first-seen order. An id referenced both ways is
/// reported as `Explicit`. Plain strings equal to `owner` itself are ignored;
/// explicit self-references and explicit references to ids missing from
/// `specs` are kept so the caller can reject them.
pub fn scan_references(
    owner: &str,
    init: &IndexMap<String, Value>,
    specs: &BuildGroupSpec,
) -> Vec<Reference> {
    let mut found: IndexMap<String, ReferenceKind> = IndexMap::new();
    for value in init.values() {
        scan(owner, value, specs, &mut found);
    }
    found
        .into_iter()
        .map(|(id, kind)| Reference { id, kind })
        .collect()
}

fn scan(owner: &str, value: &Value, specs: &BuildGroupSpec, found: &mut IndexMap<String, ReferenceKind>) {
    match value {
        Value::String(s) => {
            if s != owner && specs.contains_key(s.as_str()) {
                found.entry(s.clone()).or_insert(ReferenceKind::Implicit);
            }
        }
        Value::Ref(id) => {
            found.insert(id.clone(), ReferenceKind::Explicit);
        }
        Value::List(items) => {
            for item in items {
                scan(owner, item, specs, found);
            }
        }
        Value::Map(map) => {
            for item in map.values() {
                scan(owner, item, specs, found);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentSpec;

    fn group(ids: &[&str]) -> BuildGroupSpec {
        ids.iter()
            .map(|id| (id.to_string(), ComponentSpec::new("test.Widget")))
            .collect()
    }

    fn ids(refs: &[Reference]) -> Vec<&str> {
        refs.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_nested_strings_match_known_ids() {
        let specs = group(&["a", "daq", "camera"]);
        let init = ComponentSpec::new("test.Widget")
            .with_init("nested", IndexMap::from([("inner".to_string(), Value::from("daq"))]))
            .with_init("list", vec![Value::from("camera"), Value::from("not_an_id")])
            .init;

        let refs = scan_references("a", &init, &specs);
        assert_eq!(ids(&refs), vec!["daq", "camera"]);
        assert!(refs.iter().all(|r| r.kind == ReferenceKind::Implicit));
    }

    #[test]
    fn test_map_keys_are_not_references() {
        let specs = group(&["a", "daq"]);
        let init = ComponentSpec::new("test.Widget")
            .with_init("daq", Value::Int(1))
            .init;

        assert!(scan_references("a", &init, &specs).is_empty());
    }

    #[test]
    fn test_implicit_self_reference_ignored() {
        let specs = group(&["a"]);
        let init = ComponentSpec::new("test.Widget").with_init("name", "a").init;

        assert!(scan_references("a", &init, &specs).is_empty());
    }

    #[test]
    fn test_explicit_references_kept_even_when_dangling() {
        let specs = group(&["a", "daq"]);
        let init = ComponentSpec::new("test.Widget")
            .with_init("x", "daq")
            .with_init("y", Value::reference("daq"))
            .with_init("z", Value::reference("ghost"))
            .init;

        let refs = scan_references("a", &init, &specs);
        assert_eq!(
            refs,
            vec![
                Reference { id: "daq".into(), kind: ReferenceKind::Explicit },
                Reference { id: "ghost".into(), kind: ReferenceKind::Explicit },
            ]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let specs = group(&["a", "b"]);
        let init = ComponentSpec::new("test.Widget")
            .with_init("first", "b")
            .with_init("second", vec![Value::from("b")])
            .init;

        assert_eq!(ids(&scan_references("a", &init, &specs)), vec!["b"]);
    }
}
