// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration value tree for component constructor arguments and defaults.
//!
//! Values are parsed from any self-describing format through `serde_yaml::Value`.
//! Two spellings mark an explicit reference to another component:
//!
//! ```yaml
//! camera:
//!   target: simulated.Camera
//!   init:
//!     trigger_source: !ref daq          # YAML tag
//!     backup: { "$ref": daq }           # single-key map, works in JSON/TOML too
//! ```
//!
//! A plain string that equals another component's id is also treated as a
//! reference when the group is built.

use crate::config::consts::{REF_KEY, REF_TAG};
use crate::traits::Instance;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Deserialize)]
#[serde(try_from = "serde_yaml::Value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    /// Explicit reference to another component by id.
    Ref(String),
    /// A built component. Only present in resolved constructor arguments.
    Instance(Instance),
}

impl Value {
    pub fn reference(id: impl Into<String>) -> Self {
        Value::Ref(id.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Short name of the variant, used in argument error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Ref(_) => "reference",
            Value::Instance(_) => "component",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Ref(id) => write!(f, "Ref({:?})", id),
            Value::Instance(instance) => write!(f, "Instance({:?})", instance.uid()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = String;

    fn try_from(raw: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value as Yaml;

        match raw {
            Yaml::Null => Ok(Value::Null),
            Yaml::Bool(b) => Ok(Value::Bool(b)),
            Yaml::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(format!("unrepresentable number: {}", n))
                }
            }
            Yaml::String(s) => Ok(Value::String(s)),
            Yaml::Sequence(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Yaml::Mapping(mapping) => {
                let mut map = IndexMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    map.insert(map_key(key)?, Value::try_from(value)?);
                }
                if map.len() == 1 {
                    if let Some(Value::String(id)) = map.get(REF_KEY) {
                        return Ok(Value::Ref(id.clone()));
                    }
                }
                Ok(Value::Map(map))
            }
            Yaml::Tagged(tagged) => {
                if tagged.tag == REF_TAG {
                    match tagged.value {
                        Yaml::String(id) => Ok(Value::Ref(id)),
                        other => Err(format!("!{} expects a component id, found {:?}", REF_TAG, other)),
                    }
                } else {
                    Err(format!("unsupported tag {}", tagged.tag))
                }
            }
        }
    }
}

/// Scalar keys are stringified; structured keys are rejected.
fn map_key(key: serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        other => Err(format!("unsupported map key: {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_scalars_and_nesting() {
        let value = parse("{ a: 1, b: 2.5, c: [x, true, null] }");
        let map = value.as_map().unwrap();
        assert_eq!(map["a"], Value::Int(1));
        assert_eq!(map["b"], Value::Float(2.5));
        assert_eq!(
            map["c"],
            Value::List(vec!["x".into(), Value::Bool(true), Value::Null])
        );
    }

    #[test]
    fn test_ref_tag() {
        assert_eq!(parse("!ref daq"), Value::reference("daq"));
    }

    #[test]
    fn test_ref_map_from_json() {
        let value: Value = serde_json::from_str(r#"{"$ref": "daq"}"#).unwrap();
        assert_eq!(value, Value::reference("daq"));
    }

    #[test]
    fn test_ref_key_alongside_other_keys_is_a_plain_map() {
        let value = parse(r#"{ "$ref": daq, other: 1 }"#);
        assert!(value.as_map().is_some());
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let result: Result<Value, _> = serde_yaml::from_str("!env HOME");
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_keys_stringified() {
        let value = parse("{ 0: open, 1: 500LP }");
        let map = value.as_map().unwrap();
        assert_eq!(map["0"], Value::from("open"));
        assert_eq!(map["1"], Value::from("500LP"));
    }

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::from("3").as_f64(), None);
    }
}
