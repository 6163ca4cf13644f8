// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resolved constructor arguments handed to a registered constructor.

use crate::config::consts::UID_ARG;
use crate::config::Value;
use crate::errors::ConstructError;
use crate::traits::Instance;
use indexmap::IndexMap;

/// Keyword arguments for one constructor call.
///
/// Dependencies have already been substituted: a field that named another
/// component now holds `Value::Instance`. The component's own id is always
/// present under `uid`.
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    args: IndexMap<String, Value>,
}

impl InitArgs {
    pub fn new(args: IndexMap<String, Value>) -> Self {
        Self { args }
    }

    /// Arguments holding nothing but a `uid`.
    pub fn for_uid(uid: &str) -> Self {
        let mut args = IndexMap::new();
        args.insert(UID_ARG.to_string(), Value::from(uid));
        Self { args }
    }

    /// The component's id, or an empty string when built outside a group.
    pub fn uid(&self) -> &str {
        self.args
            .get(UID_ARG)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.args
    }

    pub fn require(&self, name: &str) -> Result<&Value, ConstructError> {
        self.args
            .get(name)
            .ok_or_else(|| ConstructError::MissingArgument {
                name: name.to_string(),
            })
    }

    /// Reject any argument not in `allowed`. `uid` is always allowed.
    pub fn expect_only(&self, allowed: &[&str]) -> Result<(), ConstructError> {
        match self
            .names()
            .find(|name| *name != UID_ARG && !allowed.contains(name))
        {
            Some(name) => Err(ConstructError::UnexpectedArgument {
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn str(&self, name: &str) -> Result<&str, ConstructError> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| invalid(name, "string", value))
    }

    pub fn f64(&self, name: &str) -> Result<f64, ConstructError> {
        let value = self.require(name)?;
        value.as_f64().ok_or_else(|| invalid(name, "number", value))
    }

    pub fn i64(&self, name: &str) -> Result<i64, ConstructError> {
        let value = self.require(name)?;
        value.as_i64().ok_or_else(|| invalid(name, "integer", value))
    }

    pub fn bool(&self, name: &str) -> Result<bool, ConstructError> {
        let value = self.require(name)?;
        value.as_bool().ok_or_else(|| invalid(name, "bool", value))
    }

    pub fn list(&self, name: &str) -> Result<&[Value], ConstructError> {
        let value = self.require(name)?;
        value.as_list().ok_or_else(|| invalid(name, "list", value))
    }

    pub fn map(&self, name: &str) -> Result<&IndexMap<String, Value>, ConstructError> {
        let value = self.require(name)?;
        value.as_map().ok_or_else(|| invalid(name, "map", value))
    }

    /// A dependency substituted by the builder.
    pub fn instance(&self, name: &str) -> Result<Instance, ConstructError> {
        let value = self.require(name)?;
        value
            .as_instance()
            .cloned()
            .ok_or_else(|| invalid(name, "component", value))
    }

    pub fn optional_str(&self, name: &str) -> Result<Option<&str>, ConstructError> {
        self.optional(name, |args| args.str(name))
    }

    pub fn optional_f64(&self, name: &str) -> Result<Option<f64>, ConstructError> {
        self.optional(name, |args| args.f64(name))
    }

    pub fn optional_i64(&self, name: &str) -> Result<Option<i64>, ConstructError> {
        self.optional(name, |args| args.i64(name))
    }

    pub fn optional_instance(&self, name: &str) -> Result<Option<Instance>, ConstructError> {
        self.optional(name, |args| args.instance(name))
    }

    /// Absent and explicit `null` both read as `None`.
    fn optional<'a, T>(
        &'a self,
        name: &str,
        read: impl FnOnce(&'a Self) -> Result<T, ConstructError>,
    ) -> Result<Option<T>, ConstructError> {
        match self.args.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => read(self).map(Some),
        }
    }
}

fn invalid(name: &str, expected: &'static str, found: &Value) -> ConstructError {
    ConstructError::InvalidArgument {
        name: name.to_string(),
        expected,
        found: found.type_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, Value)]) -> InitArgs {
        InitArgs::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_typed_accessors() {
        let a = args(&[
            ("uid", Value::from("laser")),
            ("wavelength_nm", Value::Int(488)),
            ("power", Value::Float(12.5)),
            ("port", Value::from("COM3")),
        ]);

        assert_eq!(a.uid(), "laser");
        assert_eq!(a.i64("wavelength_nm"), Ok(488));
        assert_eq!(a.f64("wavelength_nm"), Ok(488.0));
        assert_eq!(a.f64("power"), Ok(12.5));
        assert_eq!(a.str("port"), Ok("COM3"));
    }

    #[test]
    fn test_missing_and_mistyped() {
        let a = args(&[("port", Value::Int(3))]);

        assert_eq!(
            a.str("missing"),
            Err(ConstructError::MissingArgument { name: "missing".into() })
        );
        assert_eq!(
            a.str("port"),
            Err(ConstructError::InvalidArgument {
                name: "port".into(),
                expected: "string",
                found: "integer".into(),
            })
        );
    }

    #[test]
    fn test_unresolved_reference_is_not_an_instance() {
        let a = args(&[("daq", Value::from("daq"))]);
        assert!(matches!(
            a.instance("daq"),
            Err(ConstructError::InvalidArgument { expected: "component", .. })
        ));
    }

    #[test]
    fn test_optional_treats_null_as_absent() {
        let a = args(&[("exposure", Value::Null), ("gain", Value::Float(1.5))]);

        assert_eq!(a.optional_f64("exposure"), Ok(None));
        assert_eq!(a.optional_f64("absent"), Ok(None));
        assert_eq!(a.optional_f64("gain"), Ok(Some(1.5)));
    }

    #[test]
    fn test_expect_only() {
        let a = args(&[("uid", Value::from("x")), ("port", Value::from("COM3"))]);

        assert!(a.expect_only(&["port"]).is_ok());
        assert_eq!(
            a.expect_only(&[]),
            Err(ConstructError::UnexpectedArgument { name: "port".into() })
        );
    }

    #[test]
    fn test_uid_defaults_to_empty() {
        assert_eq!(InitArgs::default().uid(), "");
        assert_eq!(InitArgs::for_uid("cam").uid(), "cam");
    }
}
