// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::property_str;
use crate::build::InitArgs;
use crate::config::Value;
use crate::errors::{ConstructError, PropertyError};
use crate::traits::{Component, DiscreteAxis};
use indexmap::IndexMap;
use std::any::Any;
use std::sync::Mutex;

/// Simulated motorised filter wheel.
///
/// Init args: `filters`, a map of filter label to wheel slot (required,
/// non-empty). The wheel homes to the first listed filter.
///
/// Properties: `filter` (label to move to).
pub struct SimulatedFilterWheel {
    uid: String,
    filters: IndexMap<String, usize>,
    current: Mutex<String>,
}

impl SimulatedFilterWheel {
    pub fn new(uid: impl Into<String>, filters: IndexMap<String, usize>) -> Result<Self, ConstructError> {
        let first = filters
            .keys()
            .next()
            .cloned()
            .ok_or_else(|| ConstructError::failed("filter wheel needs at least one filter"))?;
        Ok(Self {
            uid: uid.into(),
            filters,
            current: Mutex::new(first),
        })
    }

    pub fn from_args(args: &InitArgs) -> Result<Self, ConstructError> {
        args.expect_only(&["filters"])?;

        let mut filters = IndexMap::new();
        for (label, slot) in args.map("filters")? {
            let slot = slot
                .as_i64()
                .and_then(|s| usize::try_from(s).ok())
                .ok_or_else(|| ConstructError::InvalidArgument {
                    name: format!("filters.{}", label),
                    expected: "non-negative slot number",
                    found: slot.type_name().to_string(),
                })?;
            filters.insert(label.clone(), slot);
        }
        Self::new(args.uid(), filters)
    }

    pub fn filters(&self) -> &IndexMap<String, usize> {
        &self.filters
    }

    fn current_label(&self) -> String {
        match self.current.lock() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Component for SimulatedFilterWheel {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        match name {
            "filter" => self.move_to_label(property_str(name, value)?),
            _ => Err(PropertyError::unknown(name)),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_discrete_axis(&self) -> Option<&dyn DiscreteAxis> {
        Some(self)
    }
}

impl DiscreteAxis for SimulatedFilterWheel {
    fn position(&self) -> usize {
        let label = self.current_label();
        self.filters.get(&label).copied().unwrap_or_default()
    }

    fn label(&self) -> Option<String> {
        Some(self.current_label())
    }

    fn labels(&self) -> Vec<String> {
        self.filters.keys().cloned().collect()
    }

    fn move_to_label(&self, label: &str) -> Result<(), PropertyError> {
        if !self.filters.contains_key(label) {
            return Err(PropertyError::invalid(
                "filter",
                format!("filter '{}' not in {:?}", label, self.labels()),
            ));
        }

        tracing::info!(filter_wheel = %self.uid, filter = label, "setting filter");
        match self.current.lock() {
            Ok(mut current) => *current = label.to_string(),
            Err(poisoned) => *poisoned.into_inner() = label.to_string(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel() -> SimulatedFilterWheel {
        let filters = IndexMap::from([
            ("BP405".to_string(), 0),
            ("BP488".to_string(), 1),
            ("BP561".to_string(), 2),
        ]);
        SimulatedFilterWheel::new("fw0", filters).unwrap()
    }

    #[test]
    fn test_homes_to_first_filter() {
        let wheel = wheel();
        assert_eq!(wheel.label().as_deref(), Some("BP405"));
        assert_eq!(wheel.position(), 0);
    }

    #[test]
    fn test_move_to_label() {
        let wheel = wheel();

        wheel.move_to_label("BP561").unwrap();
        assert_eq!(wheel.position(), 2);
        assert!(wheel.move_to_label("BP999").is_err());
        assert_eq!(wheel.label().as_deref(), Some("BP561"));
    }

    #[test]
    fn test_filter_property() {
        let mut wheel = wheel();
        wheel.set_property("filter", &Value::from("BP488")).unwrap();
        assert_eq!(wheel.position(), 1);
    }

    #[test]
    fn test_wheels_do_not_share_filter_lists() {
        let a = wheel();
        let b = SimulatedFilterWheel::new("fw1", IndexMap::from([("LP638".to_string(), 0)])).unwrap();

        assert_eq!(b.labels(), vec!["LP638"]);
        assert!(b.move_to_label("BP488").is_err());
        assert_eq!(a.labels().len(), 3);
    }

    #[test]
    fn test_from_args() {
        let mut map = InitArgs::for_uid("fw0").into_inner();
        let mut filters = IndexMap::new();
        filters.insert("BP405".to_string(), Value::Int(0));
        filters.insert("BP488".to_string(), Value::Int(1));
        map.insert("filters".into(), Value::from(filters));

        let wheel = SimulatedFilterWheel::from_args(&InitArgs::new(map)).unwrap();
        assert_eq!(wheel.labels(), vec!["BP405", "BP488"]);
    }

    #[test]
    fn test_empty_filters_rejected() {
        assert!(SimulatedFilterWheel::new("fw0", IndexMap::new()).is_err());
    }
}
