// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod dependency_graph;
mod loader;
mod references;
mod registry;
mod validation;
mod value;

pub mod consts;

pub use dependency_graph::DependencyGraph;
pub use loader::{
    load_build_group, load_build_group_and_validate, load_instrument_config,
    load_instrument_config_and_validate, BuildGroupSpec, ComponentSpec, InstrumentConfig,
    InstrumentInfo, ProfileConfig, StageConfig,
};
pub use references::{scan_references, Reference, ReferenceKind};
pub use registry::Registry;
pub use validation::{is_well_formed_target, validate_build_group};
pub use value::Value;
