// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod args;
pub mod context;
#[cfg(test)]
mod integration_tests;

pub use args::InitArgs;
pub use context::{build_object, build_objects, BuildContext, BuildErrors, BuiltObjects, Resolved};
