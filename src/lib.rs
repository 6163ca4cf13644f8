// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod build;      // dependency-resolving build pass
pub mod config;     // specs, loaders, validation + registry
pub mod devices;    // simulated hardware
pub mod errors;     // error handling
pub mod instrument; // orchestration over build results
pub mod observability;
pub mod traits;     // component + device abstractions
