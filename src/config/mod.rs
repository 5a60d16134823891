//! Safety Configuration Module
//!
//! Provides per-site configuration loaded from TOML files, replacing all
//! hardcoded rule and scoring thresholds with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `SURAKSHA_CONFIG` environment variable (path to TOML file)
//! 2. `safety_config.toml` in the current working directory
//! 3. Built-in defaults (matching the reference deployment values)
//!
//! The loaded config is passed by reference to the components that need it
//! (see [`crate::pipeline::RiskPipeline::new`]); there is no ambient global.

mod safety_config;

pub use safety_config::*;
