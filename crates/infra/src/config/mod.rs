//! Configuration loading
//!
//! This module loads [`momentum_domain::MomentumConfig`] from environment
//! variables and files.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, candidate_config_paths};
