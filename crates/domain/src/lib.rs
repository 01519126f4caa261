//! # Momentum Domain
//!
//! Domain types and models for the Momentum case-management client.
//!
//! This crate contains:
//! - Search and paging request types
//! - Responsible-actor assignment and replacement payload types
//! - Task, tag and notification request bodies
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Responsibility-code tables and other constants
//!
//! ## Architecture
//! - No dependencies on other Momentum crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
