//! # Momentum Infrastructure
//!
//! Infrastructure implementations of the core transport port.
//!
//! This crate contains:
//! - Configuration loading (environment variables, JSON/TOML files)
//! - HTTP client construction and error mapping
//! - OAuth2 client-credentials token acquisition
//! - The authenticated backend transport
//! - [`MomentumClientManager`], the entry point applications use
//!
//! ## Architecture
//! - Implements traits defined in `momentum-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod manager;
pub mod transport;

// Re-export commonly used items
pub use auth::{AccessTokenProvider, ClientCredentialsTokenProvider, StaticTokenProvider};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use manager::MomentumClientManager;
pub use transport::MomentumHttpTransport;
