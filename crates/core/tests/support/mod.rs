//! Shared test helpers for `momentum-core` integration tests.
//!
//! Provides an in-memory [`BackendTransport`] so that client behaviour can be
//! exercised without a network.

pub mod transport;

#[allow(unused_imports)]
pub use transport::{paged_backend, RecordedRequest, ScriptedTransport, SignalStyle};
