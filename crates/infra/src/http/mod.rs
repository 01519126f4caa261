//! HTTP plumbing shared by the token provider and the backend transport

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
