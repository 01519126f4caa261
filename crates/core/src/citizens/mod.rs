//! Citizen lookups and responsible-actor management

pub mod client;
pub mod reconciliation;

pub use client::CitizensClient;
pub use reconciliation::{
    caseworker_responsibility_code, normalize_role, private_contact_code, reconcile,
};
