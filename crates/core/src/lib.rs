//! # Momentum Core
//!
//! Pure client logic layer - no HTTP or configuration code.
//!
//! This crate contains:
//! - The backend transport port (trait)
//! - Paginated search aggregation
//! - Responsible-actor reconciliation
//! - Per-entity clients (citizens, companies, tags, tasks, taxonomies, journals)
//!
//! ## Architecture Principles
//! - Only depends on `momentum-domain`
//! - All backend access goes through [`BackendTransport`]
//! - Status interpretation (404 as absence) lives here, not in the transport
//! - Pure, testable logic: reconciliation needs no network at all

pub mod citizens;
pub mod companies;
pub mod journals;
pub mod pagination;
pub mod paths;
pub mod ports;
pub mod tags;
pub mod tasks;
pub mod taxonomies;

// Re-export specific items to avoid ambiguity
pub use citizens::{reconcile, CitizensClient};
pub use companies::CompaniesClient;
pub use journals::JournalsClient;
pub use pagination::{collect_pages, has_more, total_count, PageSignal, PagedEndpoint};
pub use ports::{BackendResponse, BackendTransport};
pub use tags::TagsClient;
pub use tasks::TasksClient;
pub use taxonomies::TaxonomiesClient;
