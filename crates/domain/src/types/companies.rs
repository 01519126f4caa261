//! Company and production-unit request bodies

use serde::{Deserialize, Serialize};

use crate::constants::CONTACT_DEFAULT_PAGE_SIZE;

/// Listing query for contact persons or caseworkers on a production unit.
///
/// Paging is one-based here, unlike the search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactQuery {
    pub search_text: String,
    pub page_number: u32,
    pub page_size: u32,
    pub only_active: bool,
}

impl Default for ContactQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            page_number: 1,
            page_size: CONTACT_DEFAULT_PAGE_SIZE,
            only_active: true,
        }
    }
}
