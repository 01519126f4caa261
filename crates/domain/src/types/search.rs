//! Search request bodies for paged endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::GLOBAL_SEARCH_SIZE;

/// Paging descriptor embedded in every paged search body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page_number: u32,
    pub page_size: u32,
}

/// One filter criterion, e.g. `{"fieldName": "targetGroupCode", "values": ["6.6"]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    #[serde(default)]
    pub custom_filter: String,
    pub field_name: String,
    pub values: Vec<Value>,
}

impl SearchFilter {
    pub fn new<I, V>(field_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            custom_filter: String::new(),
            field_name: field_name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortField {
    pub field_name: String,
    pub ascending: bool,
}

impl SortField {
    pub fn ascending(field_name: impl Into<String>) -> Self {
        Self { field_name: field_name.into(), ascending: true }
    }

    pub fn descending(field_name: impl Into<String>) -> Self {
        Self { field_name: field_name.into(), ascending: false }
    }
}

/// Request template for a paged search.
///
/// The paginator mutates `paging.page_number` in place between requests;
/// everything else is sent unchanged on every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub filters: Vec<SearchFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    pub paging: Paging,
}

impl SearchRequest {
    /// Empty template starting at page 0.
    pub const fn new(page_size: u32) -> Self {
        Self {
            columns: None,
            filters: Vec::new(),
            sort: Vec::new(),
            term: None,
            paging: Paging { page_number: 0, page_size },
        }
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Vec<SearchFilter>) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Vec<SortField>) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }
}

/// Body for the cross-entity `search` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSearchRequest {
    pub term: String,
    pub size: u32,
    pub skip: u32,
    pub allowed_categories: Vec<String>,
    pub parent_id: Option<String>,
    pub is_active: bool,
    pub has_user_id: Option<bool>,
    pub is_phone_numbers_only: Option<bool>,
    pub include_internal_users: bool,
}

impl GlobalSearchRequest {
    /// Active records matching `term` in the given categories.
    pub fn new<I, S>(term: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            term: term.into(),
            size: GLOBAL_SEARCH_SIZE,
            skip: 0,
            allowed_categories: categories.into_iter().map(Into::into).collect(),
            parent_id: None,
            is_active: true,
            has_user_id: None,
            is_phone_numbers_only: None,
            include_internal_users: false,
        }
    }
}
