//! Company and production-unit client

use std::sync::Arc;

use momentum_domain::constants::{
    ALL_SEARCH_CATEGORIES, PRODUCTION_UNIT_MAX_PAGES, PRODUCTION_UNIT_PAGE_SIZE,
};
use momentum_domain::{ContactQuery, GlobalSearchRequest, Result, SearchFilter, SearchRequest};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::pagination::{collect_pages, has_more, PagedEndpoint};
use crate::paths::{encode_id, require_digits};
use crate::ports::BackendTransport;

const PRODUCTION_UNIT_SEARCH: PagedEndpoint<'static> =
    PagedEndpoint::new("punits/searchproductionunits", PRODUCTION_UNIT_MAX_PAGES);

#[derive(Serialize)]
struct TermSearch<'a> {
    term: &'a str,
    filters: &'a [SearchFilter],
}

/// Which listing to read from a production unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitListing {
    ContactPersons,
    Caseworkers,
}

impl UnitListing {
    const fn segment(self) -> &'static str {
        match self {
            Self::ContactPersons => "contactpersons",
            Self::Caseworkers => "caseworkers",
        }
    }
}

/// Companies (CVR), production units (P-number) and their contacts.
#[derive(Clone)]
pub struct CompaniesClient {
    transport: Arc<dyn BackendTransport>,
}

impl CompaniesClient {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    /// All production units matching `filters` and `term` (`*` for all).
    #[instrument(skip(self, filters), fields(filter_count = filters.len()))]
    pub async fn search_production_units(
        &self,
        filters: Vec<SearchFilter>,
        term: &str,
    ) -> Result<Vec<Value>> {
        let mut template =
            SearchRequest::new(PRODUCTION_UNIT_PAGE_SIZE).with_filters(filters).with_term(term);
        let units = collect_pages(
            self.transport.as_ref(),
            PRODUCTION_UNIT_SEARCH,
            &mut template,
            None,
            has_more("hasMore"),
        )
        .await?;
        info!(count = units.len(), "production unit search complete");
        Ok(units)
    }

    /// Company by CVR number.
    #[instrument(skip(self))]
    pub async fn company_by_cvr(&self, cvr: &str) -> Result<Option<Value>> {
        let cvr = require_digits("CVR number", cvr, 8)?;
        self.transport.get(&format!("companies/{cvr}")).await?.into_optional()
    }

    /// Production unit by CVR and P-number.
    #[instrument(skip(self))]
    pub async fn production_unit(&self, cvr: &str, p_number: &str) -> Result<Option<Value>> {
        let cvr = require_digits("CVR number", cvr, 8)?;
        let p_number = require_digits("P-number", p_number, 10)?;
        self.transport
            .get(&format!("companies/{cvr}/productionunits/{p_number}"))
            .await?
            .into_optional()
    }

    /// Extended production-unit record by internal id.
    #[instrument(skip(self))]
    pub async fn production_unit_details(&self, unit_id: &str) -> Result<Option<Value>> {
        let id = encode_id("production unit id", unit_id)?;
        self.transport.get(&format!("punits/{id}")).await?.into_optional()
    }

    /// Citizens placed in offers at the production unit.
    #[instrument(skip(self, filters))]
    pub async fn citizens_in_placements(
        &self,
        unit_id: &str,
        filters: &[SearchFilter],
        term: &str,
    ) -> Result<Option<Value>> {
        let id = encode_id("production unit id", unit_id)?;
        let body = serde_json::to_value(TermSearch { term, filters })?;
        self.transport
            .post(&format!("placements/productionUnit/{id}/search"), Some(&body))
            .await?
            .into_optional()
    }

    /// Job orders at the production unit. The caller's filters are extended
    /// with a `providerId` filter, not modified.
    #[instrument(skip(self, filters))]
    pub async fn job_orders(
        &self,
        unit_id: &str,
        filters: &[SearchFilter],
        term: &str,
    ) -> Result<Option<Value>> {
        encode_id("production unit id", unit_id)?;
        let mut request_filters = filters.to_vec();
        request_filters.push(SearchFilter::new("providerId", [unit_id.trim()]));

        let body = serde_json::to_value(TermSearch { term, filters: &request_filters })?;
        self.transport.post("companyrecruitmentsearch", Some(&body)).await?.into_optional()
    }

    /// Cross-entity search on a P-number.
    #[instrument(skip(self))]
    pub async fn search_by_p_number(&self, p_number: &str) -> Result<Option<Value>> {
        let p_number = require_digits("P-number", p_number, 10)?;
        let body =
            serde_json::to_value(GlobalSearchRequest::new(p_number, ALL_SEARCH_CATEGORIES.iter().copied()))?;
        self.transport.post("search", Some(&body)).await?.into_optional()
    }

    /// Contact persons registered on the production unit.
    pub async fn contact_persons(&self, unit_id: &str, query: &ContactQuery) -> Result<Option<Value>> {
        self.unit_listing(unit_id, UnitListing::ContactPersons, query).await
    }

    /// Caseworkers attached to the production unit.
    pub async fn caseworkers(&self, unit_id: &str, query: &ContactQuery) -> Result<Option<Value>> {
        self.unit_listing(unit_id, UnitListing::Caseworkers, query).await
    }

    #[instrument(skip(self, query, listing), fields(listing = listing.segment()))]
    async fn unit_listing(
        &self,
        unit_id: &str,
        listing: UnitListing,
        query: &ContactQuery,
    ) -> Result<Option<Value>> {
        let id = encode_id("production unit id", unit_id)?;
        let path = format!(
            "punits/{id}/{}?&pageNumber={}&pageSize={}",
            listing.segment(),
            query.page_number,
            query.page_size
        );
        let body = serde_json::to_value(query)?;
        self.transport.post(&path, Some(&body)).await?.into_optional()
    }

    /// Activate or deactivate a contact person. `true` when the backend
    /// accepted the change.
    #[instrument(skip(self))]
    pub async fn set_contact_person_status(&self, employee_id: &str, active: bool) -> Result<bool> {
        let id = encode_id("employee id", employee_id)?;
        let response = self.transport.post(&format!("employees/{id}/status/{active}"), None).await?;
        Ok(response.status == 200)
    }
}
