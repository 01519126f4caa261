//! Citizen client

use std::sync::Arc;

use momentum_domain::constants::{CITIZEN_SEARCH_MAX_PAGES, CITIZEN_SEARCH_PAGE_SIZE};
use momentum_domain::{
    Assignment, GlobalSearchRequest, MomentumError, NewNotification, ResponsibleActorChange,
    ResponsibleActorsUpdate, Result, SearchFilter, SearchRequest,
};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::reconciliation::reconcile;
use crate::pagination::{collect_pages, total_count, PagedEndpoint};
use crate::paths::{encode_id, list_items};
use crate::ports::BackendTransport;

const CITIZEN_SEARCH: PagedEndpoint<'static> =
    PagedEndpoint::new("citizensearch", CITIZEN_SEARCH_MAX_PAGES);

/// Citizen lookups, searches and responsible-actor updates.
#[derive(Clone)]
pub struct CitizensClient {
    transport: Arc<dyn BackendTransport>,
}

impl CitizensClient {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    /// Look up a citizen by CPR number.
    #[instrument(skip(self, cpr))]
    pub async fn find_by_cpr(&self, cpr: &str) -> Result<Option<Value>> {
        let cpr = normalize_cpr(cpr)?;
        self.transport.get(&format!("citizens/find?cpr={cpr}")).await?.into_optional()
    }

    /// All citizens matching `filters`, up to `desired` when given.
    #[instrument(skip(self, filters), fields(filter_count = filters.len()))]
    pub async fn search(
        &self,
        filters: Vec<SearchFilter>,
        term: Option<&str>,
        desired: Option<usize>,
    ) -> Result<Vec<Value>> {
        let mut template = SearchRequest::new(CITIZEN_SEARCH_PAGE_SIZE).with_filters(filters);
        if let Some(term) = term {
            template = template.with_term(term);
        }
        let citizens = collect_pages(
            self.transport.as_ref(),
            CITIZEN_SEARCH,
            &mut template,
            desired,
            total_count("totalCount"),
        )
        .await?;
        info!(count = citizens.len(), "citizen search complete");
        Ok(citizens)
    }

    /// Find an active caseworker by initials.
    #[instrument(skip(self))]
    pub async fn find_caseworker(&self, initials: &str) -> Result<Option<Value>> {
        let initials = initials.trim();
        if initials.is_empty() {
            return Err(MomentumError::InvalidInput("initials must not be empty".into()));
        }

        let body = serde_json::to_value(GlobalSearchRequest::new(initials, ["Caseworker"]))?;
        let Some(results) = self.transport.post("search", Some(&body)).await?.into_optional()?
        else {
            return Ok(None);
        };

        Ok(list_items(results).into_iter().find(|hit| {
            hit.get("initials")
                .and_then(Value::as_str)
                .is_some_and(|found| found.trim().eq_ignore_ascii_case(initials))
        }))
    }

    /// Current caseworker and private-contact assignments, ended ones included.
    #[instrument(skip(self))]
    pub async fn responsible_actors(&self, citizen_id: &str) -> Result<Vec<Assignment>> {
        let id = encode_id("citizen id", citizen_id)?;
        let Some(body) = self.transport.get(&format!("citizens/{id}/caseworkers")).await?.into_optional()?
        else {
            return Ok(Vec::new());
        };

        list_items(body)
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(MomentumError::from))
            .collect()
    }

    /// Compute the replacement payload for `change` without sending it.
    #[instrument(skip(self, change))]
    pub async fn preview_responsible_actors(
        &self,
        citizen_id: &str,
        change: &ResponsibleActorChange,
    ) -> Result<ResponsibleActorsUpdate> {
        let current = self.responsible_actors(citizen_id).await?;
        let update = reconcile(&current, change)?;
        debug!(
            current = current.len(),
            caseworkers = update.caseworkers.len(),
            private_contacts = update.private_contact_persons.len(),
            "reconciled responsible actors"
        );
        Ok(update)
    }

    /// Apply `change` to the citizen's responsible actors.
    ///
    /// Returns the payload that was sent, or `None` if the backend does not
    /// know the citizen.
    #[instrument(skip(self, change))]
    pub async fn update_responsible_actors(
        &self,
        citizen_id: &str,
        change: &ResponsibleActorChange,
    ) -> Result<Option<ResponsibleActorsUpdate>> {
        let update = self.preview_responsible_actors(citizen_id, change).await?;
        let id = encode_id("citizen id", citizen_id)?;
        let body = serde_json::to_value(&update)?;

        let response =
            self.transport.put(&format!("citizens/{id}/responsibleactors"), Some(&body)).await?;
        if response.into_optional()?.is_none() {
            return Ok(None);
        }

        info!(entries = update.len(), "responsible actors updated");
        Ok(Some(update))
    }

    /// Create a notification on the citizen's record.
    #[instrument(skip(self, notification), fields(title = %notification.title))]
    pub async fn create_notification(
        &self,
        citizen_id: &str,
        notification: &NewNotification,
    ) -> Result<Option<Value>> {
        if notification.end_date < notification.start_date {
            return Err(MomentumError::InvalidInput(
                "notification end date is before its start date".into(),
            ));
        }
        let id = encode_id("citizen id", citizen_id)?;
        let body = serde_json::to_value(notification)?;
        self.transport.post(&format!("citizens/{id}/notifications"), Some(&body)).await?.into_optional()
    }
}

/// Accepts `DDMMYYXXXX` or `DDMMYY-XXXX`.
fn normalize_cpr(cpr: &str) -> Result<String> {
    let trimmed = cpr.trim();
    let digits: String = match trimmed.split_once('-') {
        Some((head, tail)) if head.len() == 6 => format!("{head}{tail}"),
        Some(_) => String::new(),
        None => trimmed.to_string(),
    };

    if digits.len() == 10 && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(digits)
    } else {
        Err(MomentumError::InvalidInput("CPR number must be 10 digits".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpr_accepts_dash_after_birth_date() {
        assert_eq!(normalize_cpr("010190-1234").unwrap(), "0101901234");
        assert_eq!(normalize_cpr(" 0101901234 ").unwrap(), "0101901234");
    }

    #[test]
    fn cpr_rejects_malformed_values() {
        for bad in ["01019-01234", "123", "01019O1234", ""] {
            assert!(normalize_cpr(bad).is_err(), "{bad} should be rejected");
        }
    }
}
