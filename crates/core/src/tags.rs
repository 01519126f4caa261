//! Tag (marking) client

use std::sync::Arc;

use chrono::NaiveDate;
use momentum_domain::{EndTagAssignment, MomentumError, NewTagAssignment, Result, Tag, TagAssignment};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::paths::{encode_id, list_items};
use crate::ports::BackendTransport;

/// Tag catalogue lookups and tag assignments on citizens and companies.
#[derive(Clone)]
pub struct TagsClient {
    transport: Arc<dyn BackendTransport>,
}

impl TagsClient {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    /// Tag whose title matches exactly.
    #[instrument(skip(self))]
    pub async fn tag_by_title(&self, title: &str) -> Result<Option<Tag>> {
        let Some(tags) = self.transport.get("tags").await?.into_optional()? else {
            return Ok(None);
        };

        list_items(tags)
            .into_iter()
            .find(|tag| tag.get("title").and_then(Value::as_str) == Some(title))
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Tag assignments on a citizen or company.
    #[instrument(skip(self))]
    pub async fn assignments(&self, reference_id: &str) -> Result<Vec<TagAssignment>> {
        let id = encode_id("reference id", reference_id)?;
        let Some(body) =
            self.transport.get(&format!("tagassignments?referenceId={id}")).await?.into_optional()?
        else {
            return Ok(Vec::new());
        };

        list_items(body)
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(MomentumError::from))
            .collect()
    }

    /// Attach the tag titled `title` to the reference from `start`.
    ///
    /// Fails with `NotFound` before posting when no tag has that title.
    /// Returns the created record on 200 or 201, `None` on 404 or any other
    /// success status.
    #[instrument(skip(self))]
    pub async fn create_assignment(
        &self,
        title: &str,
        reference_id: &str,
        start: NaiveDate,
    ) -> Result<Option<Value>> {
        let id = encode_id("reference id", reference_id)?;
        let tag = self
            .tag_by_title(title)
            .await?
            .ok_or_else(|| MomentumError::NotFound(format!("tag '{title}' does not exist")))?;

        let body = serde_json::to_value(NewTagAssignment::new(tag.id, start))?;
        let response =
            self.transport.post(&format!("tagassignments?referenceId={id}"), Some(&body)).await?;
        let status = response.status;
        if matches!(status, 200 | 201) {
            info!(status, "tag assignment created");
            return Ok(Some(response.body));
        }
        if response.is_success() {
            warn!(status, "tag assignment accepted without a created record");
            return Ok(None);
        }
        response.into_optional()
    }

    /// Delete a tag assignment. `true` when the backend confirmed it.
    #[instrument(skip(self))]
    pub async fn delete_assignment(&self, assignment_id: &str) -> Result<bool> {
        let id = encode_id("assignment id", assignment_id)?;
        let response = self.transport.post(&format!("tagassignments/{id}/delete"), None).await?;
        if response.status != 200 {
            warn!(status = response.status, "tag assignment was not deleted");
        }
        Ok(response.status == 200)
    }

    /// Close an open tag assignment on `end_date`.
    #[instrument(skip(self, assignment), fields(assignment_id = %assignment.id))]
    pub async fn end_assignment(
        &self,
        assignment: &TagAssignment,
        end_date: NaiveDate,
    ) -> Result<Option<Value>> {
        let id = encode_id("assignment id", &assignment.id)?;
        let body = serde_json::to_value(EndTagAssignment::for_assignment(assignment, end_date))?;
        self.transport.put(&format!("tagassignments/{id}"), Some(&body)).await?.into_optional()
    }
}
