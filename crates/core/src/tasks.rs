//! Task client

use std::sync::Arc;

use momentum_domain::constants::{TASK_MAX_PAGES, TASK_PAGE_SIZE};
use momentum_domain::{
    MomentumError, NewTask, Result, SearchFilter, SearchRequest, SortField, TaskStatus,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::pagination::{collect_pages, total_count, PagedEndpoint};
use crate::paths::encode_id;
use crate::ports::BackendTransport;

const CITIZEN_TASKS: PagedEndpoint<'static> = PagedEndpoint::new("tasks/citizen", TASK_MAX_PAGES);

#[derive(Clone)]
pub struct TasksClient {
    transport: Arc<dyn BackendTransport>,
}

impl TasksClient {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    #[instrument(skip(self, task), fields(citizen_id = %task.reference.id))]
    pub async fn create(&self, task: &NewTask) -> Result<Value> {
        if task.title.trim().is_empty() {
            return Err(MomentumError::InvalidInput("task title must not be empty".into()));
        }
        encode_id("citizen id", &task.reference.id)?;

        let body = serde_json::to_value(task)?;
        let created = self.transport.post("tasks", Some(&body)).await?.into_required()?;
        info!("task created");
        Ok(created)
    }

    /// Every task on the citizen, soonest deadline first.
    #[instrument(skip(self))]
    pub async fn for_citizen(&self, citizen_id: &str) -> Result<Vec<Value>> {
        encode_id("citizen id", citizen_id)?;
        let mut template = SearchRequest::new(TASK_PAGE_SIZE)
            .with_columns(Vec::new())
            .with_filters(vec![SearchFilter::new("citizenId", [citizen_id.trim()])])
            .with_sort(vec![SortField::ascending("deadline")]);

        collect_pages(
            self.transport.as_ref(),
            CITIZEN_TASKS,
            &mut template,
            None,
            total_count("totalSearchCount"),
        )
        .await
    }

    /// Move a task to `status`. The backend answers 400 for transitions it
    /// does not allow.
    #[instrument(skip(self))]
    pub async fn set_status(&self, task_id: &str, status: TaskStatus) -> Result<Option<Value>> {
        let id = encode_id("task id", task_id)?;
        let response = self.transport.put(&format!("tasks/{id}/{}", status.code()), None).await?;
        if response.status == 400 {
            return Err(MomentumError::InvalidInput(format!(
                "task {task_id} could not be moved to {status:?}"
            )));
        }
        response.into_optional()
    }
}
