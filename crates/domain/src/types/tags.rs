//! Tag (marking) types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tag definition from the tag catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Tag attached to a citizen or company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAssignment {
    pub id: String,
    pub tag: Tag,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TagAssignment {
    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// Body for creating a tag assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTagAssignment {
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub start: NaiveDate,
    pub end: Option<String>,
    pub tag_id: String,
    pub correction_comment: Option<CorrectionComment>,
    pub attachments_to_add: Vec<Value>,
    pub attachments_to_remove: Vec<Value>,
}

impl NewTagAssignment {
    pub fn new(tag_id: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            created_at: None,
            updated_at: None,
            start,
            end: None,
            tag_id: tag_id.into(),
            correction_comment: None,
            attachments_to_add: Vec::new(),
            attachments_to_remove: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionComment {
    pub reference_id: String,
    pub reference_type: Option<String>,
    pub body: Option<String>,
    pub title: Option<String>,
    pub comment_type_code: Option<String>,
}

/// Body for closing an open tag assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndTagAssignment {
    pub tag_id: String,
    pub start: Option<String>,
    /// Midnight UTC, `YYYY-MM-DDT00:00:00Z`.
    pub end: String,
    pub correction_comment: CorrectionComment,
    pub attachments_to_add: Vec<Value>,
    pub attachments_to_remove: Vec<Value>,
}

impl EndTagAssignment {
    pub fn for_assignment(assignment: &TagAssignment, end_date: NaiveDate) -> Self {
        Self {
            tag_id: assignment.tag.id.clone(),
            start: assignment.start.clone(),
            end: end_date.format("%Y-%m-%dT00:00:00Z").to_string(),
            correction_comment: CorrectionComment {
                reference_id: assignment.id.clone(),
                reference_type: None,
                body: None,
                title: None,
                comment_type_code: None,
            },
            attachments_to_add: Vec::new(),
            attachments_to_remove: Vec::new(),
        }
    }
}
