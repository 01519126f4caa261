//! Citizen notification bodies

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationImportance {
    #[default]
    Info,
    Warning,
    Critical,
}

impl std::str::FromStr for NotificationImportance {
    type Err = crate::MomentumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            other => Err(crate::MomentumError::InvalidInput(format!(
                "unknown notification importance: {other}"
            ))),
        }
    }
}

/// Notification shown on a citizen's record between two dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub importance: NotificationImportance,
    pub visible_in_header: bool,
}
