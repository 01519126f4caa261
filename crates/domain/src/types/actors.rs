//! Responsible-actor types
//!
//! `Assignment` is what the backend returns for a citizen's caseworkers and
//! private contacts. `ResponsibleActorsUpdate` is the full replacement body
//! sent back; the backend has no incremental patch, so any active entry left
//! out of it is removed.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One current link between an actor and a citizen, as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caseworker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub responsibility_name: Option<String>,
    /// Numeric, but the backend sometimes sends it as `"1.0"`.
    #[serde(default)]
    pub role: Option<Value>,
    #[serde(default)]
    pub end_date: Option<Value>,
    #[serde(default)]
    pub caseworker_is_active: Option<bool>,
    #[serde(default)]
    pub show_in_jobnet: Option<Value>,
}

impl Assignment {
    /// Actor identifier, preferring `caseworkerId` over `id`.
    pub fn actor_id(&self) -> Option<&str> {
        self.caseworker_id.as_deref().or(self.id.as_deref())
    }

    /// Entries without an end date are still in force.
    pub const fn is_active(&self) -> bool {
        self.end_date.is_none()
    }
}

/// Caseworker role on the wire: `0` secondary, `1` primary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EmployeeKind {
    #[default]
    Secondary,
    Primary,
}

impl EmployeeKind {
    pub const fn code(self) -> u8 {
        match self {
            Self::Secondary => 0,
            Self::Primary => 1,
        }
    }
}

impl Serialize for EmployeeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for EmployeeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Self::Secondary),
            1 => Ok(Self::Primary),
            other => Err(serde::de::Error::custom(format!("invalid employee kind {other}"))),
        }
    }
}

/// How a new assignment names its responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsibilityRef {
    /// Free-text name resolved through the responsibility tables.
    Name(String),
    /// Code sent as-is.
    Code(String),
}

/// Directive to add one caseworker or private contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    pub actor_id: String,
    pub responsibility: ResponsibilityRef,
    pub kind: EmployeeKind,
    /// `None` classifies by responsibility name.
    pub private_contact: Option<bool>,
}

impl NewAssignment {
    /// Secondary assignment identified by responsibility name.
    pub fn named(actor_id: impl Into<String>, responsibility_name: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            responsibility: ResponsibilityRef::Name(responsibility_name.into()),
            kind: EmployeeKind::Secondary,
            private_contact: None,
        }
    }

    /// Secondary assignment identified by a responsibility code.
    pub fn coded(actor_id: impl Into<String>, responsibility_code: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            responsibility: ResponsibilityRef::Code(responsibility_code.into()),
            kind: EmployeeKind::Secondary,
            private_contact: None,
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: EmployeeKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn with_private_contact(mut self, private_contact: bool) -> Self {
        self.private_contact = Some(private_contact);
        self
    }
}

/// Key identifying the existing entry to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalTarget {
    ResponsibilityName(String),
    ActorId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsibleActorChange {
    Add(NewAssignment),
    Remove(RemovalTarget),
}

/// Structured responsibility on a secondary caseworker entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Responsibility {
    pub responsibility_code: String,
    /// `true` or `null` on the wire, never `false`.
    pub show_in_jobnet: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseworkerEntry {
    pub actor_id: String,
    pub role: EmployeeKind,
    pub responsibilities: Vec<Responsibility>,
}

impl CaseworkerEntry {
    /// Primary caseworkers carry no responsibilities.
    pub fn primary(actor_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            role: EmployeeKind::Primary,
            responsibilities: Vec::new(),
        }
    }

    /// Secondary caseworkers carry exactly one responsibility.
    pub fn secondary(
        actor_id: impl Into<String>,
        responsibility_code: impl Into<String>,
        show_in_jobnet: Option<bool>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            role: EmployeeKind::Secondary,
            responsibilities: vec![Responsibility {
                responsibility_code: responsibility_code.into(),
                show_in_jobnet,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateContactEntry {
    pub actor_id: String,
    pub responsibility_codes: Vec<String>,
}

impl PrivateContactEntry {
    pub fn new(actor_id: impl Into<String>, responsibility_code: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            responsibility_codes: vec![responsibility_code.into()],
        }
    }
}

/// Full replacement payload for a citizen's responsible actors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibleActorsUpdate {
    pub caseworkers: Vec<CaseworkerEntry>,
    pub private_contact_persons: Vec<PrivateContactEntry>,
}

impl ResponsibleActorsUpdate {
    pub fn len(&self) -> usize {
        self.caseworkers.len() + self.private_contact_persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
