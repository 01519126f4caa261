//! Responsible-actor reconciliation
//!
//! The backend replaces a citizen's caseworkers and private contacts
//! wholesale, so every change is expressed as a complete payload: the new
//! entry (if any) first, followed by every active entry that survives the
//! change, each routed to exactly one of the two buckets.

use momentum_domain::constants::{
    CASEWORKER_RESPONSIBILITIES, DEFAULT_RESPONSIBILITY_CODE, PRIVATE_CONTACT_RESPONSIBILITIES,
};
use momentum_domain::{
    Assignment, CaseworkerEntry, EmployeeKind, MomentumError, NewAssignment, PrivateContactEntry,
    RemovalTarget, ResponsibilityRef, ResponsibleActorChange, ResponsibleActorsUpdate, Result,
};
use serde_json::Value;

/// Code for a caseworker responsibility name, falling back to
/// [`DEFAULT_RESPONSIBILITY_CODE`].
pub fn caseworker_responsibility_code(name: &str) -> &'static str {
    lookup(CASEWORKER_RESPONSIBILITIES, name).unwrap_or(DEFAULT_RESPONSIBILITY_CODE)
}

/// Code for a private-contact responsibility name, if it is one.
pub fn private_contact_code(name: &str) -> Option<&'static str> {
    lookup(PRIVATE_CONTACT_RESPONSIBILITIES, name)
}

fn lookup(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table.iter().find(|(known, _)| keys_match(known, name)).map(|(_, code)| *code)
}

fn keys_match(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

/// Normalize a raw role to primary (`1.0`) or secondary (anything else).
///
/// Absent or null roles are secondary. Values that are not numbers or
/// numeric strings are rejected rather than coerced.
pub fn normalize_role(role: Option<&Value>) -> Result<EmployeeKind> {
    let numeric = match role {
        None | Some(Value::Null) => return Ok(EmployeeKind::Secondary),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    let value = numeric.ok_or_else(|| {
        MomentumError::InvalidInput(format!(
            "role must be numeric, got {}",
            role.map_or_else(String::new, Value::to_string)
        ))
    })?;

    if (value - 1.0).abs() < f64::EPSILON {
        Ok(EmployeeKind::Primary)
    } else {
        Ok(EmployeeKind::Secondary)
    }
}

fn show_in_jobnet(value: Option<&Value>) -> Option<bool> {
    matches!(value, Some(Value::Bool(true))).then_some(true)
}

enum Routed {
    Caseworker(CaseworkerEntry),
    PrivateContact(PrivateContactEntry),
}

impl Routed {
    fn push_into(self, update: &mut ResponsibleActorsUpdate) {
        match self {
            Self::Caseworker(entry) => update.caseworkers.push(entry),
            Self::PrivateContact(entry) => update.private_contact_persons.push(entry),
        }
    }

    /// Same bucket, same actor, same responsibility.
    fn duplicates(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Caseworker(a), Self::Caseworker(b)) => {
                a.actor_id == b.actor_id
                    && a.role == b.role
                    && a.responsibilities.iter().map(|r| &r.responsibility_code).eq(b
                        .responsibilities
                        .iter()
                        .map(|r| &r.responsibility_code))
            }
            (Self::PrivateContact(a), Self::PrivateContact(b)) => {
                a.actor_id == b.actor_id && a.responsibility_codes == b.responsibility_codes
            }
            _ => false,
        }
    }

    /// Take over the existing entry's responsibilities so flags such as
    /// `showInJobnet` survive a re-add.
    fn absorb(&mut self, existing: Self) {
        if let (Self::Caseworker(seed), Self::Caseworker(existing)) = (self, existing) {
            seed.responsibilities = existing.responsibilities;
        }
    }
}

fn route_new(assignment: &NewAssignment) -> Result<Routed> {
    if assignment.actor_id.trim().is_empty() {
        return Err(MomentumError::InvalidInput("actor id must not be empty".into()));
    }

    let private = assignment.private_contact.unwrap_or_else(|| match &assignment.responsibility {
        ResponsibilityRef::Name(name) => private_contact_code(name).is_some(),
        ResponsibilityRef::Code(code) => {
            PRIVATE_CONTACT_RESPONSIBILITIES.iter().any(|(_, known)| *known == code.as_str())
        }
    });

    if private {
        let code = match &assignment.responsibility {
            ResponsibilityRef::Name(name) => private_contact_code(name).ok_or_else(|| {
                MomentumError::Config(format!("unknown private contact role: {name}"))
            })?,
            ResponsibilityRef::Code(code) => PRIVATE_CONTACT_RESPONSIBILITIES
                .iter()
                .find(|(_, known)| *known == code.as_str())
                .map(|(_, known)| *known)
                .ok_or_else(|| {
                    MomentumError::Config(format!("unknown private contact code: {code}"))
                })?,
        };
        return Ok(Routed::PrivateContact(PrivateContactEntry::new(&assignment.actor_id, code)));
    }

    let entry = match assignment.kind {
        EmployeeKind::Primary => CaseworkerEntry::primary(&assignment.actor_id),
        EmployeeKind::Secondary => {
            let code = match &assignment.responsibility {
                ResponsibilityRef::Name(name) => caseworker_responsibility_code(name).to_string(),
                ResponsibilityRef::Code(code) => code.clone(),
            };
            CaseworkerEntry::secondary(&assignment.actor_id, code, None)
        }
    };
    Ok(Routed::Caseworker(entry))
}

fn route_existing(assignment: &Assignment, actor_id: &str) -> Result<Routed> {
    let name = assignment.responsibility_name.as_deref().unwrap_or_default();

    if let Some(code) = private_contact_code(name) {
        return Ok(Routed::PrivateContact(PrivateContactEntry::new(actor_id, code)));
    }

    let entry = match normalize_role(assignment.role.as_ref())? {
        EmployeeKind::Primary => CaseworkerEntry::primary(actor_id),
        EmployeeKind::Secondary => CaseworkerEntry::secondary(
            actor_id,
            caseworker_responsibility_code(name),
            show_in_jobnet(assignment.show_in_jobnet.as_ref()),
        ),
    };
    Ok(Routed::Caseworker(entry))
}

fn is_removal_target(target: &RemovalTarget, assignment: &Assignment, actor_id: &str) -> bool {
    match target {
        RemovalTarget::ResponsibilityName(name) => assignment
            .responsibility_name
            .as_deref()
            .is_some_and(|existing| keys_match(existing, name)),
        RemovalTarget::ActorId(id) => keys_match(actor_id, id),
    }
}

/// Build the full replacement payload for `change` applied to `current`.
///
/// Ended entries (`endDate` set) are dropped. The added entry, if any, leads
/// its bucket; surviving entries follow in source order. `current` is not
/// modified.
pub fn reconcile(
    current: &[Assignment],
    change: &ResponsibleActorChange,
) -> Result<ResponsibleActorsUpdate> {
    let mut update = ResponsibleActorsUpdate::default();

    let (mut seed, removal) = match change {
        ResponsibleActorChange::Add(assignment) => (Some(route_new(assignment)?), None),
        ResponsibleActorChange::Remove(target) => (None, Some(target)),
    };

    let mut carried = Vec::with_capacity(current.len());
    for assignment in current.iter().filter(|a| a.is_active()) {
        let actor_id = assignment.actor_id().ok_or_else(|| {
            MomentumError::InvalidInput(
                "active assignment has neither caseworkerId nor id".into(),
            )
        })?;

        if removal.is_some_and(|target| is_removal_target(target, assignment, actor_id)) {
            continue;
        }

        let routed = route_existing(assignment, actor_id)?;
        if let Some(seed) = seed.as_mut().filter(|seed| seed.duplicates(&routed)) {
            seed.absorb(routed);
            continue;
        }
        carried.push(routed);
    }

    if let Some(seed) = seed {
        seed.push_into(&mut update);
    }
    for routed in carried {
        routed.push_into(&mut update);
    }

    Ok(update)
}
