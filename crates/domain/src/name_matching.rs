//! Exact-string person matching with an optional roster pivot.
//!
//! A class record may name its teacher by the Korean primary name while the
//! signed-in teacher only knows their romanized name (or the reverse). When a
//! roster is available the candidate name is resolved to a roster entry and
//! that entry's names are compared instead.

use serde::{Deserialize, Serialize};

use crate::roster::RosterLookup;

/// The names a person is known by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonIdentity {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alternate_name: Option<String>,
}

impl PersonIdentity {
    /// Creates an identity from a primary name and an optional alternate.
    #[must_use]
    pub fn new(name: impl Into<String>, alternate_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            alternate_name: hagwon_core::non_blank(alternate_name),
        }
    }

    /// Returns the primary name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the alternate name, if any.
    #[must_use]
    pub fn alternate_name(&self) -> Option<&str> {
        self.alternate_name.as_deref()
    }

    /// Returns whether `candidate` denotes this person.
    #[must_use]
    pub fn matches<R>(&self, candidate: &str, roster: Option<&R>) -> bool
    where
        R: RosterLookup + ?Sized,
    {
        names_match(candidate, self.name(), self.alternate_name(), roster)
    }
}

/// Decides whether `candidate` names the same person as the `self_*` names.
///
/// Empty candidates never match. Comparison is exact: no trimming, no case
/// folding, no script normalization.
#[must_use]
pub fn names_match<R>(
    candidate: &str,
    self_primary: &str,
    self_alternate: Option<&str>,
    roster: Option<&R>,
) -> bool
where
    R: RosterLookup + ?Sized,
{
    if candidate.is_empty() {
        return false;
    }

    if is_self(candidate, self_primary, self_alternate) {
        return true;
    }

    let Some(roster) = roster else {
        return false;
    };

    roster.find_by_name(candidate).is_some_and(|entry| {
        is_self(entry.primary_name(), self_primary, self_alternate)
            || entry
                .alternate_name()
                .is_some_and(|alternate| is_self(alternate, self_primary, self_alternate))
    })
}

fn is_self(value: &str, self_primary: &str, self_alternate: Option<&str>) -> bool {
    value == self_primary || self_alternate == Some(value)
}

/// Returns whether an assigned staff id belongs to the caller.
///
/// Both ids must be present; two absent ids are not a match.
#[must_use]
pub fn staff_ids_match(assigned_staff_id: Option<&str>, own_staff_id: Option<&str>) -> bool {
    match (assigned_staff_id, own_staff_id) {
        (Some(assigned), Some(own)) => !assigned.is_empty() && assigned == own,
        _ => false,
    }
}
