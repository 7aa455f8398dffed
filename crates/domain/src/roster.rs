use std::collections::HashMap;

use hagwon_core::{AppResult, NonEmptyString, non_blank};
use serde::{Deserialize, Serialize};

/// One person on an academy roster (staff member or student).
///
/// Names are not unique: two entries may share a primary name, and callers
/// must treat such collisions as ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RosterEntryDocument", into = "RosterEntryDocument")]
pub struct RosterEntry {
    id: NonEmptyString,
    primary_name: NonEmptyString,
    alternate_name: Option<String>,
    external_id: Option<String>,
    qualifier: Option<String>,
}

impl RosterEntry {
    /// Creates a validated roster entry with only the required fields.
    pub fn new(id: impl Into<String>, primary_name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id: NonEmptyString::new(id)?,
            primary_name: NonEmptyString::new(primary_name)?,
            alternate_name: None,
            external_id: None,
            qualifier: None,
        })
    }

    /// Sets the alternate (romanized or alternate-script) name.
    #[must_use]
    pub fn with_alternate_name(mut self, alternate_name: Option<String>) -> Self {
        self.alternate_name = non_blank(alternate_name);
        self
    }

    /// Sets the external identifier, e.g. an attendance number.
    #[must_use]
    pub fn with_external_id(mut self, external_id: Option<String>) -> Self {
        self.external_id = non_blank(external_id);
        self
    }

    /// Sets the disambiguating qualifier, e.g. a school name.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: Option<String>) -> Self {
        self.qualifier = non_blank(qualifier);
        self
    }

    /// Returns the stable roster identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the main display name.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.primary_name.as_str()
    }

    /// Returns the alternate name, if recorded.
    #[must_use]
    pub fn alternate_name(&self) -> Option<&str> {
        self.alternate_name.as_deref()
    }

    /// Returns the external identifier, if recorded.
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    /// Returns the qualifier, if recorded.
    #[must_use]
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Returns whether `name` is this entry's primary or alternate name.
    #[must_use]
    pub fn is_known_as(&self, name: &str) -> bool {
        self.primary_name() == name || self.alternate_name() == Some(name)
    }
}

#[derive(Serialize, Deserialize)]
struct RosterEntryDocument {
    id: String,
    primary_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alternate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    qualifier: Option<String>,
}

impl TryFrom<RosterEntryDocument> for RosterEntry {
    type Error = hagwon_core::AppError;

    fn try_from(value: RosterEntryDocument) -> Result<Self, Self::Error> {
        Ok(Self::new(value.id, value.primary_name)?
            .with_alternate_name(value.alternate_name)
            .with_external_id(value.external_id)
            .with_qualifier(value.qualifier))
    }
}

impl From<RosterEntry> for RosterEntryDocument {
    fn from(value: RosterEntry) -> Self {
        Self {
            id: value.id.into(),
            primary_name: value.primary_name.into(),
            alternate_name: value.alternate_name,
            external_id: value.external_id,
            qualifier: value.qualifier,
        }
    }
}

/// Name lookup over a roster snapshot.
///
/// Implementations must return the first entry, in roster order, whose
/// primary or alternate name equals `name`.
pub trait RosterLookup {
    /// Finds the first entry known by `name`.
    fn find_by_name(&self, name: &str) -> Option<&RosterEntry>;
}

impl RosterLookup for [RosterEntry] {
    fn find_by_name(&self, name: &str) -> Option<&RosterEntry> {
        self.iter().find(|entry| entry.is_known_as(name))
    }
}

impl RosterLookup for Vec<RosterEntry> {
    fn find_by_name(&self, name: &str) -> Option<&RosterEntry> {
        self.as_slice().find_by_name(name)
    }
}

/// Roster snapshot with a name index for large rosters.
#[derive(Debug, Clone, Default)]
pub struct IndexedRoster {
    entries: Vec<RosterEntry>,
    by_name: HashMap<String, usize>,
}

impl IndexedRoster {
    /// Builds the index; earlier entries win when names collide.
    #[must_use]
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len() * 2);
        for (position, entry) in entries.iter().enumerate() {
            by_name
                .entry(entry.primary_name().to_owned())
                .or_insert(position);
            if let Some(alternate_name) = entry.alternate_name() {
                by_name.entry(alternate_name.to_owned()).or_insert(position);
            }
        }

        Self { entries, by_name }
    }
}

impl RosterLookup for IndexedRoster {
    fn find_by_name(&self, name: &str) -> Option<&RosterEntry> {
        self.by_name
            .get(name)
            .and_then(|position| self.entries.get(*position))
    }
}
