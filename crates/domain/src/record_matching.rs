use std::collections::BTreeMap;

use hagwon_core::{AppResult, NonEmptyString, non_blank};
use serde::{Deserialize, Serialize};

use crate::roster::RosterEntry;

/// Externally sourced row (for example a billing line) awaiting a roster link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ImportableRecordDocument", into = "ImportableRecordDocument")]
pub struct ImportableRecord {
    record_id: NonEmptyString,
    subject_name: Option<String>,
    external_id: Option<String>,
    qualifier: Option<String>,
}

impl ImportableRecord {
    /// Creates a record; blank optional fields are treated as absent.
    pub fn new(
        record_id: impl Into<String>,
        subject_name: Option<String>,
        external_id: Option<String>,
        qualifier: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            record_id: NonEmptyString::new(record_id)?,
            subject_name: non_blank(subject_name),
            external_id: non_blank(external_id),
            qualifier: non_blank(qualifier),
        })
    }

    /// Returns the record identifier.
    #[must_use]
    pub fn record_id(&self) -> &str {
        self.record_id.as_str()
    }

    /// Returns the name as written in the external source.
    #[must_use]
    pub fn subject_name(&self) -> Option<&str> {
        self.subject_name.as_deref()
    }

    /// Returns the external identifier.
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    /// Returns the disambiguating qualifier.
    #[must_use]
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

#[derive(Serialize, Deserialize)]
struct ImportableRecordDocument {
    record_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subject_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    qualifier: Option<String>,
}

impl TryFrom<ImportableRecordDocument> for ImportableRecord {
    type Error = hagwon_core::AppError;

    fn try_from(value: ImportableRecordDocument) -> Result<Self, Self::Error> {
        Self::new(
            value.record_id,
            value.subject_name,
            value.external_id,
            value.qualifier,
        )
    }
}

impl From<ImportableRecord> for ImportableRecordDocument {
    fn from(value: ImportableRecord) -> Self {
        Self {
            record_id: value.record_id.into(),
            subject_name: value.subject_name,
            external_id: value.external_id,
            qualifier: value.qualifier,
        }
    }
}

/// Strategy that produced a match, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchTier {
    /// Unique external identifier hit.
    #[serde(rename = "external-id")]
    ExternalId,
    /// Unique name hit narrowed by the qualifier.
    #[serde(rename = "name+qualifier")]
    NameAndQualifier,
    /// Unique name hit on its own.
    #[serde(rename = "name-only")]
    NameOnly,
}

impl MatchTier {
    /// Returns a stable transport value for this tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExternalId => "external-id",
            Self::NameAndQualifier => "name+qualifier",
            Self::NameOnly => "name-only",
        }
    }
}

/// Unambiguous link between an imported record and a roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Linked roster entry id.
    pub entity_id: String,
    /// Linked roster entry primary name.
    pub entity_name: String,
    /// Tier that produced the link.
    pub match_tier: MatchTier,
}

impl MatchResult {
    fn new(entry: &RosterEntry, match_tier: MatchTier) -> Self {
        Self {
            entity_id: entry.id().to_owned(),
            entity_name: entry.primary_name().to_owned(),
            match_tier,
        }
    }
}

enum TierOutcome<'a> {
    Unique(&'a RosterEntry),
    Empty,
    Ambiguous,
}

fn unique<'a>(mut candidates: impl Iterator<Item = &'a RosterEntry>) -> TierOutcome<'a> {
    match (candidates.next(), candidates.next()) {
        (None, _) => TierOutcome::Empty,
        (Some(entry), None) => TierOutcome::Unique(entry),
        (Some(_), Some(_)) => TierOutcome::Ambiguous,
    }
}

/// Links `record` to exactly one roster entry, or to nothing.
///
/// Tiers run external-id, then name+qualifier, then name-only. Several
/// entries sharing an external id end the search with no match. An
/// ambiguous name+qualifier tier falls through to name-only, where
/// ambiguity again means no match. Nothing is ever guessed.
#[must_use]
pub fn match_record(record: &ImportableRecord, roster: &[RosterEntry]) -> Option<MatchResult> {
    if let Some(external_id) = record.external_id() {
        match unique(
            roster
                .iter()
                .filter(|entry| entry.external_id() == Some(external_id)),
        ) {
            TierOutcome::Unique(entry) => {
                return Some(MatchResult::new(entry, MatchTier::ExternalId));
            }
            TierOutcome::Ambiguous => return None,
            TierOutcome::Empty => {}
        }
    }

    let subject_name = record.subject_name()?;

    if let Some(qualifier) = record.qualifier() {
        let candidates = roster.iter().filter(|entry| {
            entry.primary_name() == subject_name
                && entry
                    .qualifier()
                    .is_some_and(|value| value.contains(qualifier))
        });
        if let TierOutcome::Unique(entry) = unique(candidates) {
            return Some(MatchResult::new(entry, MatchTier::NameAndQualifier));
        }
    }

    match unique(
        roster
            .iter()
            .filter(|entry| entry.primary_name() == subject_name),
    ) {
        TierOutcome::Unique(entry) => Some(MatchResult::new(entry, MatchTier::NameOnly)),
        TierOutcome::Empty | TierOutcome::Ambiguous => None,
    }
}

/// Matches every record independently; unmatched records are omitted.
#[must_use]
pub fn match_all(
    records: &[ImportableRecord],
    roster: &[RosterEntry],
) -> BTreeMap<String, MatchResult> {
    records
        .iter()
        .filter_map(|record| {
            match_record(record, roster).map(|result| (record.record_id().to_owned(), result))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ImportableRecord, MatchTier, match_all, match_record};
    use crate::roster::RosterEntry;

    fn student(id: &str, name: &str) -> RosterEntry {
        RosterEntry::new(id, name).unwrap_or_else(|_| unreachable!())
    }

    fn record(
        id: &str,
        name: Option<&str>,
        external_id: Option<&str>,
        qualifier: Option<&str>,
    ) -> ImportableRecord {
        ImportableRecord::new(
            id,
            name.map(str::to_owned),
            external_id.map(str::to_owned),
            qualifier.map(str::to_owned),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn external_id_matches_first() {
        let roster = vec![student("st1", "김철수").with_external_id(Some("1234".to_owned()))];
        let result = match_record(&record("br1", Some("김철수"), Some("1234"), None), &roster);

        assert_eq!(result.as_ref().map(|value| value.match_tier), Some(MatchTier::ExternalId));
        assert_eq!(result.map(|value| value.entity_id), Some("st1".to_owned()));
    }

    #[test]
    fn external_id_beats_unique_name_of_another_entry() {
        let roster = vec![
            student("x", "박영희").with_external_id(Some("9999".to_owned())),
            student("y", "김철수"),
        ];
        let result = match_record(&record("br1", Some("김철수"), Some("9999"), None), &roster);

        assert!(matches!(
            result,
            Some(ref value) if value.entity_id == "x" && value.match_tier == MatchTier::ExternalId
        ));
    }

    #[test]
    fn external_id_resolves_same_name_collision() {
        let roster = vec![
            student("st1", "김철수").with_external_id(Some("9999".to_owned())),
            student("st2", "김철수"),
        ];
        let result = match_record(&record("br1", Some("김철수"), Some("9999"), None), &roster);

        assert!(matches!(
            result,
            Some(ref value) if value.entity_id == "st1" && value.match_tier == MatchTier::ExternalId
        ));
    }

    #[test]
    fn unknown_external_id_falls_through_to_name() {
        let roster = vec![student("st1", "박영희")];
        let result = match_record(&record("br1", Some("박영희"), Some("0000"), None), &roster);

        assert_eq!(result.map(|value| value.match_tier), Some(MatchTier::NameOnly));
    }

    #[test]
    fn duplicated_external_id_is_no_match() {
        let roster = vec![
            student("st1", "김철수").with_external_id(Some("1234".to_owned())),
            student("st2", "박영희").with_external_id(Some("1234".to_owned())),
        ];
        assert!(match_record(&record("br1", Some("김철수"), Some("1234"), None), &roster).is_none());
    }

    #[test]
    fn name_and_qualifier_matches_by_substring() {
        let roster = vec![
            student("st1", "김철수").with_qualifier(Some("서울초등학교".to_owned())),
            student("st2", "김철수").with_qualifier(Some("부산초등학교".to_owned())),
        ];
        let result = match_record(&record("br1", Some("김철수"), None, Some("서울초")), &roster);

        assert_eq!(result.as_ref().map(|value| value.entity_id.as_str()), Some("st1"));
        assert_eq!(result.map(|value| value.match_tier), Some(MatchTier::NameAndQualifier));
    }

    #[test]
    fn ambiguous_qualifier_tier_falls_through_and_stays_ambiguous() {
        let roster = vec![
            student("st1", "김철수").with_qualifier(Some("서울초등학교".to_owned())),
            student("st2", "김철수").with_qualifier(Some("서울초등학교".to_owned())),
        ];
        assert!(match_record(&record("br1", Some("김철수"), None, Some("서울초")), &roster).is_none());
    }

    #[test]
    fn qualifier_miss_degrades_to_unique_name() {
        let roster = vec![student("st1", "김철수").with_qualifier(Some("부산초".to_owned()))];
        let result = match_record(&record("br1", Some("김철수"), None, Some("서울초")), &roster);

        assert_eq!(result.map(|value| value.match_tier), Some(MatchTier::NameOnly));
    }

    #[test]
    fn unique_name_matches_alone() {
        let roster = vec![student("s1", "김철수")];
        let result = match_record(&record("br1", Some("김철수"), None, None), &roster);

        assert!(matches!(
            result,
            Some(ref value) if value.entity_id == "s1"
                && value.entity_name == "김철수"
                && value.match_tier == MatchTier::NameOnly
        ));
    }

    #[test]
    fn same_name_collision_is_no_match() {
        let roster = vec![student("s1", "김철수"), student("s2", "김철수")];
        assert!(match_record(&record("br1", Some("김철수"), None, None), &roster).is_none());
    }

    #[test]
    fn unknown_name_is_no_match() {
        let roster = vec![student("s1", "이영희")];
        assert!(match_record(&record("br1", Some("박지민"), None, None), &roster).is_none());
    }

    #[test]
    fn missing_name_without_external_hit_is_no_match() {
        let roster = vec![student("s1", "김철수")];
        assert!(match_record(&record("br1", None, Some("7777"), Some("서울초")), &roster).is_none());
        assert!(match_record(&record("br2", Some("  "), None, None), &roster).is_none());
    }

    #[test]
    fn alternate_names_are_not_used_for_records() {
        let roster =
            vec![student("s1", "김철수").with_alternate_name(Some("Chulsoo".to_owned()))];
        assert!(match_record(&record("br1", Some("Chulsoo"), None, None), &roster).is_none());
    }

    #[test]
    fn batch_omits_unmatched_records() {
        let roster = vec![student("st1", "김철수"), student("st2", "이영희")];
        let records = vec![
            record("br1", Some("김철수"), None, None),
            record("br2", Some("이영희"), None, None),
            record("br3", Some("없는학생"), None, None),
        ];

        let results = match_all(&records, &roster);

        assert_eq!(results.len(), 2);
        assert_eq!(results.get("br1").map(|value| value.entity_id.as_str()), Some("st1"));
        assert_eq!(results.get("br2").map(|value| value.entity_id.as_str()), Some("st2"));
        assert!(!results.contains_key("br3"));
    }

    #[test]
    fn batch_of_nothing_is_empty() {
        assert!(match_all(&[], &[student("st1", "김철수")]).is_empty());
    }

    #[test]
    fn tier_serializes_with_transport_names() {
        let value = serde_json::to_string(&MatchTier::NameAndQualifier).unwrap_or_default();
        assert_eq!(value, "\"name+qualifier\"");
        assert_eq!(MatchTier::ExternalId.as_str(), "external-id");
    }
}
