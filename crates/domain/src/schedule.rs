use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use hagwon_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::name_matching::PersonIdentity;
use crate::roster::RosterLookup;

/// One scheduled occurrence of a class: a day plus a period identifier.
///
/// Rendered as `"{day}-{period}"` (for example `월-1` or `월-1-1`); the
/// period part may itself contain dashes. Only request input is parsed into
/// this type; stored overrides keep their raw keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey(String);

impl SlotKey {
    /// Builds a slot key from its day and period parts.
    pub fn new(day: &str, period: &str) -> AppResult<Self> {
        if day.is_empty() || day.contains('-') || period.is_empty() {
            return Err(AppError::Validation(format!(
                "slot key requires a dash-free day and a period, got day '{day}' period '{period}'"
            )));
        }

        Ok(Self(format!("{day}-{period}")))
    }

    /// Returns the storage form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for SlotKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (day, period) = value
            .split_once('-')
            .ok_or_else(|| AppError::Validation(format!("invalid slot key '{value}'")))?;
        Self::new(day, period)
    }
}

impl Display for SlotKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Who is responsible for a class, per slot.
///
/// Slots without an override belong to the primary owner. Override keys are
/// kept verbatim: they are not checked against the class timetable or the
/// slot key format, and keys no request can name are simply never found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSlotAssignment {
    class_id: NonEmptyString,
    #[serde(default)]
    primary_owner_name: String,
    #[serde(default)]
    slot_overrides: BTreeMap<String, String>,
}

impl ClassSlotAssignment {
    /// Creates an assignment with no slot overrides.
    pub fn new(class_id: impl Into<String>, primary_owner_name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            class_id: NonEmptyString::new(class_id)?,
            primary_owner_name: primary_owner_name.into(),
            slot_overrides: BTreeMap::new(),
        })
    }

    /// Adds or replaces the owner of one slot.
    #[must_use]
    pub fn with_slot_override(mut self, slot_key: SlotKey, owner_name: impl Into<String>) -> Self {
        self.slot_overrides
            .insert(slot_key.as_str().to_owned(), owner_name.into());
        self
    }

    /// Returns the class identifier.
    #[must_use]
    pub fn class_id(&self) -> &str {
        self.class_id.as_str()
    }

    /// Returns the class's default responsible person.
    #[must_use]
    pub fn primary_owner_name(&self) -> &str {
        self.primary_owner_name.as_str()
    }

    /// Returns the per-slot owner overrides.
    #[must_use]
    pub fn slot_overrides(&self) -> &BTreeMap<String, String> {
        &self.slot_overrides
    }

    /// Returns whether the override for `slot_key` names `identity`.
    ///
    /// Slots without an override return `false` even for the primary owner.
    #[must_use]
    pub fn is_slot_owned_by<R>(
        &self,
        slot_key: &str,
        identity: &PersonIdentity,
        roster: Option<&R>,
    ) -> bool
    where
        R: RosterLookup + ?Sized,
    {
        self.slot_overrides
            .get(slot_key)
            .is_some_and(|owner| identity.matches(owner, roster))
    }

    /// Returns whether any slot override names `identity`.
    #[must_use]
    pub fn is_any_slot_owned_by<R>(&self, identity: &PersonIdentity, roster: Option<&R>) -> bool
    where
        R: RosterLookup + ?Sized,
    {
        self.slot_overrides
            .values()
            .any(|owner| identity.matches(owner, roster))
    }

    /// Returns whether `identity` matches the primary owner.
    #[must_use]
    pub fn is_primary_owner<R>(&self, identity: &PersonIdentity, roster: Option<&R>) -> bool
    where
        R: RosterLookup + ?Sized,
    {
        identity.matches(self.primary_owner_name(), roster)
    }

    /// Returns whether `identity` counts as a substitute in this class.
    ///
    /// A class without overrides has no substitutes. Once any override
    /// exists, every caller who is not the primary owner is a potential
    /// substitute; callers confirm an actual slot with
    /// [`Self::is_slot_owned_by`] or [`Self::is_any_slot_owned_by`].
    #[must_use]
    pub fn is_override_substitute<R>(&self, identity: &PersonIdentity, roster: Option<&R>) -> bool
    where
        R: RosterLookup + ?Sized,
    {
        if self.slot_overrides.is_empty() {
            return false;
        }

        !self.is_primary_owner(identity, roster)
    }
}

/// Per-enrollment teacher assignment flag.
///
/// Math enrollments record the substitute flag on the enrollment itself;
/// other subjects leave it unset and derive it from the class overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentAssignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    substitute_flag: Option<bool>,
}

impl EnrollmentAssignment {
    /// Creates an enrollment assignment with an optional recorded flag.
    #[must_use]
    pub fn new(substitute_flag: Option<bool>) -> Self {
        Self { substitute_flag }
    }

    /// Returns the recorded flag, if any.
    #[must_use]
    pub fn substitute_flag(&self) -> Option<bool> {
        self.substitute_flag
    }
}

/// Combines both substitute signals.
///
/// A recorded enrollment flag wins. Otherwise the class override rule
/// applies; with no assignment either, the caller is not a substitute.
#[must_use]
pub fn resolve_substitute<R>(
    assignment: Option<&ClassSlotAssignment>,
    enrollment: Option<&EnrollmentAssignment>,
    identity: &PersonIdentity,
    roster: Option<&R>,
) -> bool
where
    R: RosterLookup + ?Sized,
{
    if let Some(flag) = enrollment.and_then(EnrollmentAssignment::substitute_flag) {
        return flag;
    }

    assignment.is_some_and(|assignment| assignment.is_override_substitute(identity, roster))
}

#[cfg(test)]
mod tests {
    use super::{ClassSlotAssignment, EnrollmentAssignment, SlotKey, resolve_substitute};
    use crate::name_matching::PersonIdentity;
    use crate::roster::RosterEntry;

    const NO_ROSTER: Option<&[RosterEntry]> = None;

    fn class(class_id: &str, primary_owner_name: &str) -> ClassSlotAssignment {
        ClassSlotAssignment::new(class_id, primary_owner_name).unwrap_or_else(|_| unreachable!())
    }

    fn slot(day: &str, period: &str) -> SlotKey {
        SlotKey::new(day, period).unwrap_or_else(|_| unreachable!())
    }

    fn english_class() -> ClassSlotAssignment {
        class("eng-a", "Kim")
            .with_slot_override(slot("월", "1"), "Kim")
            .with_slot_override(slot("화", "1"), "이선생")
    }

    fn person(name: &str, alternate: Option<&str>) -> PersonIdentity {
        PersonIdentity::new(name, alternate.map(str::to_owned))
    }

    #[test]
    fn slot_key_keeps_dashes_in_period() {
        let key = "월-1-1".parse::<SlotKey>();
        assert!(matches!(key, Ok(ref key) if key.as_str() == "월-1-1"));
        assert_eq!(slot("화", "2").to_string(), "화-2");
    }

    #[test]
    fn slot_key_rejects_missing_parts() {
        assert!("월".parse::<SlotKey>().is_err());
        assert!("-1".parse::<SlotKey>().is_err());
        assert!("월-".parse::<SlotKey>().is_err());
        assert!(SlotKey::new("월-화", "1").is_err());
    }

    #[test]
    fn specific_slot_matches_override() {
        let class = english_class();
        assert!(class.is_slot_owned_by("월-1", &person("Kim", None), NO_ROSTER));
        assert!(class.is_slot_owned_by("화-1", &person("이선생", None), NO_ROSTER));
    }

    #[test]
    fn slot_without_override_is_not_owned() {
        let class = english_class();
        assert!(!class.is_slot_owned_by("수-1", &person("Kim", None), NO_ROSTER));
    }

    #[test]
    fn any_slot_matches_by_alternate_name() {
        let class = english_class();
        assert!(class.is_any_slot_owned_by(&person("Lee", Some("이선생")), NO_ROSTER));
        assert!(!class.is_any_slot_owned_by(&person("Park", None), NO_ROSTER));
    }

    #[test]
    fn any_slot_matches_through_roster() {
        let roster = vec![
            RosterEntry::new("s2", "이선생")
                .unwrap_or_else(|_| unreachable!())
                .with_alternate_name(Some("Lee".to_owned())),
        ];
        let class = english_class();
        assert!(class.is_any_slot_owned_by(&person("Lee", None), Some(&roster)));
    }

    #[test]
    fn class_without_overrides_has_no_substitutes() {
        let class = class("eng-b", "Kim");

        for name in ["Kim", "이선생", "Anyone", ""] {
            assert!(!class.is_any_slot_owned_by(&person(name, None), NO_ROSTER));
            assert!(!class.is_override_substitute(&person(name, None), NO_ROSTER));
        }
    }

    #[test]
    fn primary_owner_is_not_a_substitute() {
        let class = english_class();
        assert!(!class.is_override_substitute(&person("Kim", None), NO_ROSTER));
    }

    #[test]
    fn non_primary_caller_is_a_substitute_once_overrides_exist() {
        let class = english_class();
        assert!(class.is_override_substitute(&person("이선생", Some("이선생")), NO_ROSTER));
    }

    #[test]
    fn empty_primary_owner_makes_everyone_a_substitute() {
        let class = class("eng-c", "").with_slot_override(slot("월", "1"), "Kim");
        assert!(class.is_override_substitute(&person("Kim", None), NO_ROSTER));
    }

    #[test]
    fn recorded_enrollment_flag_wins() {
        let kim = person("Kim", None);

        assert!(resolve_substitute(
            Some(&class("math-a", "Kim")),
            Some(&EnrollmentAssignment::new(Some(true))),
            &kim,
            NO_ROSTER
        ));
        assert!(!resolve_substitute(
            Some(&english_class()),
            Some(&EnrollmentAssignment::new(Some(false))),
            &person("이선생", None),
            NO_ROSTER
        ));
    }

    #[test]
    fn unrecorded_flag_falls_back_to_overrides() {
        let class = english_class();

        assert!(!resolve_substitute(Some(&class), None, &person("Kim", None), NO_ROSTER));
        assert!(!resolve_substitute(
            Some(&class),
            Some(&EnrollmentAssignment::default()),
            &person("Kim", None),
            NO_ROSTER
        ));
        assert!(resolve_substitute(
            Some(&class),
            None,
            &person("이선생", Some("이선생")),
            NO_ROSTER
        ));
    }

    #[test]
    fn missing_class_is_not_a_substitute() {
        assert!(!resolve_substitute(None, None, &person("Kim", None), NO_ROSTER));
    }

    #[test]
    fn assignment_deserializes_from_snapshot_document() {
        let parsed = serde_json::from_str::<ClassSlotAssignment>(
            r#"{"class_id":"eng-a","primary_owner_name":"Kim","slot_overrides":{"화-1":"이선생"}}"#,
        );

        assert!(parsed.as_ref().is_ok_and(|class| {
            class.is_slot_owned_by("화-1", &person("이선생", None), NO_ROSTER)
        }));
    }

    #[test]
    fn legacy_override_key_does_not_hide_valid_keys() {
        let parsed = serde_json::from_str::<ClassSlotAssignment>(
            r#"{"class_id":"eng-a","primary_owner_name":"Kim","slot_overrides":{"월1":"Lee","월-2":"Park"}}"#,
        );
        assert!(parsed.is_ok());

        let Ok(class) = parsed else {
            return;
        };
        let park = person("Park", None);
        let lee = person("Lee", None);

        assert!(class.is_slot_owned_by(slot("월", "2").as_str(), &park, NO_ROSTER));
        assert!(!class.is_slot_owned_by(slot("월", "1").as_str(), &lee, NO_ROSTER));
        assert_eq!(class.slot_overrides().len(), 2);
    }
}
