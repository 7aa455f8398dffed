use std::str::FromStr;

use hagwon_core::AppResult;
use hagwon_domain::{EnrollmentAssignment, ImportableRecord, MatchResult, PersonIdentity, SlotKey};

use super::types::{
    ClassesTaughtQuery, ImportRecordRequest, MatchResultResponse, SlotOwnerRequest,
    TeacherMatchRequest,
};

impl TeacherMatchRequest {
    /// Returns the teacher the candidate is compared against.
    pub fn identity(&self) -> PersonIdentity {
        PersonIdentity::new(self.name.as_str(), self.alternate_name.clone())
    }
}

impl ClassesTaughtQuery {
    /// Returns the teacher whose classes are listed.
    pub fn identity(&self) -> PersonIdentity {
        PersonIdentity::new(self.name.as_str(), self.alternate_name.clone())
    }
}

impl SlotOwnerRequest {
    /// Returns the teacher asking about the slot.
    pub fn identity(&self) -> PersonIdentity {
        PersonIdentity::new(self.name.as_str(), self.alternate_name.clone())
    }

    /// Parses the slot key.
    pub fn slot_key(&self) -> AppResult<SlotKey> {
        SlotKey::from_str(&self.slot_key)
    }

    /// Returns the enrollment record when a substitute flag was supplied.
    pub fn enrollment(&self) -> Option<EnrollmentAssignment> {
        self.substitute_flag
            .map(|flag| EnrollmentAssignment::new(Some(flag)))
    }
}

impl TryFrom<ImportRecordRequest> for ImportableRecord {
    type Error = hagwon_core::AppError;

    fn try_from(value: ImportRecordRequest) -> Result<Self, Self::Error> {
        Self::new(
            value.record_id,
            value.subject_name,
            value.external_id,
            value.qualifier,
        )
    }
}

impl From<MatchResult> for MatchResultResponse {
    fn from(value: MatchResult) -> Self {
        Self {
            entity_id: value.entity_id,
            entity_name: value.entity_name,
            match_tier: value.match_tier.as_str().to_owned(),
        }
    }
}
