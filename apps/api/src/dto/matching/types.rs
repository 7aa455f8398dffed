use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Asks whether `candidate` names the given teacher.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/teacher-match-request.ts"
)]
pub struct TeacherMatchRequest {
    pub candidate: String,
    pub name: String,
    pub alternate_name: Option<String>,
}

/// Teacher match verdict.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/teacher-match-response.ts"
)]
pub struct TeacherMatchResponse {
    pub matches: bool,
}

/// Query string for the classes a teacher teaches.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/classes-taught-query.ts"
)]
pub struct ClassesTaughtQuery {
    pub name: String,
    pub alternate_name: Option<String>,
}

/// Class ids taught by a teacher, sorted.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/classes-taught-response.ts"
)]
pub struct ClassesTaughtResponse {
    pub class_ids: Vec<String>,
}

/// Asks who owns one slot of a class.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/slot-owner-request.ts"
)]
pub struct SlotOwnerRequest {
    pub class_id: String,
    /// Slot key in `<day>-<period>` form, e.g. `화-2`.
    pub slot_key: String,
    pub name: String,
    pub alternate_name: Option<String>,
    /// Substitute flag recorded on the student enrollment, if any.
    pub substitute_flag: Option<bool>,
}

/// Slot ownership verdict.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/slot-owner-response.ts"
)]
pub struct SlotOwnerResponse {
    pub owned: bool,
    pub substitute: bool,
}

/// One imported row to link to a student.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/import-record-request.ts"
)]
pub struct ImportRecordRequest {
    pub record_id: String,
    pub subject_name: Option<String>,
    pub external_id: Option<String>,
    pub qualifier: Option<String>,
}

/// Batch of imported rows.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/import-records-request.ts"
)]
pub struct ImportRecordsRequest {
    pub records: Vec<ImportRecordRequest>,
}

/// Student linked to an imported row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/match-result-response.ts"
)]
pub struct MatchResultResponse {
    pub entity_id: String,
    pub entity_name: String,
    /// One of `external-id`, `name+qualifier`, `name-only`.
    pub match_tier: String,
}

/// Links keyed by record id; unmatched rows are absent.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/import-records-response.ts"
)]
pub struct ImportRecordsResponse {
    pub matches: BTreeMap<String, MatchResultResponse>,
}
