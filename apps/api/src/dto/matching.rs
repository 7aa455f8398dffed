mod conversions;
mod types;

pub use types::{
    ClassesTaughtQuery, ClassesTaughtResponse, ImportRecordRequest, ImportRecordsRequest,
    ImportRecordsResponse, MatchResultResponse, SlotOwnerRequest, SlotOwnerResponse,
    TeacherMatchRequest, TeacherMatchResponse,
};
