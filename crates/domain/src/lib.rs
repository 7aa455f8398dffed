//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod name_matching;
mod record_matching;
mod roster;
mod schedule;
mod security;
mod tabs;
mod user;

pub use access::{
    Capability, RoleAccessTable, RolePermissionPatches, default_permission_table,
    default_tab_table,
};
pub use name_matching::{PersonIdentity, names_match, staff_ids_match};
pub use record_matching::{ImportableRecord, MatchResult, MatchTier, match_all, match_record};
pub use roster::{IndexedRoster, RosterEntry, RosterLookup};
pub use schedule::{ClassSlotAssignment, EnrollmentAssignment, SlotKey, resolve_substitute};
pub use security::{AuditAction, Permission, UserRole};
pub use tabs::{AppTab, TabGroup};
pub use user::{AccountStatus, UserProfile};
