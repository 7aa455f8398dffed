//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod access_resolver;
mod access_service;
mod audit_ports;
mod matching_service;
mod roster_ports;

pub use access_ports::{AccessConfigRepository, UserProfileRepository};
pub use access_resolver::AccessResolver;
pub use access_service::{AccessService, AccessibleTabGroup};
pub use audit_ports::{AuditEvent, AuditRepository, AuditTarget};
pub use matching_service::MatchingService;
pub use roster_ports::{ClassAssignmentRepository, RosterRepository};
