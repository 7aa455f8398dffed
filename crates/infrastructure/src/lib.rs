//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_access_repository;
mod in_memory_roster_repository;
mod postgres_access_config_repository;
mod postgres_audit_repository;
mod snapshot_loader;
mod tracing_audit_repository;

pub use in_memory_access_repository::InMemoryAccessRepository;
pub use in_memory_roster_repository::InMemoryRosterRepository;
pub use postgres_access_config_repository::PostgresAccessConfigRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use snapshot_loader::{TenantSnapshot, load_snapshots, parse_snapshots, seed_repositories};
pub use tracing_audit_repository::TracingAuditRepository;
