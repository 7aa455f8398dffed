use std::sync::Arc;

use hagwon_application::{AccessConfigRepository, AccessService, AuditRepository, MatchingService};
use hagwon_core::AppError;
use hagwon_infrastructure::{
    InMemoryAccessRepository, InMemoryRosterRepository, PostgresAccessConfigRepository,
    PostgresAuditRepository, TracingAuditRepository, load_snapshots, seed_repositories,
};
use tracing::{info, warn};

use crate::api_config::ApiConfig;
use crate::state::AppState;

use super::connect_and_migrate;

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let roster_repository = Arc::new(InMemoryRosterRepository::new());
    let profile_repository = Arc::new(InMemoryAccessRepository::new());

    let (config_repository, audit_repository): (
        Arc<dyn AccessConfigRepository>,
        Arc<dyn AuditRepository>,
    ) = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect_and_migrate(database_url).await?;
            info!("persisting access configuration in postgres");
            let config_repository: Arc<dyn AccessConfigRepository> =
                Arc::new(PostgresAccessConfigRepository::new(pool.clone()));
            let audit_repository: Arc<dyn AuditRepository> =
                Arc::new(PostgresAuditRepository::new(pool));
            (config_repository, audit_repository)
        }
        None => {
            warn!("DATABASE_URL not set, access configuration is kept in memory");
            let config_repository: Arc<dyn AccessConfigRepository> = profile_repository.clone();
            let audit_repository: Arc<dyn AuditRepository> =
                Arc::new(TracingAuditRepository::new());
            (config_repository, audit_repository)
        }
    };

    match config.snapshot_path.as_deref() {
        Some(path) => {
            let snapshots = load_snapshots(path).await?;
            info!(
                path = %path.display(),
                tenants = snapshots.len(),
                "loaded academy snapshot"
            );
            seed_repositories(
                snapshots,
                &roster_repository,
                &profile_repository,
                config_repository.as_ref(),
            )
            .await?;
        }
        None => warn!("SNAPSHOT_PATH not set, rosters and profiles start empty"),
    }

    Ok(AppState {
        access_service: AccessService::new(config_repository, profile_repository, audit_repository),
        matching_service: MatchingService::new(roster_repository.clone(), roster_repository),
        frontend_url: config.frontend_url.clone(),
    })
}
