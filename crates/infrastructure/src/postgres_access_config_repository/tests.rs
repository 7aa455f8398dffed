use hagwon_application::AccessConfigRepository;
use hagwon_core::TenantId;
use hagwon_domain::{AppTab, Permission, RoleAccessTable, RolePermissionPatches, UserRole};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresAccessConfigRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for access config tests: {error}");
    }

    Some(pool)
}

#[tokio::test]
async fn tab_overrides_roundtrip_and_replace() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresAccessConfigRepository::new(pool);
    let tenant_id = TenantId::new();

    let missing = repository.find_tab_overrides(tenant_id).await;
    assert!(matches!(missing, Ok(None)));

    let first = RoleAccessTable::new().with_role(UserRole::User, [AppTab::Calendar]);
    let second = RoleAccessTable::new().with_role(UserRole::Manager, [AppTab::Gantt]);
    assert!(
        repository
            .save_tab_overrides(tenant_id, first)
            .await
            .is_ok()
    );
    assert!(
        repository
            .save_tab_overrides(tenant_id, second.clone())
            .await
            .is_ok()
    );

    let stored = repository.find_tab_overrides(tenant_id).await;
    assert!(matches!(stored, Ok(Some(ref table)) if table == &second));
}

#[tokio::test]
async fn permission_patches_roundtrip() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresAccessConfigRepository::new(pool);
    let tenant_id = TenantId::new();
    let patches =
        RolePermissionPatches::new().with_patch(UserRole::Manager, Permission::GanttDelete, true);

    assert!(
        repository
            .save_permission_patches(tenant_id, patches.clone())
            .await
            .is_ok()
    );

    let stored = repository.find_permission_patches(tenant_id).await;
    assert!(matches!(stored, Ok(Some(ref value)) if value == &patches));
}
