mod cors;

use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use hagwon_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

use self::cors::build_cors_layer;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let access_routes = Router::new()
        .route("/api/access/tabs", get(handlers::access::list_tabs_handler))
        .route(
            "/api/access/tab-groups",
            get(handlers::access::list_tab_groups_handler),
        )
        .route(
            "/api/access/permissions",
            get(handlers::access::list_permissions_handler),
        )
        .route(
            "/api/access/tab-overrides",
            put(handlers::access::update_tab_overrides_handler),
        )
        .route(
            "/api/access/permission-patches",
            put(handlers::access::update_permission_patches_handler),
        )
        .route(
            "/api/access/assignable-roles",
            get(handlers::access::assignable_roles_handler),
        )
        .route(
            "/api/users/{subject}/role",
            put(handlers::access::change_user_role_handler),
        );

    let matching_routes = Router::new()
        .route(
            "/api/matching/teacher",
            post(handlers::matching::teacher_match_handler),
        )
        .route(
            "/api/matching/classes",
            get(handlers::matching::classes_taught_handler),
        )
        .route(
            "/api/matching/my-classes",
            get(handlers::matching::my_classes_handler),
        )
        .route(
            "/api/matching/slot-owner",
            post(handlers::matching::slot_owner_handler),
        )
        .route(
            "/api/matching/import-records",
            post(handlers::matching::import_records_handler),
        );

    let protected_routes = Router::new()
        .merge(access_routes)
        .merge(matching_routes)
        .route_layer(from_fn(middleware::require_identity));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
