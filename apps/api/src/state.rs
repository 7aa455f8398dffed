use hagwon_application::{AccessService, MatchingService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_service: AccessService,
    pub matching_service: MatchingService,
    pub frontend_url: String,
}
