use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use hagwon_core::AppError;
use tower_http::cors::CorsLayer;

use crate::middleware::{DISPLAY_NAME_HEADER, SUBJECT_HEADER, TENANT_HEADER};

pub(super) fn build_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(SUBJECT_HEADER),
            HeaderName::from_static(TENANT_HEADER),
            HeaderName::from_static(DISPLAY_NAME_HEADER),
        ]))
}

#[cfg(test)]
mod tests {
    use super::build_cors_layer;

    #[test]
    fn frontend_url_must_be_a_header_value() {
        assert!(build_cors_layer("http://localhost:3000").is_ok());
        assert!(build_cors_layer("http://bad\nhost").is_err());
    }
}
