use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use hagwon_core::{AppError, AppResult, TenantId, UserIdentity};

use crate::error::ApiResult;
use crate::state::AppState;

pub const SUBJECT_HEADER: &str = "x-hagwon-subject";
pub const TENANT_HEADER: &str = "x-hagwon-tenant";
pub const DISPLAY_NAME_HEADER: &str = "x-hagwon-display-name";

/// Rejects requests without gateway identity headers and exposes the caller
/// as a `UserIdentity` extension.
pub async fn require_identity(mut request: Request, next: Next) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok());
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok());

        // Server-to-server callers send neither header.
        if origin.is_some() || referer.is_some() {
            let allowed_origin = state.frontend_url.as_str();
            let origin_is_allowed = origin == Some(allowed_origin);
            let referer_is_allowed =
                referer.is_some_and(|value| value.starts_with(allowed_origin));

            if !origin_is_allowed && !referer_is_allowed {
                return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
            }
        }
    }

    Ok(next.run(request).await)
}

fn identity_from_headers(headers: &HeaderMap) -> AppResult<UserIdentity> {
    let subject = header_text(headers, SUBJECT_HEADER)?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let tenant_id = header_text(headers, TENANT_HEADER)?
        .ok_or_else(|| AppError::Unauthorized("academy tenant header is required".to_owned()))
        .and_then(|value| {
            TenantId::parse(value).map_err(|error| AppError::Unauthorized(error.to_string()))
        })?;
    let display_name = header_text(headers, DISPLAY_NAME_HEADER)?.unwrap_or(subject);

    Ok(UserIdentity::new(subject, display_name, tenant_id))
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> AppResult<Option<&'a str>> {
    headers
        .get(name)
        .map(|value| {
            std::str::from_utf8(value.as_bytes())
                .map(str::trim)
                .map_err(|_| AppError::Unauthorized(format!("header '{name}' is not valid text")))
        })
        .transpose()
        .map(|value| value.filter(|text| !text.is_empty()))
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
