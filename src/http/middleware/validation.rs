//! Validation middleware.
//! Requires a header on every request that was not marked for bypass.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::bypass::BypassExt;
use crate::observability::metrics;

/// State required for validation.
#[derive(Clone, Debug)]
pub struct ValidationState {
    pub required_header: HeaderName,
}

pub async fn validation_middleware(
    State(state): State<ValidationState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // Exceptions skip the check entirely.
    if req.bypass_validation() {
        tracing::debug!(path = %req.uri().path(), "Validation skipped");
        return next.run(req).await;
    }

    if req.headers().contains_key(&state.required_header) {
        return next.run(req).await;
    }

    tracing::warn!(
        path = %req.uri().path(),
        header = %state.required_header,
        "Request failed validation"
    );
    metrics::record_validation_rejected();
    (
        StatusCode::UNAUTHORIZED,
        format!("Missing {} header", state.required_header),
    )
        .into_response()
}
