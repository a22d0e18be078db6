//! Central error-translation middleware
//!
//! One layer wraps the whole router and turns every failure into the
//! structured [`ErrorResponse`] body, whether it came from a handler (as an
//! [`ApiError`] stashed in response extensions) or from below the handler
//! layer (extractor rejections, unknown method or route).

use axum::{
    Json,
    body::to_bytes,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::error::{ApiError, ErrorResponse, FieldError};

/// Upper bound on how much of a rejection body is read back as the message.
const MAX_DETAIL_BYTES: usize = 16 * 1024;

/// Intercept every error response, render the structured body, and log the
/// interception with severity graded by status class.
pub async fn error_pipeline(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let stashed = response.extensions().get::<Arc<ApiError>>().cloned();
    let (status, message, field_errors) = match stashed {
        Some(err) => (err.status(), err.public_message(), err.field_errors()),
        None => {
            let detail = body_text(response).await;
            classify_bare(status, detail)
        }
    };

    let body = ErrorResponse::of(status, message, path, field_errors);
    let code = body.status;
    if code >= 500 {
        error!(
            trace_id = %body.trace_id,
            status = code,
            %method,
            path = %body.path,
            "{}",
            body.message
        );
    } else if matches!(code, 401 | 403 | 409) {
        warn!(
            trace_id = %body.trace_id,
            status = code,
            %method,
            path = %body.path,
            "{}",
            body.message
        );
    } else {
        debug!(
            trace_id = %body.trace_id,
            status = code,
            %method,
            path = %body.path,
            "{}",
            body.message
        );
    }

    (status, Json(body)).into_response()
}

/// Map an error response that carries no [`ApiError`] onto the documented
/// taxonomy. Extractor rejections for unreadable payloads arrive as 400,
/// 415, or 422 and are all surfaced as 400 malformed-payload failures.
fn classify_bare(
    status: StatusCode,
    detail: Option<String>,
) -> (StatusCode, String, Option<Vec<FieldError>>) {
    match status {
        StatusCode::NOT_FOUND => (status, "Resource not found".to_string(), None),
        StatusCode::METHOD_NOT_ALLOWED => (status, "Method not allowed".to_string(), None),
        StatusCode::BAD_REQUEST
        | StatusCode::UNSUPPORTED_MEDIA_TYPE
        | StatusCode::UNPROCESSABLE_ENTITY => (
            StatusCode::BAD_REQUEST,
            detail.unwrap_or_else(|| "Malformed JSON request".to_string()),
            None,
        ),
        status if status.is_server_error() => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
            None,
        ),
        status => (
            status,
            detail.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            }),
            None,
        ),
    }
}

/// Read the plain-text detail out of a bare error response, if any.
async fn body_text(response: Response) -> Option<String> {
    let bytes = to_bytes(response.into_body(), MAX_DETAIL_BYTES).await.ok()?;
    let text = String::from_utf8(bytes.to_vec()).ok()?;
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
