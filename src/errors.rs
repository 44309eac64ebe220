use std::fmt::Display;

use axum::http::StatusCode;
use tracing::error;

pub type HandlerError = (StatusCode, String);

pub fn internal<E: Display>(e: E) -> HandlerError {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

pub fn bad_request<E: Display>(e: E) -> HandlerError {
    (StatusCode::BAD_REQUEST, e.to_string())
}
