//! [`ApiError`] – maps engine and decode failures onto HTTP responses.
//!
//! Every failure is logged with its action/context fields and rendered as
//! the JSON envelope `{"action","context","message"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scout_types::{ErrorBody, ScoutError};
use tracing::error;

/// A failed request: which action it belonged to, what the server was doing
/// when it failed, and the underlying error.
#[derive(Debug)]
pub struct ApiError {
    pub action: &'static str,
    pub context: &'static str,
    pub err: ScoutError,
}

impl ApiError {
    pub fn new(action: &'static str, context: &'static str, err: ScoutError) -> Self {
        Self {
            action,
            context,
            err,
        }
    }

    fn status(&self) -> StatusCode {
        match self.err {
            ScoutError::AuthRejected => StatusCode::UNAUTHORIZED,
            ScoutError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ScoutError::ChannelBusy(_) => StatusCode::CONFLICT,
            ScoutError::Driver { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ScoutError::AssetUnavailable(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(action = self.action, context = self.context, "{}", self.err);
        let body = ErrorBody {
            action: self.action.to_string(),
            context: self.context.to_string(),
            message: self.err.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
