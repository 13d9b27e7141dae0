//! Command endpoint handlers.
//!
//! Each symbolic action gets one thin handler that decodes the
//! `{"duration": n}` body and hands a [`Command`] to the engine.  Success is
//! an empty 204; failures render through [`ApiError`].

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use scout_engine::Command;
use scout_types::{ActionRequest, Channel, ChannelState, CommandKind, ScoutError};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

type Body = Result<Json<ActionRequest>, JsonRejection>;

pub async fn drive_forward(State(app): State<AppState>, body: Body) -> Result<StatusCode, ApiError> {
    run_command(&app, CommandKind::Forward, "DriveForward", body)
}

pub async fn drive_reverse(State(app): State<AppState>, body: Body) -> Result<StatusCode, ApiError> {
    run_command(&app, CommandKind::Reverse, "DriveReverse", body)
}

pub async fn turn_left(State(app): State<AppState>, body: Body) -> Result<StatusCode, ApiError> {
    run_command(&app, CommandKind::TurnLeft, "TurnLeft", body)
}

pub async fn turn_right(State(app): State<AppState>, body: Body) -> Result<StatusCode, ApiError> {
    run_command(&app, CommandKind::TurnRight, "TurnRight", body)
}

pub async fn camera_up(State(app): State<AppState>, body: Body) -> Result<StatusCode, ApiError> {
    run_command(&app, CommandKind::CameraUp, "CameraUp", body)
}

pub async fn camera_down(State(app): State<AppState>, body: Body) -> Result<StatusCode, ApiError> {
    run_command(&app, CommandKind::CameraDown, "CameraDown", body)
}

/// GET and POST `/api/v1/stop`.  Bypasses the busy check and never takes a
/// body; per-channel driver failures surface as a 500 after the remaining
/// channels have still been stopped.
pub async fn all_stop(State(app): State<AppState>) -> Result<StatusCode, ApiError> {
    debug!(action = "AllStop", "all stop");
    let mut failures = app.engine.all_stop();
    match failures.is_empty() {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(ApiError::new("AllStop", "engine all-stop", failures.remove(0))),
    }
}

/// GET `/api/v1/status` — per-channel direction/enable/fault snapshot.  This
/// is the operator surface for spotting channels flagged by a failed
/// release.
pub async fn status(State(app): State<AppState>) -> Json<BTreeMap<Channel, ChannelState>> {
    Json(app.engine.snapshot())
}

fn run_command(
    app: &AppState,
    kind: CommandKind,
    action: &'static str,
    body: Body,
) -> Result<StatusCode, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        ApiError::new(
            action,
            "json decoding",
            ScoutError::MalformedRequest(rejection.body_text()),
        )
    })?;
    debug!(action, duration = request.duration, "command received");

    app.engine
        .submit(Command::new(kind, request.duration))
        .map_err(|err| ApiError::new(action, "engine submit", err))?;
    Ok(StatusCode::NO_CONTENT)
}
