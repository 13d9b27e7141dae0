//! `scout-server` – authenticated HTTP surface for the actuator engine.
//!
//! One POST endpoint per symbolic action plus a GET/POST all-stop, a
//! per-channel status snapshot, and an embedded control page.  Every route
//! except the static asset bundle sits behind Basic authentication.

pub mod auth;
pub mod config;
pub mod embed;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use scout_engine::Engine;
use scout_hal::SimMotorDriver;
use tower_http::trace::TraceLayer;

use crate::auth::CredentialStore;
use crate::config::Config;
use crate::state::AppState;

/// Build the axum Router with all routes and middleware.
/// Used by [`serve`] and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/v1/drive/forward", post(routes::drive_forward))
        .route("/api/v1/drive/reverse", post(routes::drive_reverse))
        .route("/api/v1/drive/turnleft", post(routes::turn_left))
        .route("/api/v1/drive/turnright", post(routes::turn_right))
        .route("/api/v1/camera/up", post(routes::camera_up))
        .route("/api/v1/camera/down", post(routes::camera_down))
        .route(
            "/api/v1/stop",
            get(routes::all_stop).post(routes::all_stop),
        )
        .route("/api/v1/status", get(routes::status))
        .route("/", get(embed::index))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .merge(protected)
        .route("/static/{*path}", get(embed::static_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server: load the credential snapshot, hand the driver to the
/// engine, and serve until the process exits.
///
/// The shield driver is wired in here and nowhere else; swap
/// [`SimMotorDriver`] for a real shield driver when running on the rig.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let credentials = Arc::new(CredentialStore::load(&config.users_file)?);
    let engine = Engine::new(Box::new(SimMotorDriver::new()));
    let state = AppState::new(engine, credentials);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "scout server listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
