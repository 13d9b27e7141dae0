use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use http_body_util::BodyExt;
use scout_engine::Engine;
use scout_hal::SimMotorDriver;
use scout_server::auth::CredentialStore;
use scout_server::state::AppState;
use tower::ServiceExt;

const USER: &str = "operator";
const SECRET: &str = "trail-secret";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a router with one known operator credential and a simulated shield.
fn app() -> axum::Router {
    let hash = bcrypt::hash(SECRET, 4).expect("bcrypt hash");
    let store = CredentialStore::from_users(HashMap::from([(USER.to_string(), hash)]));
    let engine = Engine::new(Box::new(SimMotorDriver::new()));
    scout_server::build_router(AppState::new(engine, Arc::new(store)))
}

fn auth_header() -> String {
    format!("Basic {}", STANDARD.encode(format!("{USER}:{SECRET}")))
}

/// Send a request via `oneshot` and return the raw response.
async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

/// POST a command body with the operator credential.
async fn post_command(app: axum::Router, uri: &str, body: &str) -> Response {
    let auth = auth_header();
    send(app, "POST", uri, Some(auth.as_str()), Some(body)).await
}

// ---------------------------------------------------------------------------
// Auth gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn all_auth_failures_look_identical() {
    let app = app();
    let wrong_secret = format!("Basic {}", STANDARD.encode(format!("{USER}:wrong")));
    let unknown_user = format!("Basic {}", STANDARD.encode("mallory:trail-secret"));
    let attempts: Vec<Option<&str>> = vec![
        None,
        Some("Bearer some-token"),
        Some("Basic !!!not-base64!!!"),
        Some(wrong_secret.as_str()),
        Some(unknown_user.as_str()),
    ];

    let mut bodies = Vec::new();
    for auth in attempts {
        let response = send(
            app.clone(),
            "POST",
            "/api/v1/drive/forward",
            auth,
            Some("{\"duration\": 1}"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
        bodies.push(body_json(response).await);
    }
    // No failure cause is distinguishable from the caller's standpoint.
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn rejected_requests_reach_no_hardware() {
    let app = app();
    let response = send(
        app.clone(),
        "POST",
        "/api/v1/drive/forward",
        None,
        Some("{\"duration\": -1}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Every channel still idle: a turn command succeeds immediately.
    let response = post_command(app, "/api/v1/drive/turnleft", "{\"duration\": 0}").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Command endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn forward_returns_no_content() {
    let response = post_command(app(), "/api/v1/drive/forward", "{\"duration\": 0}").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn malformed_body_returns_envelope() {
    let response = post_command(app(), "/api/v1/drive/forward", "{\"duration\": ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["action"], "DriveForward");
    assert_eq!(json["context"], "json decoding");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn conflicting_command_returns_409() {
    let app = app();
    let response = post_command(app.clone(), "/api/v1/drive/forward", "{\"duration\": -1}").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_command(app.clone(), "/api/v1/drive/turnleft", "{\"duration\": 1}").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["action"], "TurnLeft");
    assert!(json["message"].as_str().unwrap().contains("busy"));

    // The camera channel is not part of the forward hold.
    let response = post_command(app.clone(), "/api/v1/camera/up", "{\"duration\": 0}").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // All-stop releases the hold; drive commands work again.
    let auth = auth_header();
    let response = send(app.clone(), "GET", "/api/v1/stop", Some(auth.as_str()), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = post_command(app, "/api/v1/drive/turnleft", "{\"duration\": 0}").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn stop_accepts_get_and_post_and_is_idempotent() {
    let app = app();
    let auth = auth_header();
    for method in ["GET", "POST", "GET"] {
        let response = send(app.clone(), method, "/api/v1/stop", Some(auth.as_str()), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn status_reflects_engaged_and_idle_channels() {
    let app = app();
    let auth = auth_header();

    let response = post_command(app.clone(), "/api/v1/drive/forward", "{\"duration\": -1}").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(app.clone(), "GET", "/api/v1/status", Some(auth.as_str()), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["drive-left"]["direction"], "forward");
    assert_eq!(json["drive-right"]["direction"], "forward");
    assert_eq!(json["drive-right"]["enable"], "on");
    assert_eq!(json["camera-tilt"]["direction"], "idle");

    let response = send(app.clone(), "POST", "/api/v1/stop", Some(auth.as_str()), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(app, "GET", "/api/v1/status", Some(auth.as_str()), None).await;
    let json = body_json(response).await;
    for channel in ["drive-left", "drive-right", "camera-tilt", "aux"] {
        assert_eq!(json[channel]["direction"], "idle", "{channel}");
        assert_eq!(json[channel]["enable"], "off", "{channel}");
        assert_eq!(json[channel]["faulted"], false, "{channel}");
    }
}

// ---------------------------------------------------------------------------
// Static assets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_sits_behind_auth() {
    let app = app();
    let response = send(app.clone(), "GET", "/", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let auth = auth_header();
    let response = send(app, "GET", "/", Some(auth.as_str()), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let ct = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(ct.to_str().unwrap().contains("text/html"));
}

#[tokio::test]
async fn static_assets_are_public() {
    let app = app();
    let response = send(app.clone(), "GET", "/static/scout.css", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(app, "GET", "/static/missing.js", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["action"], "Static");
}
