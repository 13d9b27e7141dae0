//! Basic authentication gate in front of every command endpoint.
//!
//! Credentials live in a `users.json` file mapping username → bcrypt hash,
//! loaded once at startup into an immutable [`CredentialStore`] snapshot.
//! The middleware fails closed: a missing header, an undecodable header, an
//! unknown user, and a wrong secret all produce the same 401 response with
//! no distinguishing detail.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use axum::Json;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use scout_types::ErrorBody;
use tracing::{debug, warn};

use crate::state::AppState;

/// Immutable username → bcrypt-hash snapshot loaded at startup.  Never
/// mutated at runtime.
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    /// Load the snapshot from a JSON file of the form
    /// `{"alice": "$2b$...", "bob": "$2b$..."}`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read credential file {}", path.display()))?;
        let users: HashMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("could not parse credential file {}", path.display()))?;
        Ok(Self { users })
    }

    /// Build a store from an in-memory map.
    pub fn from_users(users: HashMap<String, String>) -> Self {
        Self { users }
    }

    /// Stored hash for `username`, if any.
    pub fn lookup(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    /// Verify `secret` against the stored hash for `username`.
    ///
    /// Fails closed: unknown users and hash errors both return `false`.
    pub fn authenticate(&self, username: &str, secret: &str) -> bool {
        match self.lookup(username) {
            Some(hash) => bcrypt::verify(secret, hash).unwrap_or(false),
            None => false,
        }
    }
}

/// Axum middleware gating requests behind Basic authentication.
///
/// On success the request proceeds to its handler; every failure path
/// returns an identical 401 with a `WWW-Authenticate` challenge.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match credentials_from_header(&req) {
        Some((username, secret)) if state.credentials.authenticate(&username, &secret) => {
            debug!(user = %username, "authenticated");
            next.run(req).await
        }
        Some((username, _)) => {
            warn!(user = %username, "authentication rejected");
            unauthorized()
        }
        None => {
            warn!("missing or malformed authorization header");
            unauthorized()
        }
    }
}

/// Extract `(username, secret)` from a `Basic` authorization header.
/// Returns `None` for any malformation.
fn credentials_from_header(req: &Request) -> Option<(String, String)> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(header).ok()?;
    let payload = String::from_utf8(decoded).ok()?;
    let (username, secret) = payload.split_once(':')?;
    Some((username.to_string(), secret.to_string()))
}

fn unauthorized() -> Response {
    let body = ErrorBody {
        action: "auth".to_string(),
        context: "basic auth".to_string(),
        message: "unauthorized".to_string(),
    };
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=Restricted")],
        Json(body),
    )
        .into_response()
}
