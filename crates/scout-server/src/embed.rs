//! Embedded control page and static assets.
//!
//! The `static/` directory is compiled into the binary so the rig needs no
//! filesystem layout at runtime.

use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use scout_types::ScoutError;

use crate::error::ApiError;

#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// GET `/` — the embedded control page, behind auth.
pub async fn index() -> Result<Response, ApiError> {
    match <StaticAssets as Embed>::get("index.html") {
        Some(content) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            content.data.to_vec(),
        )
            .into_response()),
        None => Err(ApiError::new(
            "Index",
            "open index file",
            ScoutError::AssetUnavailable("index.html".to_string()),
        )),
    }
}

/// GET `/static/{*path}` — embedded assets, served without auth.
pub async fn static_asset(Path(path): Path<String>) -> Result<Response, ApiError> {
    match <StaticAssets as Embed>::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response())
        }
        None => Err(ApiError::new(
            "Static",
            "open asset",
            ScoutError::AssetUnavailable(path),
        )),
    }
}
