//! Index page and fallback responses.

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use chrono::Datelike;
use serde::Serialize;
use serde_json::json;

use crate::app::SharedState;
use crate::templates::INDEX;

use super::api::err_json;
use super::api::generate::{DEFAULT_BG, DEFAULT_COLOR, DEFAULT_SIZE, replay_path};

/// Value pre-filled in the form and encoded in the initial preview.
pub const DEFAULT_VALUE: &str = "https://www.google.com";

/// `Cache-Control` for the index page and static assets (one year).
pub const LONG_CACHE: HeaderValue = HeaderValue::from_static("max-age=31536000");

#[derive(Serialize)]
struct IndexPage<'a> {
    year: i32,
    site_name: &'a str,
    site_website: &'a str,
    default_value: &'a str,
    base64_image: &'a str,
    path: String,
    /// Link shown under the form; opens the base64 output directly.
    replay_url: String,
    generate_path: String,
    static_prefix: String,
}

/// GET /
pub async fn index(State(state): State<SharedState>) -> Response {
    let config = state.config();
    let path = replay_path(
        &config.base_url,
        DEFAULT_VALUE,
        DEFAULT_SIZE,
        DEFAULT_COLOR,
        DEFAULT_BG,
    );
    let page = IndexPage {
        year: chrono::Local::now().year(),
        site_name: &config.site_name,
        site_website: &config.site_website,
        default_value: DEFAULT_VALUE,
        base64_image: state.default_preview(),
        replay_url: format!("{path}&return=base64"),
        path,
        generate_path: format!("{}/api/generate", config.base_url),
        static_prefix: config.static_prefix(),
    };

    match state.templates().render(INDEX, &page) {
        Ok(html) => ([(header::CACHE_CONTROL, LONG_CACHE)], Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render index: {e}");
            err_json(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()).into_response()
        }
    }
}

/// Fallback for unmatched routes. API clients get a JSON body.
pub async fn not_found(uri: Uri) -> Response {
    let path = uri.path();
    if !is_api_path(path) {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }

    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({
            "error": "Not Found",
            "path": path,
        })),
    )
        .into_response()
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}
