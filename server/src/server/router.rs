use axum::{
    Router,
    http::header,
    routing::{any, get},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeader;
use tower_http::trace::TraceLayer;

use crate::app::SharedState;
use super::{api, assets};

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    let config = state.config();
    let static_files = SetResponseHeader::if_not_present(
        ServeDir::new(&config.static_dir),
        header::CACHE_CONTROL,
        assets::LONG_CACHE,
    );

    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- QR code ---
        // Registered for every method so non-GET calls get a JSON 405.
        .route("/api/generate", any(api::generate::generate_qr))
        // --- Static files ---
        .nest_service(&config.static_prefix(), static_files)
        // --- Form page ---
        .route("/", get(assets::index))
        .fallback(assets::not_found)
        // --- Middleware ---
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_state;
    use crate::config::AppConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router_with_static_dir(static_dir: &str) -> Router {
        let state = build_state(AppConfig {
            base_url: "https://qr.example".into(),
            trusted_host: "qr.example".into(),
            static_dir: static_dir.into(),
            ..AppConfig::default()
        })
        .unwrap();
        create_router(state)
    }

    async fn send_get(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn status_reports_ok_and_version() {
        let response = send_get(router_with_static_dir("public"), "/status").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn index_is_served_at_root() {
        let response = send_get(router_with_static_dir("public"), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "max-age=31536000"
        );
    }

    #[tokio::test]
    async fn static_files_are_served_with_long_cache() {
        let dir = tempfile::Builder::new().prefix("assets").tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("js/app.js"), "console.log('qr');").unwrap();

        let name = dir.path().file_name().unwrap().to_str().unwrap().to_string();
        let router = router_with_static_dir(dir.path().to_str().unwrap());
        let uri = format!("/{name}/js/app.js");

        let response = send_get(router, &uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "max-age=31536000"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"console.log('qr');");
    }

    #[tokio::test]
    async fn unknown_api_path_is_json_404() {
        let response = send_get(router_with_static_dir("public"), "/api/nonexistent").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["path"], "/api/nonexistent");
    }

    #[tokio::test]
    async fn unknown_page_is_plain_404() {
        let response = send_get(router_with_static_dir("public"), "/foo").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Not Found");
    }
}
