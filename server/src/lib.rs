pub mod app;
pub mod config;
pub mod server;
pub mod templates;

use image_engine::{QrOptions, encode_png};

use app::SharedState;
use config::AppConfig;
use server::api::generate::to_data_uri;
use server::assets::DEFAULT_VALUE;
use templates::Templates;

/// Load .env from the first candidate path that exists.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Build the shared state from an explicit configuration.
///
/// Compiles templates and renders the QR code shown on the index page before
/// the user submits anything.
pub fn build_state(config: AppConfig) -> Result<SharedState, anyhow::Error> {
    let templates = Templates::load()?;
    let preview = encode_png(DEFAULT_VALUE, &QrOptions::default())?;
    Ok(SharedState::new(config, templates, to_data_uri(&preview)))
}

/// Load environment, configuration and templates.
pub fn init_foundation() -> Result<SharedState, anyhow::Error> {
    load_dotenv();

    let config = AppConfig::from_env();
    if config.trusted_host.is_empty() {
        tracing::warn!("Neither TRUSTED_HOST nor URL is set: every /api/generate call will be rejected");
    }

    let state = build_state(config)?;
    tracing::info!(
        port = state.server_port(),
        static_dir = %state.config().static_dir,
        "Settings loaded"
    );
    Ok(state)
}
