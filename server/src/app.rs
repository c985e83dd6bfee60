use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::templates::Templates;

/// Application state shared by every axum handler.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Read-only configuration
    config: AppConfig,
    /// Compiled templates
    templates: Templates,
    /// Data URI of the QR code shown on the index page before any submit
    default_preview: String,
    /// Cancelled when the process should stop serving
    shutdown_token: CancellationToken,
}

impl SharedState {
    pub fn new(config: AppConfig, templates: Templates, default_preview: String) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                templates,
                default_preview,
                shutdown_token: CancellationToken::new(),
            }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.port
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn templates(&self) -> &Templates {
        &self.inner.templates
    }

    pub fn default_preview(&self) -> &str {
        &self.inner.default_preview
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }
}
