//! Runtime application configuration loaded from environment variables.

use std::path::Path;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_SITE_NAME: &str = "ORIZENH";
pub const DEFAULT_SITE_WEBSITE: &str = "https://www.orizenh.com";

/// Read-only configuration shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listening port.
    pub port: u16,
    /// Externally reachable base URL, prefixed to replay paths.
    pub base_url: String,
    /// Host that must appear in `Origin` or `Referer`. Empty denies everyone.
    pub trusted_host: String,
    /// Directory served under `/<directory name>/`.
    pub static_dir: String,
    pub site_name: String,
    pub site_website: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            base_url: String::new(),
            trusted_host: String::new(),
            static_dir: DEFAULT_STATIC_DIR.into(),
            site_name: DEFAULT_SITE_NAME.into(),
            site_website: DEFAULT_SITE_WEBSITE.into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset. `TRUSTED_HOST` falls back to `URL`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String { lookup(key).unwrap_or_default().trim().to_string() };

        let base_url = g("URL").trim_end_matches('/').to_string();
        let trusted_host = {
            let host = g("TRUSTED_HOST");
            if host.is_empty() { base_url.clone() } else { host }
        };
        let static_dir = {
            let dir = g("STATIC_DIR");
            let dir = dir.trim_end_matches('/');
            if dir.is_empty() { DEFAULT_STATIC_DIR.into() } else { dir.to_string() }
        };

        Self {
            port: parse_u16(&g("PORT"), DEFAULT_PORT),
            base_url,
            trusted_host,
            static_dir,
            site_name: or_default(g("SITE_NAME"), DEFAULT_SITE_NAME),
            site_website: or_default(g("SITE_WEBSITE"), DEFAULT_SITE_WEBSITE),
        }
    }

    /// URL prefix the static directory is mounted at: its last path
    /// component, e.g. `/public` for `./public`.
    pub fn static_prefix(&self) -> String {
        let name = Path::new(&self.static_dir)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_STATIC_DIR);
        format!("/{name}")
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() { default.into() } else { value }
}

fn parse_u16(s: &str, default: u16) -> u16 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
