//! HTML templates embedded at build time and rendered with Tera.

use rust_embed::Embed;
use serde::Serialize;
use tera::{Context, Tera};

pub const INDEX: &str = "index.html";
pub const QR_FRAGMENT: &str = "partials/qrcode.html";

#[derive(Embed)]
#[folder = "templates/"]
struct TemplateAssets;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template {0} is not valid UTF-8")]
    InvalidUtf8(String),
    #[error(transparent)]
    Tera(#[from] tera::Error),
}

/// Compiled template set. Immutable after [`Templates::load`].
#[derive(Debug)]
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Compile every embedded template.
    pub fn load() -> Result<Self, TemplateError> {
        let mut sources = Vec::new();
        for name in TemplateAssets::iter() {
            let Some(file) = TemplateAssets::get(&name) else {
                continue;
            };
            let body = String::from_utf8(file.data.into_owned())
                .map_err(|_| TemplateError::InvalidUtf8(name.to_string()))?;
            sources.push((name.to_string(), body));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(sources)?;
        for name in tera.get_template_names() {
            tracing::info!(template = name, "Loaded template");
        }

        Ok(Self { tera })
    }

    /// Render the template `name` with `data` as its context.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, TemplateError> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(name, &context)?)
    }
}
