//! QR code generation API:
//!   GET /api/generate?data=…&size=…&color=…&bg=…&return=base64|image
//!
//! Without `return` the response is `{"content": "<html fragment>"}`.

use std::num::IntErrorKind;

use axum::Json;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image_engine::{Color, ColorParseError, EcLevel, QrEncodeError, QrOptions, encode_png, parse_color};
use serde::Serialize;
use serde_json::json;
use url::form_urlencoded;

use crate::app::SharedState;
use crate::server::origin::is_request_authorized;
use crate::templates::{QR_FRAGMENT, TemplateError};

use super::err_json;

mod replay;

pub use replay::replay_path;

pub const DEFAULT_SIZE: u32 = 256;
pub const MAX_SIZE: u32 = 512;
pub const DEFAULT_COLOR: &str = "000000";
pub const DEFAULT_BG: &str = "ffffff";
/// Prefix of the base64 payload. Existing clients match on it verbatim.
pub const DATA_URI_PREFIX: &str = "data:image/svg;base64,";

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Method not authorized")]
    InvalidMethod,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("You have to fill the field")]
    MissingData,
    #[error("Size must not exceed 512 pixels")]
    SizeTooLarge,
    #[error("color: {0}")]
    ColorParse(ColorParseError),
    #[error("bg: {0}")]
    BackgroundParse(ColorParseError),
    #[error("{0}")]
    Encode(#[from] QrEncodeError),
    #[error("{0}")]
    Render(#[from] TemplateError),
}

impl GenerateError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidMethod => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::MissingData
            | Self::SizeTooLarge
            | Self::ColorParse(_)
            | Self::BackgroundParse(_)
            | Self::Encode(_) => StatusCode::BAD_REQUEST,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        err_json(self.status(), &self.to_string()).into_response()
    }
}

/// Output shape selected by the `return` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnMode {
    #[default]
    HtmlFragment,
    Base64,
    Image,
}

impl ReturnMode {
    fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("base64") => Self::Base64,
            Some("image") => Self::Image,
            _ => Self::HtmlFragment,
        }
    }
}

/// Raw query parameters. Only the first occurrence of each key is kept.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerateParams {
    pub data: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub bg: Option<String>,
    pub return_mode: Option<String>,
}

impl GenerateParams {
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "data" => &mut params.data,
                "size" => &mut params.size,
                "color" => &mut params.color,
                "bg" => &mut params.bg,
                "return" => &mut params.return_mode,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub data: String,
    pub size: u32,
    /// Foreground hex as supplied, without `#`.
    pub color_hex: String,
    /// Background hex as supplied, without `#`.
    pub bg_hex: String,
    pub foreground: Color,
    pub background: Color,
    pub return_mode: ReturnMode,
}

impl GenerationRequest {
    pub fn from_params(params: GenerateParams) -> Result<Self, GenerateError> {
        let data = params
            .data
            .filter(|d| !d.is_empty())
            .ok_or(GenerateError::MissingData)?;

        let size = parse_size(params.size.as_deref())?;

        let color_hex = hex_or_default(params.color.as_deref(), DEFAULT_COLOR);
        let foreground = parse_color(&color_hex).map_err(GenerateError::ColorParse)?;

        let bg_hex = hex_or_default(params.bg.as_deref(), DEFAULT_BG);
        let background = parse_color(&bg_hex).map_err(GenerateError::BackgroundParse)?;

        Ok(Self {
            data,
            size,
            color_hex,
            bg_hex,
            foreground,
            background,
            return_mode: ReturnMode::from_param(params.return_mode.as_deref()),
        })
    }

    pub fn qr_options(&self) -> QrOptions {
        QrOptions {
            size: self.size,
            error_correction: EcLevel::M,
            background: self.background,
            foreground: self.foreground,
        }
    }
}

/// Absent or unparsable sizes use the default. Values that only fail because
/// they are too large are still rejected as too large.
fn parse_size(raw: Option<&str>) -> Result<u32, GenerateError> {
    let size = match raw {
        None | Some("") => DEFAULT_SIZE,
        Some(s) => match s.parse::<u32>() {
            Ok(v) => v,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                return Err(GenerateError::SizeTooLarge);
            }
            Err(_) => DEFAULT_SIZE,
        },
    };

    if size > MAX_SIZE {
        return Err(GenerateError::SizeTooLarge);
    }
    Ok(size)
}

fn hex_or_default(raw: Option<&str>, default: &str) -> String {
    match raw {
        None | Some("") => default.to_string(),
        Some(s) => s.strip_prefix('#').unwrap_or(s).to_string(),
    }
}

/// `data:` URI carrying base64-encoded PNG bytes.
pub fn to_data_uri(png: &[u8]) -> String {
    format!("{DATA_URI_PREFIX}{}", STANDARD.encode(png))
}

#[derive(Serialize)]
struct QrFragment<'a> {
    path: &'a str,
    base64_image: &'a str,
}

/// GET /api/generate
pub async fn generate_qr(
    State(state): State<SharedState>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, GenerateError> {
    let result = generate(&state, &method, &headers, query.as_deref().unwrap_or_default());
    if let Err(e) = &result {
        match e {
            GenerateError::Encode(_) | GenerateError::Render(_) => {
                tracing::warn!(error = %e, "QR generation failed");
            }
            _ => tracing::debug!(error = %e, status = %e.status(), "QR request rejected"),
        }
    }
    result
}

fn generate(
    state: &SharedState,
    method: &Method,
    headers: &HeaderMap,
    query: &str,
) -> Result<Response, GenerateError> {
    if *method != Method::GET {
        return Err(GenerateError::InvalidMethod);
    }
    if !is_request_authorized(headers, &state.config().trusted_host) {
        return Err(GenerateError::Unauthorized);
    }

    let request = GenerationRequest::from_params(GenerateParams::from_query(query))?;
    let path = replay_path(
        &state.config().base_url,
        &request.data,
        request.size,
        &request.color_hex,
        &request.bg_hex,
    );

    let png = encode_png(&request.data, &request.qr_options())?;
    tracing::debug!(
        size = request.size,
        foreground = %request.foreground,
        background = %request.background,
        bytes = png.len(),
        mode = ?request.return_mode,
        "QR code generated"
    );

    match request.return_mode {
        ReturnMode::Image => Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response()),
        ReturnMode::Base64 => Ok(to_data_uri(&png).into_response()),
        ReturnMode::HtmlFragment => {
            let base64_image = to_data_uri(&png);
            let content = state.templates().render(
                QR_FRAGMENT,
                &QrFragment {
                    path: &path,
                    base64_image: &base64_image,
                },
            )?;
            Ok(Json(json!({ "content": content })).into_response())
        }
    }
}
