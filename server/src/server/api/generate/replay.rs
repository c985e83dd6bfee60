use url::form_urlencoded;

/// Canonical URL that replays a generation request.
///
/// The `return` parameter is left off so callers can append the mode they
/// want to link to.
pub fn replay_path(base_url: &str, data: &str, size: u32, color: &str, bg: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("data", data)
        .append_pair("size", &size.to_string())
        .append_pair("color", color)
        .append_pair("bg", bg)
        .finish();
    format!("{base_url}/api/generate?{query}")
}
