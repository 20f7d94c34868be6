//! Embedded editor assets.
//!
//! The browser client ships inside the binary, so a deployment is the bare
//! executable plus its prompts file. There is no asset directory to
//! configure.

use axum::http::header;
use axum::response::{IntoResponse, Response};

const INDEX_HTML: &str = include_str!("../static/index.html");
const STYLE_CSS: &str = include_str!("../static/style.css");
const APP_JS: &str = include_str!("../static/app.js");

/// Response for a known asset name, `None` for anything else.
pub fn response_for(file: &str) -> Option<Response> {
    let (body, content_type) = match file {
        "" | "index.html" => (INDEX_HTML, "text/html; charset=utf-8"),
        "style.css" => (STYLE_CSS, "text/css"),
        "app.js" => (APP_JS, "application/javascript"),
        _ => return None,
    };

    Some(([(header::CONTENT_TYPE, content_type)], body).into_response())
}
