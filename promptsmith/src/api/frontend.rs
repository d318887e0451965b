//! Embedded dashboard assets. The `assets/` directory is compiled into the
//! binary so the workbench ships as a single executable.

use axum::body::Body;
use axum::extract::Path;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets"]
struct DashboardAssets;

const INDEX: &str = "index.html";

pub async fn serve_root() -> Response {
    asset_response(INDEX).unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
}

pub async fn serve_path(Path(path): Path<String>) -> Response {
    let target = path.trim_start_matches('/');
    if target.contains("..") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    if let Some(response) = asset_response(target) {
        return response;
    }

    // Extensionless paths are client-side routes ("/dashboard", "/settings");
    // hand them the shell and let the page script sort it out.
    if !target.contains('.') {
        if let Some(response) = asset_response(INDEX) {
            return response;
        }
    }

    StatusCode::NOT_FOUND.into_response()
}

fn asset_response(path: &str) -> Option<Response> {
    let asset = DashboardAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    let mut response = Response::new(Body::from(asset.data.into_owned()));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime.as_ref()).ok()?,
    );
    Some(response)
}
