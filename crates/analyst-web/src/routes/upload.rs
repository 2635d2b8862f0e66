//! Upload form route handler.

use askama::Template;
use axum::response::Response;

use super::render;

#[derive(Template)]
#[template(path = "api_front.html")]
struct UploadFormTemplate {
    action: &'static str,
    field: &'static str,
}

/// GET /api - Serve the upload form.
pub async fn form() -> Response {
    render(&UploadFormTemplate {
        action: "/analyze",
        field: super::analyze::FILE_FIELD,
    })
}
