//! Analyze route handler.
//!
//! Every failure in the flow is rendered as an error result, so the
//! client always receives the result page.

use askama::Template;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Response,
};
use tracing::error;

use super::render;
use crate::state::AppState;
use analyst_core::{analysis, AnalysisResult, AnalyzeError};

/// Name of the multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

#[derive(Template)]
#[template(path = "result.html")]
struct ResultTemplate<'a> {
    status: &'static str,
    answer: Option<&'a str>,
    message: Option<&'a str>,
    pretty_json: String,
}

impl<'a> ResultTemplate<'a> {
    fn from_result(result: &'a AnalysisResult) -> Self {
        Self {
            status: result.status(),
            answer: result.answer(),
            message: result.message(),
            pretty_json: result.to_pretty_json(),
        }
    }
}

/// Read the whole `file` field into memory.
async fn read_file_field(mut multipart: Multipart) -> Result<Bytes, AnalyzeError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AnalyzeError::upload(e.to_string()))?
    {
        if field.name() == Some(FILE_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| AnalyzeError::upload(e.to_string()));
        }
    }

    Err(AnalyzeError::upload(format!("missing '{}' field", FILE_FIELD)))
}

async fn run_analysis(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, AnalyzeError> {
    let multipart = multipart.map_err(|e| AnalyzeError::upload(e.to_string()))?;
    let bytes = read_file_field(multipart).await?;
    analysis::analyze(&state.client, &bytes).await
}

/// POST /analyze - Analyze an uploaded file and render the result page.
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let outcome = run_analysis(&state, multipart).await;
    if let Err(e) = &outcome {
        error!("Error calling AI Pipe: {}", e);
    }

    let result = AnalysisResult::from(outcome);
    render(&ResultTemplate::from_result(&result))
}
