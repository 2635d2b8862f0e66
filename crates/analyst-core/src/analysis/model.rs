//! Analysis result model.

use serde::{Deserialize, Serialize};

use crate::error::AnalyzeError;

/// Outcome of one analyze request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisResult {
    Success { answer: String },
    Error { message: String },
}

impl AnalysisResult {
    pub fn success(answer: impl Into<String>) -> Self {
        Self::Success {
            answer: answer.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Success { answer } => Some(answer),
            Self::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message } => Some(message),
        }
    }

    /// Serialize as JSON indented with four spaces.
    pub fn to_pretty_json(&self) -> String {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        if self.serialize(&mut ser).is_err() {
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl From<Result<String, AnalyzeError>> for AnalysisResult {
    fn from(outcome: Result<String, AnalyzeError>) -> Self {
        match outcome {
            Ok(answer) => Self::success(answer),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompletionError;

    #[test]
    fn test_success_serializes_with_status_tag() {
        let result = AnalysisResult::success("All good");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, serde_json::json!({"status": "success", "answer": "All good"}));
    }

    #[test]
    fn test_error_serializes_with_message() {
        let result = AnalysisResult::error("boom");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, serde_json::json!({"status": "error", "message": "boom"}));
    }

    #[test]
    fn test_pretty_json_uses_four_space_indent() {
        let json = AnalysisResult::success("hi").to_pretty_json();
        assert_eq!(json, "{\n    \"status\": \"success\",\n    \"answer\": \"hi\"\n}");
    }

    #[test]
    fn test_pretty_json_parses_back_to_same_result() {
        let result = AnalysisResult::error("AI Pipe Error 429: \"slow down\"\n<retry>");
        let parsed: AnalysisResult = serde_json::from_str(&result.to_pretty_json()).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_from_outcome() {
        let ok: AnalysisResult = Ok::<_, AnalyzeError>("answer".to_string()).into();
        assert!(ok.is_success());
        assert_eq!(ok.answer(), Some("answer"));

        let err: AnalysisResult = Err::<String, _>(AnalyzeError::from(
            CompletionError::UpstreamStatus {
                status: 503,
                body: "unavailable".to_string(),
            },
        ))
        .into();
        assert_eq!(err.status(), "error");
        assert_eq!(err.message(), Some("AI Pipe Error 503: unavailable"));
    }
}
