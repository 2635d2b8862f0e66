//! Upload analysis: decode the file, build the prompt, ask the completion service.

pub mod model;

use tracing::info;

use crate::completion::CompletionClient;
use crate::error::AnalyzeError;

/// Instruction placed in front of the uploaded content.
pub const PROMPT_PREFIX: &str = "Analyze this data:\n\n";

pub fn build_prompt(content: &str) -> String {
    format!("{PROMPT_PREFIX}{content}")
}

/// Decode uploaded bytes as strict UTF-8.
pub fn decode_upload(bytes: &[u8]) -> Result<&str, AnalyzeError> {
    Ok(std::str::from_utf8(bytes)?)
}

/// Run the analysis for one uploaded file and return the answer text.
pub async fn analyze(client: &CompletionClient, bytes: &[u8]) -> Result<String, AnalyzeError> {
    let content = decode_upload(bytes)?;
    info!(bytes = bytes.len(), "File uploaded successfully");

    let prompt = build_prompt(content);
    let answer = client.complete(&prompt).await?;
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionConfig;
    use crate::test_utils::{completion_body, MockCompletionServer};

    fn client_for(server: &MockCompletionServer) -> CompletionClient {
        let config = CompletionConfig::new("test-token")
            .unwrap()
            .with_endpoint(server.endpoint());
        CompletionClient::new(config).unwrap()
    }

    #[test]
    fn test_build_prompt() {
        assert_eq!(build_prompt("a,b\n1,2"), "Analyze this data:\n\na,b\n1,2");
    }

    #[test]
    fn test_decode_upload_rejects_invalid_utf8() {
        assert_eq!(decode_upload("héllo".as_bytes()).unwrap(), "héllo");
        let err = decode_upload(&[0x66, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, AnalyzeError::Decode(_)));
    }

    #[tokio::test]
    async fn test_analyze_sends_prompt_and_returns_answer() {
        let server = MockCompletionServer::start(vec![(200, completion_body("Mean is 1.5"))]).await;
        let client = client_for(&server);

        let answer = analyze(&client, b"x\n1\n2").await.unwrap();
        assert_eq!(answer, "Mean is 1.5");

        let requests = server.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body["messages"][0]["content"],
            "Analyze this data:\n\nx\n1\n2"
        );
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_analyze_skips_network_on_decode_failure() {
        let server = MockCompletionServer::start(vec![]).await;
        let client = client_for(&server);

        let err = analyze(&client, &[0xc3, 0x28]).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Decode(_)));
        assert!(server.get_requests().is_empty());
        server.shutdown().await;
    }
}
