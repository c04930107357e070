//! Hosted summarization model adapter
//!
//! Speaks the Hugging Face inference API: text in, ranked list of
//! `summary_text` candidates out.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tintuc_core::ports::Summarizer;
use tintuc_core::{Result, TinTucError};

pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Fixed decoding setup: bounded output, greedy (no sampling)
#[derive(Debug, Clone, Copy, Serialize)]
struct GenerationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

const GENERATION: GenerationParameters = GenerationParameters {
    max_length: 130,
    min_length: 30,
    do_sample: false,
};

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Summaries(Vec<SummaryCandidate>),
    Error { error: String },
}

#[derive(Deserialize)]
struct SummaryCandidate {
    summary_text: String,
}

pub struct HuggingFaceSummarizer {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HuggingFaceSummarizer {
    pub fn new(endpoint: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TinTucError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.filter(|t| !t.is_empty()),
        })
    }
}

impl fmt::Debug for HuggingFaceSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceSummarizer")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        let request = InferenceRequest {
            inputs: text,
            parameters: GENERATION,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TinTucError::Downstream(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TinTucError::Downstream(e.to_string()))?;

        parse_response(status, &body)
    }
}

/// First (highest-ranked) summary of a model response
fn parse_response(status: StatusCode, body: &str) -> Result<String> {
    let parsed = serde_json::from_str::<InferenceResponse>(body);

    if !status.is_success() {
        let detail = match parsed {
            Ok(InferenceResponse::Error { error }) => error,
            _ => format!("model endpoint returned {}", status),
        };
        return Err(TinTucError::Downstream(detail));
    }

    match parsed {
        Ok(InferenceResponse::Summaries(candidates)) => candidates
            .into_iter()
            .next()
            .map(|c| c.summary_text)
            .ok_or_else(|| TinTucError::Downstream("model returned no summary".into())),
        Ok(InferenceResponse::Error { error }) => Err(TinTucError::Downstream(error)),
        Err(e) => Err(TinTucError::Downstream(format!(
            "unexpected model response: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_parse_first_candidate() {
        let body = r#"[{"summary_text": "best"}, {"summary_text": "second"}]"#;
        assert_eq!(parse_response(StatusCode::OK, body).unwrap(), "best");
    }

    #[test]
    fn test_parse_model_error() {
        let body = r#"{"error": "Model facebook/bart-large-cnn is currently loading"}"#;
        let err = parse_response(StatusCode::SERVICE_UNAVAILABLE, body).unwrap_err();
        match err {
            TinTucError::Downstream(msg) => assert!(msg.contains("currently loading")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_and_garbage() {
        assert!(matches!(
            parse_response(StatusCode::OK, "[]"),
            Err(TinTucError::Downstream(_))
        ));
        assert!(matches!(
            parse_response(StatusCode::OK, "<html>"),
            Err(TinTucError::Downstream(_))
        ));
        assert!(matches!(
            parse_response(StatusCode::BAD_GATEWAY, "<html>"),
            Err(TinTucError::Downstream(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let summarizer = HuggingFaceSummarizer::new(
            DEFAULT_MODEL_URL,
            Some("hf_secret".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();

        let debug = format!("{:?}", summarizer);
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_summarize_against_local_endpoint() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();

        let app = Router::new().route(
            "/summarize",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(json!([{ "summary_text": "Tóm tắt ngắn" }]))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let summarizer = HuggingFaceSummarizer::new(
            format!("http://{}/summarize", addr),
            None,
            Duration::from_secs(5),
        )
        .unwrap();

        let summary = summarizer.summarize("Một đoạn văn dài").await.unwrap();
        assert_eq!(summary, "Tóm tắt ngắn");

        let body = seen.lock().unwrap().take().unwrap();
        assert_eq!(body["inputs"], "Một đoạn văn dài");
        assert_eq!(body["parameters"]["max_length"], 130);
        assert_eq!(body["parameters"]["min_length"], 30);
        assert_eq!(body["parameters"]["do_sample"], false);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_downstream_error() {
        let summarizer = HuggingFaceSummarizer::new(
            "http://127.0.0.1:1/summarize",
            None,
            Duration::from_secs(2),
        )
        .unwrap();

        let err = summarizer.summarize("text").await.unwrap_err();
        assert!(matches!(err, TinTucError::Downstream(_)));
    }
}
