//! Client for the hosted lyric-generation model
//!
//! The model runs in a Hugging Face Gradio Space. Two calls are used:
//! - `GET /config` as a reachability probe
//! - the Gradio call API (`POST /gradio_api/call/<fn>` then an SSE `GET`)
//!   for a single prediction

use crate::config::GenerationConfig;
use anyhow::Context;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("{0}")]
    Remote(String),
    #[error("unexpected response: {0}")]
    Protocol(String),
    #[error("no response after {0}s")]
    Timeout(u64),
}

/// Inputs of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model_choice: String,
    pub artist: String,
    pub initial_prompt: String,
}

#[derive(Debug, Deserialize)]
struct EventId {
    event_id: String,
}

#[derive(Debug, Clone)]
pub struct GradioClient {
    http: reqwest::Client,
    base_url: String,
    endpoint: String,
    space_id: String,
    timeout: Duration,
}

impl GradioClient {
    pub fn new(cfg: &GenerationConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("build reqwest client")?;
        let base_url = cfg
            .base_url
            .clone()
            .unwrap_or_else(|| space_host(&cfg.space_id));
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint: cfg.endpoint.trim_matches('/').to_string(),
            space_id: cfg.space_id.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs.max(1)),
        })
    }

    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    /// Page describing the Space's current state.
    pub fn status_page(&self) -> String {
        format!("https://huggingface.co/spaces/{}", self.space_id)
    }

    /// Whether the Space answers at all. Never fails.
    pub async fn check_availability(&self) -> bool {
        let url = format!("{}/config", self.base_url);
        let probe = self.http.get(&url).timeout(Duration::from_secs(15)).send().await;
        match probe {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(space = %self.space_id, "generation service reachable");
                true
            }
            Ok(resp) => {
                tracing::warn!(space = %self.space_id, status = %resp.status(), "generation service not ready");
                false
            }
            Err(e) => {
                tracing::warn!(space = %self.space_id, "generation service unreachable: {e}");
                false
            }
        }
    }

    /// Submit one prediction and wait for its text.
    pub async fn generate(&self, req: &GenerationRequest) -> Result<String, GenerationError> {
        tracing::info!(artist = %req.artist, model = %req.model_choice, "submitting generation");
        match tokio::time::timeout(self.timeout, self.predict(req)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout.as_secs())),
        }
    }

    async fn predict(&self, req: &GenerationRequest) -> Result<String, GenerationError> {
        let call_url = format!("{}/gradio_api/call/{}", self.base_url, self.endpoint);
        let body = json!({
            "data": [req.model_choice, req.artist, req.initial_prompt],
        });

        let resp = self
            .http
            .post(&call_url)
            .json(&body)
            .send()
            .await
            .map_err(connect_error)?;
        if !resp.status().is_success() {
            return Err(GenerationError::Status {
                status: resp.status().as_u16(),
            });
        }
        let EventId { event_id } = resp
            .json::<EventId>()
            .await
            .map_err(|e| GenerationError::Protocol(format!("event id: {e}")))?;

        let resp = self
            .http
            .get(format!("{call_url}/{event_id}"))
            .send()
            .await
            .map_err(connect_error)?;
        if !resp.status().is_success() {
            return Err(GenerationError::Status {
                status: resp.status().as_u16(),
            });
        }
        let stream = resp.text().await?;
        parse_event_stream(&stream)
    }
}

fn connect_error(e: reqwest::Error) -> GenerationError {
    if e.is_connect() {
        GenerationError::Unavailable(e.to_string())
    } else {
        GenerationError::Request(e)
    }
}

/// `owner/My.Space` -> `https://owner-my-space.hf.space`
pub fn space_host(space_id: &str) -> String {
    let sub: String = space_id
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '.' | '_' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect();
    format!("https://{sub}.hf.space")
}

/// Pull the result out of a Gradio SSE body.
pub fn parse_event_stream(body: &str) -> Result<String, GenerationError> {
    let mut event = "";
    for line in body.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(name) = line.strip_prefix("event:") {
            event = name.trim();
            continue;
        }
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        match event {
            "complete" => {
                let value: Value = serde_json::from_str(data)
                    .map_err(|e| GenerationError::Protocol(format!("result payload: {e}")))?;
                return Ok(format_output(&value));
            }
            "error" => {
                let message = match serde_json::from_str::<Value>(data) {
                    Ok(Value::String(s)) => s,
                    Ok(Value::Null) | Err(_) if data.is_empty() || data == "null" => {
                        "the model reported an error".to_string()
                    }
                    Ok(other) => other.to_string(),
                    Err(_) => data.to_string(),
                };
                return Err(GenerationError::Remote(message));
            }
            _ => {}
        }
    }
    Err(GenerationError::Protocol("stream ended without a result".into()))
}

/// Render the prediction output as plain text.
pub fn format_output(value: &Value) -> String {
    match value {
        Value::Array(items) if items.len() == 1 => format_output(&items[0]),
        Value::Array(items) => items
            .iter()
            .map(format_output)
            .collect::<Vec<_>>()
            .join("\n\n"),
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Reply, serve};

    fn client(base: Option<String>) -> GradioClient {
        let cfg = GenerationConfig {
            base_url: base,
            timeout_secs: 5,
            ..GenerationConfig::default()
        };
        GradioClient::new(&cfg).unwrap()
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            model_choice: "GPT2 Fine-Tuned (bernardoc90/gpt2-spanish-lyrics)".into(),
            artist: "Alfa".into(),
            initial_prompt: "Bajo la luna".into(),
        }
    }

    #[test]
    fn test_space_host() {
        assert_eq!(
            space_host("bernardoc90/gpt-spanish-lyrics"),
            "https://bernardoc90-gpt-spanish-lyrics.hf.space"
        );
        assert_eq!(space_host("Org/My.Space_v2"), "https://org-my-space-v2.hf.space");
    }

    #[test]
    fn test_format_output() {
        assert_eq!(format_output(&json!(["solo"])), "solo");
        assert_eq!(format_output(&json!(["a", "b"])), "a\n\nb");
        assert_eq!(format_output(&json!("texto")), "texto");
        assert_eq!(format_output(&json!(3)), "3");
    }

    #[test]
    fn test_parse_event_stream() {
        let ok = "event: generating\ndata: null\n\nevent: complete\ndata: [\"hola mundo\"]\n\n";
        assert_eq!(parse_event_stream(ok).unwrap(), "hola mundo");

        let err = "event: error\ndata: \"CUDA out of memory\"\n\n";
        assert_eq!(
            parse_event_stream(err).unwrap_err().to_string(),
            "CUDA out of memory"
        );

        let err = "event: error\ndata: null\n\n";
        assert!(matches!(parse_event_stream(err), Err(GenerationError::Remote(_))));

        assert!(matches!(
            parse_event_stream("event: heartbeat\ndata: null\n"),
            Err(GenerationError::Protocol(_))
        ));
    }

    #[tokio::test]
    async fn test_check_availability() {
        let server = serve(vec![("/config", Reply::json(200, "{}"))]).await;
        assert!(client(Some(server.base())).check_availability().await);

        let down = serve(vec![]).await;
        assert!(!client(Some(down.base())).check_availability().await);
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Nothing listens on the discard port.
        let c = client(Some("http://127.0.0.1:9".into()));
        assert!(!c.check_availability().await);
        assert!(matches!(
            c.generate(&request()).await,
            Err(GenerationError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_roundtrip() {
        let server = serve(vec![
            ("/gradio_api/call/predict", Reply::json(200, r#"{"event_id": "abc123"}"#)),
            (
                "/gradio_api/call/predict/abc123",
                Reply::event_stream("event: complete\ndata: [\"Bajo la luna canto\"]\n\n"),
            ),
        ])
        .await;
        let text = client(Some(server.base())).generate(&request()).await.unwrap();
        assert_eq!(text, "Bajo la luna canto");

        let submitted = &server.recorded()[0];
        assert_eq!(submitted.method, axum::http::Method::POST);
        assert_eq!(submitted.path, "/gradio_api/call/predict");
        let body: Value = serde_json::from_str(&submitted.body).unwrap();
        assert_eq!(body["data"][1], "Alfa");
        assert_eq!(body["data"][2], "Bajo la luna");
    }

    #[tokio::test]
    async fn test_generate_rejected() {
        let server = serve(vec![("/gradio_api/call/predict", Reply::json(422, "{}"))]).await;
        let err = client(Some(server.base())).generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Status { status: 422 }));
    }

    #[test]
    fn test_status_page() {
        let c = client(None);
        assert_eq!(
            c.status_page(),
            "https://huggingface.co/spaces/bernardoc90/gpt-spanish-lyrics"
        );
    }
}
