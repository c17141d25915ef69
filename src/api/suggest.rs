//! Field suggestions from the text-generation proxy.
//!
//! The proxy speaks a chat-completions-like protocol. Depending on the
//! `stream` flag it answers with a single JSON body or a Server-Sent Events
//! stream; both are reduced to the final text.

use futures::stream::StreamExt;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::agent::AgentDraft;
use crate::config::SuggestionConfig;
use crate::error::{ApiError, ApiResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Draft fields that have a suggest affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionField {
    Name,
    Description,
    Personality,
    Topics,
}

impl SuggestionField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Personality => "personality",
            Self::Topics => "topics",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::Name => {
                "You are a naming expert who helps users find creative, memorable names for AI trading agents. Keep names short, catchy, and relevant to trading/finance."
            }
            Self::Description => {
                "You are a professional AI copywriter who specializes in writing concise, compelling descriptions for trading agents. Focus on highlighting the agent's value proposition in 1-2 sentences."
            }
            Self::Personality => {
                "You design personalities for AI trading agents. Describe the agent's trading style, approach to risk, preferred markets, analysis style and specialized knowledge in a short paragraph of plain sentences."
            }
            Self::Topics => {
                "You list areas of expertise for AI trading agents. Answer with a comma-separated list of short topics and nothing else."
            }
        }
    }

    pub fn user_prompt(&self) -> &'static str {
        match self {
            Self::Name => "Suggest a name for my trading agent...",
            Self::Description => "Write a description for my trading agent...",
            Self::Personality => "Create a personality for my trading agent...",
            Self::Topics => "Suggest expertise topics for my trading agent...",
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct SuggestRequest {
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Build the user message, adding whatever the draft already says about the
/// agent so suggestions stay consistent with it.
fn user_message(field: SuggestionField, draft: &AgentDraft) -> String {
    let mut content = field.user_prompt().to_string();
    if field != SuggestionField::Name && !draft.name.trim().is_empty() {
        content.push_str(&format!("\nAgent name: {}", draft.name.trim()));
    }
    if field != SuggestionField::Description && !draft.description.trim().is_empty() {
        content.push_str(&format!("\nDescription: {}", draft.description.trim()));
    }
    content
}

/// Pull the generated text out of one JSON payload.
pub(crate) fn extract_content(value: &Value) -> Option<String> {
    let choice = value.get("choices").and_then(|c| c.get(0));
    choice
        .and_then(|c| c.get("delta"))
        .and_then(|d| d.get("content"))
        .or_else(|| {
            choice
                .and_then(|c| c.get("message"))
                .and_then(|m| m.get("content"))
        })
        .or_else(|| value.get("content"))
        .or_else(|| value.get("text"))
        .or_else(|| value.get("response"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Incremental SSE decoder: feed raw chunks, read the concatenated text.
///
/// Bytes are buffered until a full line arrives, so a UTF-8 character split
/// across chunks decodes intact.
#[derive(Debug, Default)]
pub(crate) struct SseAccumulator {
    buffer: Vec<u8>,
    text: String,
    done: bool,
}

impl SseAccumulator {
    pub(crate) fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
        while let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            let line = String::from_utf8_lossy(&line);
            self.handle_line(line.trim());
        }
    }

    fn handle_line(&mut self, line: &str) {
        if self.done {
            return;
        }
        let Some(data) = line.strip_prefix("data:") else {
            return;
        };
        let data = data.trim_start();
        if data == "[DONE]" {
            self.done = true;
            return;
        }
        match serde_json::from_str::<Value>(data) {
            Ok(value) => {
                if let Some(piece) = extract_content(&value) {
                    self.text.push_str(&piece);
                }
            }
            // Some proxies stream bare text frames
            Err(_) => self.text.push_str(data),
        }
    }

    pub(crate) fn finish(mut self) -> String {
        let rest = std::mem::take(&mut self.buffer);
        let rest = String::from_utf8_lossy(&rest);
        self.handle_line(rest.trim());
        self.text
    }
}

/// Client for the suggestion proxy
#[derive(Clone)]
pub struct SuggestionClient {
    http: Client,
    endpoint: String,
    streaming: bool,
}

impl SuggestionClient {
    pub fn new(config: &SuggestionConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            streaming: config.streaming,
        })
    }

    /// Ask for a replacement value for `field`. Returns the trimmed text.
    pub async fn suggest(&self, field: SuggestionField, draft: &AgentDraft) -> ApiResult<String> {
        let request = SuggestRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: field.system_prompt().to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message(field, draft),
                },
            ],
            stream: self.streaming,
        };

        tracing::debug!(
            "Suggestion request: field={} stream={} endpoint={}",
            field.label(),
            self.streaming,
            self.endpoint
        );

        let resp = self.http.post(&self.endpoint).json(&request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!("Suggestion request failed {}: {}", status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let is_sse = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("text/event-stream"));

        let text = if is_sse {
            let mut acc = SseAccumulator::default();
            let mut stream = resp.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                acc.push(&chunk);
            }
            acc.finish()
        } else {
            let body = resp.text().await?;
            match serde_json::from_str::<Value>(&body) {
                Ok(value) => extract_content(&value)
                    .ok_or_else(|| ApiError::Decode("no content in response".to_string()))?,
                Err(_) => body,
            }
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ApiError::Empty(self.endpoint.clone()));
        }
        tracing::debug!("Suggestion for {}: {} chars", field.label(), text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_for(server: &mockito::Server, streaming: bool) -> SuggestionClient {
        SuggestionClient::new(&SuggestionConfig {
            enabled: true,
            endpoint: format!("{}/api/proxy/ai-chat", server.url()),
            streaming,
        })
        .expect("client")
    }

    #[test]
    fn test_extract_content_shapes() {
        assert_eq!(
            extract_content(&json!({"choices":[{"delta":{"content":"a"}}]})),
            Some("a".to_string())
        );
        assert_eq!(
            extract_content(&json!({"choices":[{"message":{"content":"b"}}]})),
            Some("b".to_string())
        );
        assert_eq!(extract_content(&json!({"content":"c"})), Some("c".to_string()));
        assert_eq!(extract_content(&json!({"response":"d"})), Some("d".to_string()));
        assert_eq!(extract_content(&json!({"other":1})), None);
    }

    #[test]
    fn test_sse_accumulator_split_chunks() {
        let mut acc = SseAccumulator::default();
        acc.push("data: {\"choices\":[{\"delta\":{\"content\":\"Alpha\"}}]}\n\ndata: {\"cho".as_bytes());
        acc.push("ices\":[{\"delta\":{\"content\":\"Trader\"}}]}\n".as_bytes());
        acc.push(": keep-alive\n".as_bytes());
        acc.push("data: [DONE]\n".as_bytes());
        acc.push("data: {\"content\":\"ignored\"}\n".as_bytes());
        assert_eq!(acc.finish(), "AlphaTrader");
    }

    #[test]
    fn test_sse_accumulator_plain_frames_and_unterminated_tail() {
        let mut acc = SseAccumulator::default();
        acc.push("data: Market\ndata:Oracle".as_bytes());
        assert_eq!(acc.finish(), "MarketOracle");
    }

    #[test]
    fn test_sse_accumulator_multibyte_split_across_chunks() {
        let frame = "data: {\"content\":\"Café ₿ull\"}\n".as_bytes();
        // Cut inside the three-byte '₿'
        let cut = frame
            .iter()
            .position(|&b| b == 0xE2)
            .expect("bitcoin sign")
            + 1;

        let mut acc = SseAccumulator::default();
        acc.push(&frame[..cut]);
        acc.push(&frame[cut..]);
        let text = acc.finish();
        assert_eq!(text, "Café ₿ull");
        assert!(!text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_user_message_includes_context() {
        let draft = AgentDraft {
            name: "AlphaTrader".to_string(),
            description: "Crypto desk".to_string(),
            ..AgentDraft::default()
        };
        let msg = user_message(SuggestionField::Personality, &draft);
        assert!(msg.starts_with("Create a personality"));
        assert!(msg.contains("Agent name: AlphaTrader"));
        assert!(msg.contains("Description: Crypto desk"));

        let msg = user_message(SuggestionField::Name, &draft);
        assert!(!msg.contains("Agent name:"));
    }

    #[tokio::test]
    async fn test_suggest_json_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/proxy/ai-chat")
            .match_body(mockito::Matcher::PartialJson(json!({"stream": false})))
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"  QuantumFinance \n"}}]}"#)
            .create_async()
            .await;

        let text = client_for(&server, false)
            .suggest(SuggestionField::Name, &AgentDraft::default())
            .await
            .expect("suggestion");
        assert_eq!(text, "QuantumFinance");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_suggest_streamed_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/proxy/ai-chat")
            .with_header("content-type", "text/event-stream")
            .with_body(
                "data: {\"choices\":[{\"delta\":{\"content\":\"forex, \"}}]}\n\n\
                 data: {\"choices\":[{\"delta\":{\"content\":\"options\"}}]}\n\n\
                 data: [DONE]\n\n",
            )
            .create_async()
            .await;

        let text = client_for(&server, true)
            .suggest(SuggestionField::Topics, &AgentDraft::default())
            .await
            .expect("suggestion");
        assert_eq!(text, "forex, options");
    }

    #[tokio::test]
    async fn test_suggest_plain_text_and_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/proxy/ai-chat")
            .with_header("content-type", "text/plain")
            .with_body("A desk for macro trades")
            .create_async()
            .await;
        let text = client_for(&server, false)
            .suggest(SuggestionField::Description, &AgentDraft::default())
            .await
            .expect("suggestion");
        assert_eq!(text, "A desk for macro trades");

        let mut failing = mockito::Server::new_async().await;
        failing
            .mock("POST", "/api/proxy/ai-chat")
            .with_status(502)
            .create_async()
            .await;
        let err = client_for(&failing, false)
            .suggest(SuggestionField::Description, &AgentDraft::default())
            .await
            .expect_err("fails");
        assert!(matches!(err, ApiError::Status { status: 502, .. }));

        let mut blank = mockito::Server::new_async().await;
        blank
            .mock("POST", "/api/proxy/ai-chat")
            .with_body("   ")
            .create_async()
            .await;
        let err = client_for(&blank, false)
            .suggest(SuggestionField::Name, &AgentDraft::default())
            .await
            .expect_err("empty");
        assert!(matches!(err, ApiError::Empty(_)));
    }
}
