//! Agent backend client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::agent::CreateAgentRequest;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// What the backend returned for a created agent. The body is opaque; only
/// a few well-known fields are read for the confirmation message.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedAgent {
    pub body: Value,
}

impl CreatedAgent {
    pub fn id(&self) -> Option<&str> {
        self.body
            .get("id")
            .or_else(|| self.body.get("agentId"))
            .and_then(Value::as_str)
    }

    /// One-line confirmation for the review screen
    pub fn summary(&self, name: &str) -> String {
        match self.id() {
            Some(id) => format!("Agent '{}' created (id: {})", name, id),
            None => format!("Agent '{}' created", name),
        }
    }
}

/// Anything that can create agents. The TUI and CLI only talk to this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgentBackend: Send + Sync {
    async fn create_agent(&self, request: &CreateAgentRequest) -> ApiResult<CreatedAgent>;
}

/// HTTP implementation: one `POST` per creation, no retry.
#[derive(Clone)]
pub struct AgentApiClient {
    http: Client,
    url: String,
}

impl AgentApiClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url: config.create_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AgentBackend for AgentApiClient {
    async fn create_agent(&self, request: &CreateAgentRequest) -> ApiResult<CreatedAgent> {
        tracing::info!(
            "Creating agent '{}' (template={}) via {}",
            request.name,
            request.template_name,
            self.url
        );

        let resp = self.http.post(&self.url).json(request).send().await?;
        let status = resp.status();
        tracing::debug!("Agent API response status: {}", status);

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("Agent creation failed {}: {}", status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        // Some backends answer 201 with an empty body
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?
        };

        let created = CreatedAgent { body };
        tracing::info!("Agent created: {:?}", created.id());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentDraft, CharacterDefaults, build_create_request};
    use serde_json::json;

    fn request() -> CreateAgentRequest {
        let draft = AgentDraft {
            name: "AlphaTrader".to_string(),
            description: "Crypto desk".to_string(),
            personality: "Focuses on forex.".to_string(),
            ..AgentDraft::default()
        };
        build_create_request(&draft, &CharacterDefaults::default())
    }

    fn client_for(server: &mockito::Server) -> AgentApiClient {
        AgentApiClient::new(&ApiConfig {
            base_url: server.url(),
            create_path: "/api/agents".to_string(),
        })
        .expect("client")
    }

    #[tokio::test]
    async fn test_create_agent_posts_request_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/agents")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::PartialJson(json!({
                "templateName": "trading-agent",
                "name": "AlphaTrader",
                "character": { "clients": ["direct"] },
                "tokenization": { "enabled": false, "initialSupply": 1000000 }
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"agent-123"}"#)
            .create_async()
            .await;

        let created = client_for(&server)
            .create_agent(&request())
            .await
            .expect("created");
        assert_eq!(created.id(), Some("agent-123"));
        assert_eq!(
            created.summary("AlphaTrader"),
            "Agent 'AlphaTrader' created (id: agent-123)"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_agent_empty_body_is_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/agents")
            .with_status(201)
            .create_async()
            .await;

        let created = client_for(&server)
            .create_agent(&request())
            .await
            .expect("created");
        assert_eq!(created.id(), None);
        assert_eq!(created.summary("X"), "Agent 'X' created");
    }

    #[tokio::test]
    async fn test_create_agent_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/agents")
            .with_status(500)
            .with_body("template not found")
            .create_async()
            .await;

        let err = client_for(&server)
            .create_agent(&request())
            .await
            .expect_err("should fail");
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "template not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_agent_unreachable() {
        let client = AgentApiClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            create_path: "/api/agents".to_string(),
        })
        .expect("client");
        let err = client.create_agent(&request()).await.expect_err("fails");
        assert!(matches!(err, ApiError::Http(_)));
    }
}
