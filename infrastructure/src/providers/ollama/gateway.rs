//! Ollama gateway
//!
//! Creates [`OllamaSession`]s against a local (or remote) Ollama server and
//! lists the models it has pulled.

use super::session::OllamaSession;
use super::types::{TagsResponse, convert_status_error, convert_transport_error};
use crate::config::FileOllamaConfig;
use async_trait::async_trait;
use planner_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use planner_domain::Model;
use std::time::Duration;
use tracing::{debug, info};

/// Connection settings for an Ollama server
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    pub host: String,
    pub temperature: f64,
    pub request_timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::from(&FileOllamaConfig::default())
    }
}

impl From<&FileOllamaConfig> for OllamaConfig {
    fn from(file: &FileOllamaConfig) -> Self {
        Self {
            host: file.host.trim().trim_end_matches('/').to_string(),
            temperature: file.temperature,
            request_timeout: Duration::from_secs(file.request_timeout_seconds),
        }
    }
}

/// [`LlmGateway`] backed by Ollama's HTTP API
pub struct OllamaGateway {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaGateway {
    pub fn new(config: OllamaConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        info!(host = %config.host, "Using Ollama gateway");
        Ok(Self { client, config })
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.host, path)
    }
}

#[async_trait]
impl LlmGateway for OllamaGateway {
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        debug!(model = %model, system_prompt_len = system_prompt.len(), "Creating Ollama session");
        Ok(Box::new(OllamaSession::new(
            self.client.clone(),
            self.endpoint("/api/chat"),
            model.clone(),
            system_prompt,
            self.config.temperature,
        )))
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        let response = self
            .client
            .get(self.endpoint("/api/tags"))
            .send()
            .await
            .map_err(|e| convert_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(convert_status_error(status.as_u16(), &body, "tags"));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        Ok(tags.into_models())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(host: String) -> OllamaGateway {
        OllamaGateway::new(OllamaConfig {
            host,
            ..OllamaConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_config_from_file_trims_trailing_slash() {
        let file = FileOllamaConfig {
            host: "http://gpu-box:11434/".to_string(),
            temperature: 0.2,
            request_timeout_seconds: 30,
        };
        let config = OllamaConfig::from(&file);
        assert_eq!(config.host, "http://gpu-box:11434");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_available_models_lists_tags() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_body(r#"{"models":[{"name":"granite3.3:8b"},{"name":"qwen3:8b"}]}"#)
            .create_async()
            .await;

        let models = gateway(server.url()).available_models().await.unwrap();
        assert_eq!(models, vec![Model::Granite33, Model::Qwen3]);
    }

    #[tokio::test]
    async fn test_created_session_uses_requested_model() {
        let gateway = gateway("http://localhost:11434".to_string());
        let session = gateway
            .create_session(&Model::Granite33Lite, "You are an analyst.")
            .await
            .unwrap();
        assert_eq!(session.model(), &Model::Granite33Lite);
    }
}
