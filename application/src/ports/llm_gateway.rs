//! LLM Gateway port
//!
//! Defines the interface for communicating with local model runtimes.

use async_trait::async_trait;
use planner_domain::{LlmResponse, Model, ToolOutput};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session with the specified model and system prompt.
    ///
    /// An empty `system_prompt` means no system message.
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;

    /// Get models the runtime can serve
    async fn available_models(&self) -> Result<Vec<Model>, GatewayError>;
}

/// An active LLM session. A session keeps its own message history.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and get a response
    async fn send(&self, content: &str) -> Result<String, GatewayError>;

    /// Send a message asking for output matching `schema`.
    ///
    /// Runtimes without structured output support fall back to `send()`;
    /// the caller decodes and validates the reply either way.
    async fn send_structured(
        &self,
        content: &str,
        _schema: &serde_json::Value,
    ) -> Result<String, GatewayError> {
        self.send(content).await
    }

    /// Send a message with tool definitions (function-calling format).
    ///
    /// Default implementation ignores the tools and wraps `send()`.
    async fn send_with_tools(
        &self,
        content: &str,
        _tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError> {
        Ok(LlmResponse::from_text(self.send(content).await?))
    }

    /// Return tool outputs to the model and get its next response.
    async fn send_tool_results(
        &self,
        _results: &[ToolOutput],
    ) -> Result<LlmResponse, GatewayError> {
        Err(GatewayError::Other(format!(
            "model {} does not support tool use",
            self.model()
        )))
    }
}
