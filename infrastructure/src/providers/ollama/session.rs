//! Ollama chat session
//!
//! Implements `LlmSession` over `/api/chat`. History lives in the session
//! since the endpoint is stateless.

use super::types::{
    ChatMessage, ChatOptions, ChatRequest, ChatResponse, convert_status_error,
    convert_transport_error,
};
use async_trait::async_trait;
use planner_application::ports::llm_gateway::{GatewayError, LlmSession};
use planner_domain::{LlmResponse, Model, ToolOutput};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

pub struct OllamaSession {
    client: reqwest::Client,
    chat_url: String,
    model: Model,
    temperature: f64,
    /// Full history, system message first
    messages: Mutex<Vec<ChatMessage>>,
    /// Tool schemas (set when send_with_tools is first called)
    tools: Mutex<Vec<Value>>,
}

impl OllamaSession {
    pub fn new(
        client: reqwest::Client,
        chat_url: String,
        model: Model,
        system_prompt: &str,
        temperature: f64,
    ) -> Self {
        let mut messages = Vec::new();
        if !system_prompt.is_empty() {
            messages.push(ChatMessage::system(system_prompt));
        }

        Self {
            client,
            chat_url,
            model,
            temperature,
            messages: Mutex::new(messages),
            tools: Mutex::new(Vec::new()),
        }
    }

    /// Append `new_messages`, call the endpoint and record the reply.
    ///
    /// On failure the history is rolled back so a retry starts clean.
    async fn exchange(
        &self,
        new_messages: Vec<ChatMessage>,
        format: Option<&Value>,
    ) -> Result<ChatResponse, GatewayError> {
        let tools = self.tools.lock().await;
        let mut messages = self.messages.lock().await;
        let rollback_len = messages.len();
        messages.extend(new_messages);

        let request = ChatRequest {
            model: self.model.as_str(),
            messages: &messages,
            stream: false,
            format,
            tools: &tools,
            options: ChatOptions {
                temperature: self.temperature,
            },
        };

        debug!(
            model = %self.model,
            messages = messages.len(),
            tools = tools.len(),
            structured = format.is_some(),
            "Calling Ollama chat"
        );

        match self.post(&request).await {
            Ok(response) => {
                messages.push(response.message.clone());
                Ok(response)
            }
            Err(e) => {
                messages.truncate(rollback_len);
                Err(e)
            }
        }
    }

    async fn post(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, GatewayError> {
        let response = self
            .client
            .post(&self.chat_url)
            .json(request)
            .send()
            .await
            .map_err(|e| convert_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(convert_status_error(
                status.as_u16(),
                &body,
                self.model.as_str(),
            ));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl LlmSession for OllamaSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let response = self.exchange(vec![ChatMessage::user(content)], None).await?;
        Ok(response.message.content)
    }

    async fn send_structured(&self, content: &str, schema: &Value) -> Result<String, GatewayError> {
        let response = self
            .exchange(vec![ChatMessage::user(content)], Some(schema))
            .await?;
        Ok(response.message.content)
    }

    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[Value],
    ) -> Result<LlmResponse, GatewayError> {
        if !tools.is_empty() {
            *self.tools.lock().await = tools.to_vec();
        }

        let response = self.exchange(vec![ChatMessage::user(content)], None).await?;
        Ok(response.to_llm_response())
    }

    async fn send_tool_results(&self, results: &[ToolOutput]) -> Result<LlmResponse, GatewayError> {
        let messages = results.iter().map(ChatMessage::tool).collect();
        let response = self.exchange(messages, None).await?;
        Ok(response.to_llm_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(server: &mockito::Server, system_prompt: &str) -> OllamaSession {
        OllamaSession::new(
            reqwest::Client::new(),
            format!("{}/api/chat", server.url()),
            Model::Qwen3,
            system_prompt,
            0.0,
        )
    }

    #[tokio::test]
    async fn test_send_returns_content_and_keeps_history() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "model": "qwen3:8b",
                    "message": { "role": "assistant", "content": "Hello" },
                    "done": true
                })
                .to_string(),
            )
            .expect(2)
            .create_async()
            .await;

        let session = session(&server, "You are a planner.");
        assert_eq!(session.send("hi").await.unwrap(), "Hello");
        assert_eq!(session.send("again").await.unwrap(), "Hello");
        mock.assert_async().await;

        let history = session.messages.lock().await;
        let roles: Vec<&str> = history.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, ["system", "user", "assistant", "user", "assistant"]);
    }

    #[tokio::test]
    async fn test_structured_call_sends_schema_as_format() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "qwen3:8b",
                "stream": false,
                "format": { "type": "object" }
            })))
            .with_status(200)
            .with_body(
                json!({ "message": { "role": "assistant", "content": "{\"topics\": []}" } })
                    .to_string(),
            )
            .create_async()
            .await;

        let session = session(&server, "");
        let raw = session
            .send_structured("plan", &json!({ "type": "object" }))
            .await
            .unwrap();
        assert_eq!(raw, "{\"topics\": []}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_tool_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let _first = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::Regex(r#""content":"analyze"\}\]"#.to_string()))
            .with_status(200)
            .with_body(
                json!({
                    "message": {
                        "role": "assistant",
                        "content": "",
                        "tool_calls": [
                            { "function": { "name": "search_web", "arguments": { "query": "permits" } } }
                        ]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let follow_up = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::Regex(r#""role":"tool""#.to_string()),
                mockito::Matcher::Regex(r#""tools":\["#.to_string()),
            ]))
            .with_status(200)
            .with_body(
                json!({ "message": { "role": "assistant", "content": "Permits take six weeks." } })
                    .to_string(),
            )
            .create_async()
            .await;

        let session = session(&server, "");
        let tools = vec![json!({ "type": "function", "function": { "name": "search_web" } })];
        let response = session.send_with_tools("analyze", &tools).await.unwrap();
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);

        let output = ToolOutput::success(&calls[0], "six weeks");
        let response = session.send_tool_results(&[output]).await.unwrap();
        assert_eq!(response.text_content(), "Permits take six weeks.");
        follow_up.assert_async().await;

        let history = session.messages.lock().await;
        assert_eq!(history[2].role, "tool");
        assert_eq!(history[2].tool_name.as_deref(), Some("search_web"));
    }

    #[tokio::test]
    async fn test_missing_model_maps_to_model_not_available_and_rolls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error":"model \"qwen3:8b\" not found, try pulling it first"}"#)
            .create_async()
            .await;

        let session = session(&server, "system");
        let err = session.send("hi").await.unwrap_err();
        assert!(matches!(err, GatewayError::ModelNotAvailable(_)));
        assert_eq!(session.messages.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let session = OllamaSession::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/api/chat".to_string(),
            Model::Qwen3,
            "",
            0.0,
        );
        let err = session.send("hi").await.unwrap_err();
        assert!(matches!(err, GatewayError::ConnectionError(_)));
    }
}
