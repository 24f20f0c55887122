//! Ollama `/api/chat` wire types and conversions.
//!
//! Ollama's chat endpoint is stateless, so the session resends the full
//! message list on every call. Tool calls carry no IDs on the wire; IDs are
//! synthesized as `call_<n>` and tool outputs are correlated back by name.

use planner_application::ports::llm_gateway::GatewayError;
use planner_domain::{ContentBlock, LlmResponse, Model, StopReason, ToolOutput};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One message in an Ollama chat history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl ChatMessage {
    fn plain(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
            tool_calls: Vec::new(),
            tool_name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain("user", content)
    }

    pub fn tool(output: &ToolOutput) -> Self {
        Self {
            tool_name: Some(output.tool_name.clone()),
            ..Self::plain("tool", output.content.clone())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    pub function: WireFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatOptions {
    pub temperature: f64,
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'a Value>,
    #[serde(skip_serializing_if = "<[Value]>::is_empty")]
    pub tools: &'a [Value],
    pub options: ChatOptions,
}

/// Response body of a non-streaming `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub message: ChatMessage,
    #[serde(default)]
    pub done_reason: Option<String>,
}

impl ChatResponse {
    /// Convert into the domain response, synthesizing tool call IDs.
    pub fn to_llm_response(&self) -> LlmResponse {
        let mut content = Vec::new();
        if !self.message.content.is_empty() {
            content.push(ContentBlock::Text(self.message.content.clone()));
        }
        for (i, call) in self.message.tool_calls.iter().enumerate() {
            content.push(ContentBlock::ToolUse {
                id: format!("call_{}", i),
                name: call.function.name.clone(),
                input: call.function.arguments.clone(),
            });
        }

        let stop_reason = if !self.message.tool_calls.is_empty() {
            StopReason::ToolUse
        } else {
            match self.done_reason.as_deref() {
                None | Some("stop") => StopReason::EndTurn,
                Some("length") => StopReason::MaxTokens,
                Some(other) => StopReason::Other(other.to_string()),
            }
        };

        LlmResponse {
            content,
            stop_reason: Some(stop_reason),
            model: self.model.clone(),
        }
    }
}

/// Response body of `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagEntry {
    pub name: String,
}

impl TagsResponse {
    pub fn into_models(self) -> Vec<Model> {
        self.models
            .into_iter()
            .filter_map(|entry| entry.name.parse::<Model>().ok())
            .collect()
    }
}

/// Map a transport error from `reqwest` to a gateway error.
pub fn convert_transport_error(err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::ConnectionError(err.to_string())
    } else if err.is_decode() {
        GatewayError::InvalidResponse(err.to_string())
    } else {
        GatewayError::RequestFailed(err.to_string())
    }
}

/// Map a non-success HTTP status (and Ollama's `{"error": ...}` body) to a
/// gateway error.
pub fn convert_status_error(status: u16, body: &str, model: &str) -> GatewayError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    if status == 404 {
        GatewayError::ModelNotAvailable(format!("{}: {}", model, message))
    } else {
        GatewayError::RequestFailed(format!("HTTP {}: {}", status, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_domain::ToolCall;
    use serde_json::json;

    #[test]
    fn test_request_omits_format_and_tools_when_unset() {
        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("hi")];
        let request = ChatRequest {
            model: "qwen3:8b",
            messages: &messages,
            stream: false,
            format: None,
            tools: &[],
            options: ChatOptions { temperature: 0.0 },
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "qwen3:8b");
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert!(body.get("format").is_none());
        assert!(body.get("tools").is_none());
        assert!(body["messages"][1].get("tool_calls").is_none());
    }

    #[test]
    fn test_request_carries_schema_and_tools() {
        let schema = json!({ "type": "object" });
        let tools = vec![json!({ "type": "function", "function": { "name": "search_web" } })];
        let messages = vec![ChatMessage::user("plan")];
        let request = ChatRequest {
            model: "qwen3:8b",
            messages: &messages,
            stream: false,
            format: Some(&schema),
            tools: &tools,
            options: ChatOptions { temperature: 0.3 },
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["format"]["type"], "object");
        assert_eq!(body["tools"][0]["function"]["name"], "search_web");
        assert_eq!(body["options"]["temperature"], 0.3);
    }

    #[test]
    fn test_text_response_conversion() {
        let response: ChatResponse = serde_json::from_value(json!({
            "model": "granite3.3:8b",
            "message": { "role": "assistant", "content": "Permits take six weeks." },
            "done": true,
            "done_reason": "stop"
        }))
        .unwrap();

        let llm = response.to_llm_response();
        assert_eq!(llm.text_content(), "Permits take six weeks.");
        assert_eq!(llm.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(llm.model.as_deref(), Some("granite3.3:8b"));
        assert!(!llm.has_tool_calls());
    }

    #[test]
    fn test_tool_call_response_gets_synthesized_ids() {
        let response: ChatResponse = serde_json::from_value(json!({
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [
                    { "function": { "name": "search_web", "arguments": { "query": "permits" } } },
                    { "function": { "name": "search_knowledge", "arguments": { "query": "margins" } } }
                ]
            },
            "done": true
        }))
        .unwrap();

        let llm = response.to_llm_response();
        assert_eq!(llm.stop_reason, Some(StopReason::ToolUse));
        let calls = llm.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].native_id.as_deref(), Some("call_0"));
        assert_eq!(calls[1].tool_name, "search_knowledge");
        assert_eq!(calls[1].get_string("query"), Some("margins"));
        // no empty text block
        assert_eq!(llm.content.len(), 2);
    }

    #[test]
    fn test_length_done_reason_maps_to_max_tokens() {
        let response: ChatResponse = serde_json::from_value(json!({
            "message": { "role": "assistant", "content": "cut" },
            "done_reason": "length"
        }))
        .unwrap();
        assert_eq!(
            response.to_llm_response().stop_reason,
            Some(StopReason::MaxTokens)
        );
    }

    #[test]
    fn test_tool_message_carries_tool_name() {
        let call = ToolCall::new("search_web").with_arg("query", "permits");
        let message = ChatMessage::tool(&ToolOutput::success(&call, "three results"));
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_name"], "search_web");
        assert_eq!(value["content"], "three results");
    }

    #[test]
    fn test_status_error_mapping() {
        let err = convert_status_error(404, r#"{"error":"model 'x' not found"}"#, "x");
        assert!(matches!(err, GatewayError::ModelNotAvailable(m) if m.contains("not found")));

        let err = convert_status_error(500, "boom", "x");
        assert!(matches!(err, GatewayError::RequestFailed(m) if m == "HTTP 500: boom"));
    }

    #[test]
    fn test_tags_conversion() {
        let tags: TagsResponse = serde_json::from_value(json!({
            "models": [{ "name": "qwen3:8b" }, { "name": "llama3.2:3b" }]
        }))
        .unwrap();
        assert_eq!(
            tags.into_models(),
            vec![Model::Qwen3, Model::Custom("llama3.2:3b".to_string())]
        );
    }
}
