//! Ollama provider
//!
//! Talks to Ollama's non-streaming `/api/chat` endpoint with `reqwest`.
//! Structured calls pass the JSON schema as `format`; tool calls pass
//! function schemas as `tools`.

mod gateway;
mod session;
mod types;

pub use gateway::{OllamaConfig, OllamaGateway};
pub use session::OllamaSession;
