//! LLM provider adapters

pub mod ollama;

pub use ollama::{OllamaConfig, OllamaGateway, OllamaSession};
