//! Ollama runtime configuration from TOML (`[ollama]` section)

use serde::{Deserialize, Serialize};

/// Raw Ollama configuration
///
/// ```toml
/// [ollama]
/// host = "http://localhost:11434"
/// temperature = 0.0
/// request_timeout_seconds = 600
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Base URL of the Ollama server
    pub host: String,
    /// Sampling temperature for every request
    pub temperature: f64,
    /// HTTP timeout for a single chat request
    pub request_timeout_seconds: u64,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            temperature: 0.0,
            request_timeout_seconds: 600,
        }
    }
}
