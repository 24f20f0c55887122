//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: an Ollama model tag (e.g. `qwen3:8b`)
//! - [`error::ValidationError`]: structural invariant violations
//! - [`string::truncate`]: UTF-8 safe previews for logs

pub mod error;
pub mod model;
pub mod string;
