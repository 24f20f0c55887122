//! Infrastructure layer for bizplan
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Ollama gateway, search tools, file
//! storage, the conversation logger and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod search;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileAnalysisConfig, FileConfig, FileModelsConfig,
    FileOllamaConfig, FileOutputConfig, FileOutputFormat, FileRefinementConfig,
    FileSearchConfig, WebBackend,
};
pub use logging::JsonlConversationLogger;
pub use providers::{OllamaConfig, OllamaGateway, OllamaSession};
pub use search::{DuckDuckGoSearch, KnowledgeSearch, TavilySearch, build_toolbox};
pub use storage::{JsonPlanStore, PlanStoreError, ReportWriter, StoredPlan};
