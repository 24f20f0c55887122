//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod llm_gateway;
pub mod plan_author;
pub mod progress;
pub mod search;
pub mod topic_analyzer;
