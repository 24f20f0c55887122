//! Domain layer for bizplan
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Refinement
//!
//! A plan is an ordered list of research topics. The refinement loop asks a
//! generator for topics, asks a critic to score the accumulated plan, and
//! keeps merging new topics until the score clears a quality threshold.
//!
//! ## Analysis
//!
//! The finalized plan is walked topic by topic. Each topic's leading
//! subtopics are analyzed by routed experts and condensed into a report
//! stored on the topic.

pub mod config;
pub mod core;
pub mod planning;
pub mod prompt;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, ModelConfig, OutputFormat, Severity};
pub use core::{
    error::ValidationError,
    model::Model,
    string::{strip_reasoning, truncate},
};
pub use planning::{
    critique::{Critique, ScoreBand},
    decode::{
        CritiqueDecoder, ExpertDecisionDecoder, PlanDecoder, SchemaValidationError,
        StructuredDecoder, extract_json,
    },
    expert::{ExpertDecision, ExpertDomain},
    plan::Plan,
    progress::{AnalysisProgress, SupervisorPhase},
    refinement::{RefinementPhase, RefinementState},
    topic::Topic,
};
pub use prompt::{PromptTemplate, SubtopicBrief};
pub use session::response::{ContentBlock, LlmResponse, StopReason};
pub use tool::entities::{ToolCall, ToolDefinition, ToolOutput, ToolParameter};
