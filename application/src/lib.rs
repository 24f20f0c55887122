//! Application layer for bizplan
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AnalysisParams, RefinementParams};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    plan_author::{CritiqueError, GenerationError, PlanCritic, PlanGenerator},
    progress::{AnalysisProgressNotifier, NoProgress, RefinementProgressNotifier},
    search::{SearchError, SearchTool, SearchToolbox},
    topic_analyzer::{AnalysisRequest, AnalyzeTopicError, TopicAnalyzer},
};
pub use use_cases::analyze_topic::ToolAugmentedAnalyzer;
pub use use_cases::critique_plan::LlmPlanCritic;
pub use use_cases::generate_plan::LlmPlanGenerator;
pub use use_cases::refine_plan::{
    RefinePlanError, RefinePlanInput, RefinePlanUseCase, RefinementOutcome,
};
pub use use_cases::run_analysis::{
    AnalysisOutcome, RunAnalysisError, RunAnalysisInput, RunAnalysisUseCase, TopicReport,
};
