//! Topic analyzer port
//!
//! The analysis supervisor hands each topic to a [`TopicAnalyzer`] and
//! stores the report it returns.

use super::llm_gateway::GatewayError;
use async_trait::async_trait;
use planner_domain::{AnalysisProgress, Topic};
use std::time::Duration;
use thiserror::Error;

/// Errors from a topic analyzer
#[derive(Error, Debug)]
pub enum AnalyzeTopicError {
    #[error("Topic analysis failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Topic analysis timed out after {0:?}")]
    Timeout(Duration),

    #[error("Analyst returned an empty report for {0}")]
    EmptyReport(String),
}

/// Everything an analyst needs to research one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub subject: String,
    pub context: String,
    /// Name of the active topic
    pub topic: String,
    /// The topic's rationale
    pub description: String,
    /// Subtopics to analyze, already limited to the dispatch fan-out
    pub subtopics: Vec<String>,
    /// Names of topics analyzed before this one
    pub processed: Vec<String>,
    /// Names of topics still waiting
    pub remaining: Vec<String>,
}

impl AnalysisRequest {
    /// Build the request for the active topic of `progress`.
    ///
    /// Returns `None` when no topic is active.
    pub fn for_active(
        progress: &AnalysisProgress,
        subject: &str,
        context: &str,
        max_subtopics: usize,
    ) -> Option<Self> {
        let active = progress.active()?;
        Some(Self {
            subject: subject.to_string(),
            context: context.to_string(),
            topic: active.name().to_string(),
            description: active.rationale().to_string(),
            subtopics: active.leading_subtopics(max_subtopics).to_vec(),
            processed: names(progress.processed()),
            remaining: names(progress.pending()),
        })
    }
}

fn names(topics: &[Topic]) -> Vec<String> {
    topics.iter().map(|t| t.name().to_string()).collect()
}

/// Researches one topic and returns its report.
#[async_trait]
pub trait TopicAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalyzeTopicError>;
}
