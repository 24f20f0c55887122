//! Run Analysis use case
//!
//! Walks a finalized plan one topic at a time. Each step advances the
//! cursor, dispatches the active topic to the analyzer and stores the
//! report on the topic, then routes back to advance while topics remain.

use crate::config::AnalysisParams;
use crate::ports::progress::{AnalysisProgressNotifier, NoProgress};
use crate::ports::topic_analyzer::{AnalysisRequest, AnalyzeTopicError, TopicAnalyzer};
use crate::use_cases::shared::{Interrupted, guarded};
use planner_domain::{AnalysisProgress, Plan, SupervisorPhase, Topic, ValidationError};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur during topic analysis
#[derive(Error, Debug)]
pub enum RunAnalysisError {
    #[error("Analysis of \"{topic}\" failed: {source}")]
    Analysis {
        topic: String,
        #[source]
        source: AnalyzeTopicError,
    },

    #[error("Invalid analysis state: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid analysis parameters: {0}")]
    InvalidParams(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl RunAnalysisError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunAnalysisError::Cancelled)
    }
}

/// Input for the RunAnalysis use case
#[derive(Debug, Clone)]
pub struct RunAnalysisInput {
    pub subject: String,
    pub context: String,
    pub topics: Vec<Topic>,
}

impl RunAnalysisInput {
    pub fn new(subject: impl Into<String>, context: impl Into<String>, plan: Plan) -> Self {
        Self {
            subject: subject.into(),
            context: context.into(),
            topics: plan.into_topics(),
        }
    }
}

/// One analyzed topic's report.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicReport {
    pub topic: String,
    pub report: String,
}

/// Result of a completed analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    /// Every topic, each carrying its report.
    pub topics: Vec<Topic>,
    /// Reports in dispatch order.
    pub reports: Vec<TopicReport>,
}

impl AnalysisOutcome {
    /// The analyzed topics as a plan. Fails when there were no topics.
    pub fn into_plan(self) -> Result<Plan, ValidationError> {
        Plan::new(self.topics)
    }

    /// All reports as one markdown document, one section per topic.
    pub fn combined_report(&self) -> String {
        self.reports
            .iter()
            .map(|r| format!("# {}\n\n{}\n", r.topic, r.report.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Use case for analyzing every topic of a plan in order
pub struct RunAnalysisUseCase<A: TopicAnalyzer + 'static> {
    analyzer: Arc<A>,
    params: AnalysisParams,
    cancellation_token: Option<CancellationToken>,
}

impl<A: TopicAnalyzer + 'static> RunAnalysisUseCase<A> {
    pub fn new(analyzer: Arc<A>) -> Self {
        Self {
            analyzer,
            params: AnalysisParams::default(),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunAnalysisInput) -> Result<AnalysisOutcome, RunAnalysisError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunAnalysisInput,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<AnalysisOutcome, RunAnalysisError> {
        if self.params.max_subtopics_per_dispatch == 0 {
            return Err(RunAnalysisError::InvalidParams(
                "max_subtopics_per_dispatch must be at least 1".to_string(),
            ));
        }

        let RunAnalysisInput {
            subject,
            context,
            topics,
        } = input;
        let total = topics.len();
        let mut state = AnalysisProgress::new(topics);
        state.ensure_unanalyzed()?;

        info!("Analyzing {} topics for {} in {}", total, subject, context);
        progress.on_analysis_start(total);

        let mut reports = Vec::with_capacity(total);
        let mut phase = state.next_phase();

        loop {
            debug!("Supervisor phase {:?} at cursor {}", phase, state.cursor());
            phase = match phase {
                SupervisorPhase::Advance => {
                    state = state.advance()?;
                    SupervisorPhase::Dispatch
                }
                SupervisorPhase::Dispatch => {
                    let report = self.dispatch(&state, &subject, &context, progress).await?;
                    state = state.record_result(report.report.clone())?;
                    reports.push(report);
                    state.next_phase()
                }
                SupervisorPhase::Done => break,
            };
        }

        info!("Analysis complete: {} topics analyzed", reports.len());
        progress.on_analysis_complete(reports.len());

        Ok(AnalysisOutcome {
            topics: state.into_topics(),
            reports,
        })
    }

    /// DISPATCH: analyze the active topic.
    async fn dispatch(
        &self,
        state: &AnalysisProgress,
        subject: &str,
        context: &str,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<TopicReport, RunAnalysisError> {
        let topic = state.active().ok_or(ValidationError::NoActiveTopic)?;
        let request = AnalysisRequest::for_active(
            state,
            subject,
            context,
            self.params.max_subtopics_per_dispatch,
        )
        .ok_or(ValidationError::NoActiveTopic)?;
        let index = state.processed().len();
        let total = state.topics().len();

        info!("[{}/{}] Dispatching \"{}\"", index + 1, total, request.topic);
        progress.on_topic_start(index, total, topic);

        let call = self.analyzer.analyze(&request);
        let report = match guarded(call, None, &self.cancellation_token).await {
            Ok(result) => result.map_err(|source| RunAnalysisError::Analysis {
                topic: request.topic.clone(),
                source,
            })?,
            Err(Interrupted::Cancelled) => return Err(RunAnalysisError::Cancelled),
            Err(Interrupted::TimedOut(limit)) => {
                return Err(RunAnalysisError::Analysis {
                    topic: request.topic.clone(),
                    source: AnalyzeTopicError::Timeout(limit),
                });
            }
        };

        progress.on_topic_complete(index, total, topic);
        Ok(TopicReport {
            topic: request.topic,
            report,
        })
    }
}
