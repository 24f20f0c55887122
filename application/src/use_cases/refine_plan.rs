//! Refine Plan use case
//!
//! Alternates generation and critique until the critic's score clears the
//! quality threshold or the iteration cap is reached.
//!
//! ```text
//! Generate ──▶ Critique ──score > threshold──▶ Done
//!    ▲             │
//!    └─otherwise───┘
//! ```
//!
//! The first generation produces the initial plan. Every later one
//! receives the accumulated plan and the latest critique and returns only
//! new topics, which are appended after the existing ones.

use crate::config::RefinementParams;
use crate::ports::plan_author::{CritiqueError, GenerationError, PlanCritic, PlanGenerator};
use crate::ports::progress::{NoProgress, RefinementProgressNotifier};
use crate::use_cases::shared::{Interrupted, guarded};
use planner_domain::{Critique, Plan, RefinementPhase, RefinementState, ValidationError};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during plan refinement
#[derive(Error, Debug)]
pub enum RefinePlanError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Critique(#[from] CritiqueError),

    #[error("Invalid plan state: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid refinement parameters: {0}")]
    InvalidParams(String),

    #[error(
        "Plan did not reach the quality threshold after {iterations} iterations (last score {score:.1})"
    )]
    Exhausted {
        iterations: usize,
        score: f64,
        plan: Box<Plan>,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl RefinePlanError {
    /// Whether the error came from a cancellation request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RefinePlanError::Cancelled)
    }
}

/// Input for the RefinePlan use case
#[derive(Debug, Clone)]
pub struct RefinePlanInput {
    /// What kind of business (e.g. "Falooda shop")
    pub subject: String,
    /// Where it operates (e.g. "Stockholm, Sweden")
    pub context: String,
}

impl RefinePlanInput {
    pub fn new(subject: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            context: context.into(),
        }
    }
}

/// How a refinement run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RefinementOutcome {
    /// The latest critique scored above the threshold.
    Converged {
        plan: Plan,
        critique: Critique,
        iterations: usize,
    },
    /// The iteration cap was reached first. Carries the last plan and critique.
    Exhausted {
        plan: Plan,
        critique: Critique,
        iterations: usize,
    },
}

impl RefinementOutcome {
    pub fn plan(&self) -> &Plan {
        match self {
            RefinementOutcome::Converged { plan, .. } | RefinementOutcome::Exhausted { plan, .. } => {
                plan
            }
        }
    }

    pub fn critique(&self) -> &Critique {
        match self {
            RefinementOutcome::Converged { critique, .. }
            | RefinementOutcome::Exhausted { critique, .. } => critique,
        }
    }

    /// Number of generate/critique cycles that ran.
    pub fn iterations(&self) -> usize {
        match self {
            RefinementOutcome::Converged { iterations, .. }
            | RefinementOutcome::Exhausted { iterations, .. } => *iterations,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, RefinementOutcome::Converged { .. })
    }

    pub fn into_plan(self) -> Plan {
        match self {
            RefinementOutcome::Converged { plan, .. } | RefinementOutcome::Exhausted { plan, .. } => {
                plan
            }
        }
    }

    /// Treat an exhausted run as an error.
    pub fn into_converged(self) -> Result<Self, RefinePlanError> {
        match self {
            RefinementOutcome::Exhausted {
                plan,
                critique,
                iterations,
            } => Err(RefinePlanError::Exhausted {
                iterations,
                score: critique.score(),
                plan: Box::new(plan),
            }),
            converged => Ok(converged),
        }
    }
}

/// Use case for refining a business plan through generate/critique cycles
pub struct RefinePlanUseCase<P: PlanGenerator + 'static, C: PlanCritic + 'static> {
    generator: Arc<P>,
    critic: Arc<C>,
    params: RefinementParams,
    cancellation_token: Option<CancellationToken>,
}

impl<P: PlanGenerator + 'static, C: PlanCritic + 'static> RefinePlanUseCase<P, C> {
    pub fn new(generator: Arc<P>, critic: Arc<C>) -> Self {
        Self {
            generator,
            critic,
            params: RefinementParams::default(),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: RefinementParams) -> Self {
        self.params = params;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn params(&self) -> &RefinementParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RefinePlanInput,
    ) -> Result<RefinementOutcome, RefinePlanError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RefinePlanInput,
        progress: &dyn RefinementProgressNotifier,
    ) -> Result<RefinementOutcome, RefinePlanError> {
        self.validate_params()?;

        info!(
            "Refining plan for {} in {} (threshold {:.1}, max {} iterations)",
            input.subject, input.context, self.params.quality_threshold, self.params.max_iterations
        );

        let mut state = RefinementState::new(input.subject, input.context);
        loop {
            debug!("Refinement phase: {}", state.phase());
            state = match state.phase() {
                RefinementPhase::Generate => {
                    if state.iteration() >= self.params.max_iterations {
                        warn!(
                            "Iteration cap of {} reached without passing the threshold",
                            self.params.max_iterations
                        );
                        return Self::finish(state, false);
                    }
                    self.generate_step(state, progress).await?
                }
                RefinementPhase::Critique => self.critique_step(state, progress).await?,
                RefinementPhase::Done => return Self::finish(state, true),
            };
        }
    }

    fn validate_params(&self) -> Result<(), RefinePlanError> {
        if self.params.max_iterations == 0 {
            return Err(RefinePlanError::InvalidParams(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        let threshold = self.params.quality_threshold;
        if !threshold.is_finite() || !(0.0..=10.0).contains(&threshold) {
            return Err(RefinePlanError::InvalidParams(format!(
                "quality_threshold must be within 0-10, got {}",
                threshold
            )));
        }
        Ok(())
    }

    /// GENERATE: ask for topics and append them to the plan.
    async fn generate_step(
        &self,
        state: RefinementState,
        progress: &dyn RefinementProgressNotifier,
    ) -> Result<RefinementState, RefinePlanError> {
        let iteration = state.iteration() + 1;
        let refining = state.prior_plan().is_some();
        progress.on_generation_start(iteration, refining);

        let call = self.generator.generate(
            state.subject(),
            state.context(),
            state.prior_plan(),
            state.critique(),
        );
        let delta = match guarded(call, self.params.call_timeout, &self.cancellation_token).await {
            Ok(result) => result?,
            Err(Interrupted::Cancelled) => return Err(RefinePlanError::Cancelled),
            Err(Interrupted::TimedOut(limit)) => {
                return Err(GenerationError::Timeout(limit).into());
            }
        };
        delta.validate()?;

        let delta = match self.params.max_topics_per_generation {
            Some(max) if delta.len() > max => {
                debug!("Keeping the first {} of {} generated topics", max, delta.len());
                delta.truncated(max)
            }
            _ => delta,
        };

        let new_topics = delta.len();
        let state = state.merge_generated(delta);
        info!(
            "Iteration {}: +{} topics, {} total",
            iteration,
            new_topics,
            state.plan().len()
        );
        progress.on_generation_complete(iteration, new_topics, state.plan().len());
        Ok(state)
    }

    /// CRITIQUE: score the plan and route on the threshold.
    async fn critique_step(
        &self,
        state: RefinementState,
        progress: &dyn RefinementProgressNotifier,
    ) -> Result<RefinementState, RefinePlanError> {
        let iteration = state.iteration();
        progress.on_critique_start(iteration);

        let call = self
            .critic
            .critique(state.subject(), state.context(), state.plan());
        let critique = match guarded(call, self.params.call_timeout, &self.cancellation_token).await
        {
            Ok(result) => result?,
            Err(Interrupted::Cancelled) => return Err(RefinePlanError::Cancelled),
            Err(Interrupted::TimedOut(limit)) => return Err(CritiqueError::Timeout(limit).into()),
        };

        let threshold = self.params.quality_threshold;
        let passed = critique.passes(threshold);
        info!(
            "Iteration {}: score {:.1} ({}), threshold {:.1}, {}",
            iteration,
            critique.score(),
            critique.score_band(),
            threshold,
            if passed { "passed" } else { "refining" }
        );
        progress.on_critique_complete(iteration, &critique, passed);

        Ok(state.apply_critique(critique, threshold)?)
    }

    fn finish(state: RefinementState, converged: bool) -> Result<RefinementOutcome, RefinePlanError> {
        let iterations = state.iteration();
        let (plan, critique) = state.into_parts();
        let critique = critique.ok_or(ValidationError::CritiqueWithoutPlan)?;
        Ok(if converged {
            RefinementOutcome::Converged {
                plan,
                critique,
                iterations,
            }
        } else {
            RefinementOutcome::Exhausted {
                plan,
                critique,
                iterations,
            }
        })
    }
}
