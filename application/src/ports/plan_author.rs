//! Plan author ports
//!
//! The refinement loop alternates between a [`PlanGenerator`] and a
//! [`PlanCritic`]. The default implementations prompt a local model
//! (see `use_cases::generate_plan` and `use_cases::critique_plan`); tests
//! substitute scripted ones.

use super::llm_gateway::GatewayError;
use async_trait::async_trait;
use planner_domain::{Critique, Plan, SchemaValidationError};
use std::time::Duration;
use thiserror::Error;

/// Errors from a plan generator
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Plan generation failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Generated plan is invalid: {0}")]
    Schema(#[from] SchemaValidationError),

    #[error("Plan generation timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors from a plan critic
#[derive(Error, Debug)]
pub enum CritiqueError {
    #[error("Plan critique failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Critique is invalid: {0}")]
    Schema(#[from] SchemaValidationError),

    #[error("Plan critique timed out after {0:?}")]
    Timeout(Duration),

    #[error("Cannot critique an empty plan")]
    EmptyPlan,
}

/// Produces research topics for a subject in a context.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Generate topics.
    ///
    /// Without a prior plan and critique this returns the initial plan.
    /// With both, it returns only the NEW topics that address the
    /// critique; the caller appends them to the prior plan.
    async fn generate(
        &self,
        subject: &str,
        context: &str,
        prior: Option<&Plan>,
        critique: Option<&Critique>,
    ) -> Result<Plan, GenerationError>;
}

/// Scores a plan and lists its gaps.
#[async_trait]
pub trait PlanCritic: Send + Sync {
    async fn critique(
        &self,
        subject: &str,
        context: &str,
        plan: &Plan,
    ) -> Result<Critique, CritiqueError>;
}
