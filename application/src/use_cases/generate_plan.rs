//! Plan generation backed by a local model.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::plan_author::{GenerationError, PlanGenerator};
use async_trait::async_trait;
use planner_domain::{Critique, Model, Plan, PlanDecoder, PromptTemplate, StructuredDecoder};
use std::sync::Arc;
use tracing::{debug, info};

/// [`PlanGenerator`] that prompts a planner model for topics.
///
/// Each call opens a fresh session: refinement prompts carry the prior
/// plan and critique themselves.
pub struct LlmPlanGenerator<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    model: Model,
    decoder: PlanDecoder,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> LlmPlanGenerator<G> {
    pub fn new(gateway: Arc<G>, model: Model) -> Self {
        Self {
            gateway,
            model,
            decoder: PlanDecoder,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> PlanGenerator for LlmPlanGenerator<G> {
    async fn generate(
        &self,
        subject: &str,
        context: &str,
        prior: Option<&Plan>,
        critique: Option<&Critique>,
    ) -> Result<Plan, GenerationError> {
        let prompt = match (prior, critique) {
            (Some(prior), Some(critique)) => {
                PromptTemplate::planning_with_feedback(subject, context, prior, critique)
            }
            _ => PromptTemplate::planning(subject, context),
        };
        let refining = prior.is_some() && critique.is_some();

        info!(
            "Generating {} with {}",
            if refining { "additional topics" } else { "initial plan" },
            self.model
        );

        let session = self
            .gateway
            .create_session(&self.model, &PromptTemplate::planning_system(subject, context))
            .await?;
        let raw = session
            .send_structured(&prompt, &self.decoder.schema())
            .await?;
        debug!("Planner replied with {} bytes", raw.len());

        let plan = self.decoder.decode(&raw)?;

        self.conversation_logger.log(ConversationEvent::new(
            "plan_generated",
            serde_json::json!({
                "model": self.model.to_string(),
                "refining": refining,
                "topics": plan.topic_names(),
                "raw": raw,
            }),
        ));

        Ok(plan)
    }
}
