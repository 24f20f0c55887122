//! Plan critique backed by a local model.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::plan_author::{CritiqueError, PlanCritic};
use async_trait::async_trait;
use planner_domain::{Critique, CritiqueDecoder, Model, Plan, PromptTemplate, StructuredDecoder};
use std::sync::Arc;
use tracing::info;

/// [`PlanCritic`] that asks a reviewer model to score the plan.
pub struct LlmPlanCritic<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    model: Model,
    decoder: CritiqueDecoder,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> LlmPlanCritic<G> {
    pub fn new(gateway: Arc<G>, model: Model) -> Self {
        Self {
            gateway,
            model,
            decoder: CritiqueDecoder,
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
impl<G: LlmGateway + 'static> PlanCritic for LlmPlanCritic<G> {
    async fn critique(
        &self,
        subject: &str,
        context: &str,
        plan: &Plan,
    ) -> Result<Critique, CritiqueError> {
        if plan.is_empty() {
            return Err(CritiqueError::EmptyPlan);
        }

        info!("Critiquing {} topics with {}", plan.len(), self.model);

        let session = self
            .gateway
            .create_session(&self.model, PromptTemplate::critique_system())
            .await?;
        let raw = session
            .send_structured(
                &PromptTemplate::critique(subject, context, plan),
                &self.decoder.schema(),
            )
            .await?;
        let critique = self.decoder.decode(&raw)?;

        self.conversation_logger.log(ConversationEvent::new(
            "plan_critiqued",
            serde_json::json!({
                "model": self.model.to_string(),
                "topics": plan.len(),
                "score": critique.score(),
                "band": critique.score_band().to_string(),
                "open_issues": critique.open_issue_count(),
                "raw": raw,
            }),
        ));

        Ok(critique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::{GatewayError, LlmSession};
    use planner_domain::{SchemaValidationError, Topic, ValidationError};
    use std::sync::Mutex;

    struct FixedGateway {
        reply: Result<String, String>,
    }

    struct FixedSession {
        model: Model,
        reply: Result<String, String>,
    }

    #[async_trait]
    impl LlmGateway for FixedGateway {
        async fn create_session(
            &self,
            model: &Model,
            _system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Ok(Box::new(FixedSession {
                model: model.clone(),
                reply: self.reply.clone(),
            }))
        }

        async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
            Ok(vec![])
        }
    }

    #[async_trait]
    impl LlmSession for FixedSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn send(&self, _content: &str) -> Result<String, GatewayError> {
            self.reply.clone().map_err(GatewayError::RequestFailed)
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    fn critic(reply: Result<&str, &str>) -> LlmPlanCritic<FixedGateway> {
        let gateway = FixedGateway {
            reply: reply.map(str::to_string).map_err(str::to_string),
        };
        LlmPlanCritic::new(Arc::new(gateway), Model::Granite33)
    }

    fn plan() -> Plan {
        Plan::new(vec![Topic::new("Market research", "").unwrap()]).unwrap()
    }

    #[tokio::test]
    async fn test_critique_is_decoded_and_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let critic = critic(Ok(
            r#"{"assessment": "Thin", "weaknesses": ["No finance"], "score": 4}"#,
        ))
        .with_conversation_logger(logger.clone());

        let critique = critic.critique("Falooda", "Sweden", &plan()).await.unwrap();
        assert_eq!(critique.score(), 4.0);
        assert_eq!(critique.weaknesses(), ["No finance"]);

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "plan_critiqued");
        assert_eq!(events[0].1["band"], "adequate");
    }

    #[tokio::test]
    async fn test_empty_plan_rejected_without_model_call() {
        let critic = critic(Err("must not be called"));
        let err = critic
            .critique("Falooda", "Sweden", &Plan::draft())
            .await
            .unwrap_err();
        assert!(matches!(err, CritiqueError::EmptyPlan));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_schema_error() {
        let critic = critic(Ok(r#"{"assessment": "Great", "score": 11}"#));
        let err = critic.critique("Falooda", "Sweden", &plan()).await.unwrap_err();
        assert!(matches!(
            err,
            CritiqueError::Schema(SchemaValidationError::Invariant(
                ValidationError::ScoreOutOfRange(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_gateway_error_propagates() {
        let critic = critic(Err("connection reset"));
        let err = critic.critique("Falooda", "Sweden", &plan()).await.unwrap_err();
        assert!(matches!(err, CritiqueError::Gateway(_)));
    }
}
