//! Tool-augmented topic analysis.
//!
//! For each subtopic of the active topic:
//!
//! 1. route it to a domain expert (or the business analyst)
//! 2. let that expert analyze it, calling search tools as needed
//!
//! and finally synthesize the subtopic analyses and research notes into
//! one report for the topic.

use crate::config::AnalysisParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use crate::ports::search::SearchToolbox;
use crate::ports::topic_analyzer::{AnalysisRequest, AnalyzeTopicError, TopicAnalyzer};
use async_trait::async_trait;
use planner_domain::{
    ExpertDecisionDecoder, ExpertDomain, LlmResponse, Model, PromptTemplate, StructuredDecoder,
    SubtopicBrief, strip_reasoning, truncate,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sent when the tool round cap is hit and the model still wants tools.
const FINAL_ANSWER_PROMPT: &str =
    "You have used all available searches. Write your complete analysis now using the information gathered so far.";

/// Max bytes of one search result kept as a research note.
const MAX_NOTE_LEN: usize = 4000;

/// [`TopicAnalyzer`] that routes subtopics to expert personas with access
/// to search tools.
pub struct ToolAugmentedAnalyzer<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    model: Model,
    toolbox: SearchToolbox,
    params: AnalysisParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> ToolAugmentedAnalyzer<G> {
    pub fn new(gateway: Arc<G>, model: Model) -> Self {
        Self {
            gateway,
            model,
            toolbox: SearchToolbox::new(),
            params: AnalysisParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_toolbox(mut self, toolbox: SearchToolbox) -> Self {
        self.toolbox = toolbox;
        self
    }

    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Bound one model call by the configured timeout.
    async fn timed<T, F>(&self, call: F) -> Result<T, AnalyzeTopicError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        match self.params.call_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| AnalyzeTopicError::Timeout(limit))?
                .map_err(AnalyzeTopicError::from),
            None => call.await.map_err(AnalyzeTopicError::from),
        }
    }

    /// Pick the expert for a subtopic. Undecodable replies fall back to
    /// the business analyst.
    async fn route(
        &self,
        topic: &str,
        subtopic: &str,
    ) -> Result<ExpertDomain, AnalyzeTopicError> {
        if !self.params.expert_routing {
            return Ok(ExpertDomain::default());
        }

        let decoder = ExpertDecisionDecoder;
        let session = self
            .timed(self.gateway.create_session(&self.model, ""))
            .await?;
        let raw = self
            .timed(session.send_structured(
                &PromptTemplate::expert_router(topic, subtopic),
                &decoder.schema(),
            ))
            .await?;

        match decoder.decode(&raw) {
            Ok(decision) => Ok(decision.expert),
            Err(e) => {
                warn!(
                    "Could not route \"{}\" ({}), using {}",
                    subtopic,
                    e,
                    ExpertDomain::default()
                );
                Ok(ExpertDomain::default())
            }
        }
    }

    /// Analyze one subtopic. Returns the analysis and any research notes
    /// gathered from successful tool calls.
    async fn analyze_subtopic(
        &self,
        request: &AnalysisRequest,
        subtopic: &str,
        expert: ExpertDomain,
    ) -> Result<(String, Vec<String>), AnalyzeTopicError> {
        let session = self
            .timed(
                self.gateway
                    .create_session(&self.model, &PromptTemplate::expert_system(expert)),
            )
            .await?;

        let prompt = PromptTemplate::subtopic_analysis(&SubtopicBrief {
            subject: &request.subject,
            context: &request.context,
            topic: &request.topic,
            description: &request.description,
            subtopic,
            processed: &request.processed,
            remaining: &request.remaining,
        });

        let tools = self.toolbox.function_schemas();
        let mut response = if tools.is_empty() {
            LlmResponse::from_text(self.timed(session.send(&prompt)).await?)
        } else {
            self.timed(session.send_with_tools(&prompt, &tools)).await?
        };

        let mut notes = Vec::new();
        let mut rounds = 0;
        while response.has_tool_calls() {
            if rounds >= self.params.max_tool_rounds {
                debug!("Tool round cap reached for \"{}\"", subtopic);
                response = self.final_answer(session.as_ref()).await?;
                break;
            }
            rounds += 1;

            let mut outputs = Vec::new();
            for call in response.tool_calls() {
                let output = self.toolbox.execute(&call).await;
                self.conversation_logger.log(ConversationEvent::new(
                    "tool_call",
                    serde_json::json!({
                        "topic": request.topic,
                        "subtopic": subtopic,
                        "tool": call.tool_name,
                        "arguments": call.arguments,
                        "is_error": output.is_error,
                        "result": truncate(&output.content, MAX_NOTE_LEN),
                    }),
                ));
                if !output.is_error {
                    notes.push(format!(
                        "[{}] {}",
                        call.tool_name,
                        truncate(&output.content, MAX_NOTE_LEN)
                    ));
                }
                outputs.push(output);
            }

            response = self.timed(session.send_tool_results(&outputs)).await?;
        }

        Ok((strip_reasoning(&response.text_content()), notes))
    }

    async fn final_answer(&self, session: &dyn LlmSession) -> Result<LlmResponse, AnalyzeTopicError> {
        let text = self.timed(session.send(FINAL_ANSWER_PROMPT)).await?;
        Ok(LlmResponse::from_text(text))
    }

    /// Merge subtopic analyses into one report.
    async fn synthesize(
        &self,
        request: &AnalysisRequest,
        analyses: &[(String, String)],
        notes: &[String],
    ) -> Result<String, AnalyzeTopicError> {
        let session = self
            .timed(
                self.gateway
                    .create_session(&self.model, PromptTemplate::report_system()),
            )
            .await?;
        let prompt = PromptTemplate::report(
            &request.subject,
            &request.context,
            &request.topic,
            analyses,
            notes,
        );
        let raw = self.timed(session.send(&prompt)).await?;
        Ok(strip_reasoning(&raw))
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> TopicAnalyzer for ToolAugmentedAnalyzer<G> {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalyzeTopicError> {
        // A topic without subtopics is analyzed as a whole.
        let subtopics: Vec<String> = if request.subtopics.is_empty() {
            vec![request.topic.clone()]
        } else {
            request.subtopics.clone()
        };

        info!(
            "Analyzing \"{}\" ({} subtopics, {} tools)",
            request.topic,
            subtopics.len(),
            self.toolbox.len()
        );

        let mut analyses = Vec::with_capacity(subtopics.len());
        let mut notes = Vec::new();
        for subtopic in &subtopics {
            let expert = self.route(&request.topic, subtopic).await?;
            debug!("\"{}\" routed to {}", subtopic, expert);

            let (analysis, found) = self.analyze_subtopic(request, subtopic, expert).await?;
            analyses.push((subtopic.clone(), analysis));
            notes.extend(found);
        }

        let report = self.synthesize(request, &analyses, &notes).await?;
        if report.is_empty() {
            return Err(AnalyzeTopicError::EmptyReport(request.topic.clone()));
        }

        self.conversation_logger.log(ConversationEvent::new(
            "topic_analyzed",
            serde_json::json!({
                "topic": request.topic,
                "subtopics": subtopics,
                "research_notes": notes.len(),
                "report_len": report.len(),
            }),
        ));

        Ok(report)
    }
}
