//! `search_knowledge`: answers a query from the analyst model itself.

use async_trait::async_trait;
use planner_application::ports::llm_gateway::LlmGateway;
use planner_application::ports::search::{SearchError, SearchTool};
use planner_domain::{Model, strip_reasoning};
use std::sync::Arc;
use tracing::debug;

pub const SEARCH_KNOWLEDGE: &str = "search_knowledge";

pub struct KnowledgeSearch {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
}

impl KnowledgeSearch {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self { gateway, model }
    }
}

#[async_trait]
impl SearchTool for KnowledgeSearch {
    fn name(&self) -> &str {
        SEARCH_KNOWLEDGE
    }

    fn description(&self) -> &str {
        "Search the model's own knowledge for business information: frameworks, benchmarks, typical costs."
    }

    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        debug!(model = %self.model, query_len = query.len(), "Knowledge search");

        let session = self
            .gateway
            .create_session(&self.model, "")
            .await
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;
        let answer = session
            .send(query)
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let answer = strip_reasoning(&answer);
        if answer.trim().is_empty() {
            Ok("No results".to_string())
        } else {
            Ok(answer.trim().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_application::ports::llm_gateway::{GatewayError, LlmSession};

    struct EchoGateway {
        reply: Result<String, String>,
    }

    struct EchoSession {
        model: Model,
        reply: Result<String, String>,
    }

    #[async_trait]
    impl LlmSession for EchoSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn send(&self, _content: &str) -> Result<String, GatewayError> {
            self.reply.clone().map_err(GatewayError::RequestFailed)
        }
    }

    #[async_trait]
    impl LlmGateway for EchoGateway {
        async fn create_session(
            &self,
            model: &Model,
            _system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Ok(Box::new(EchoSession {
                model: model.clone(),
                reply: self.reply.clone(),
            }))
        }

        async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
            Ok(vec![])
        }
    }

    fn tool(reply: Result<&str, &str>) -> KnowledgeSearch {
        let gateway = EchoGateway {
            reply: reply.map(str::to_string).map_err(str::to_string),
        };
        KnowledgeSearch::new(Arc::new(gateway), Model::Granite33)
    }

    #[tokio::test]
    async fn test_returns_answer_without_reasoning() {
        let output = tool(Ok("<think>hmm</think>\nMargins run 5-10%."))
            .search("food truck margins")
            .await
            .unwrap();
        assert_eq!(output, "Margins run 5-10%.");
    }

    #[tokio::test]
    async fn test_blank_answer_is_no_results() {
        assert_eq!(tool(Ok("  ")).search("q").await.unwrap(), "No results");
    }

    #[tokio::test]
    async fn test_empty_query_and_gateway_failure() {
        assert!(matches!(tool(Ok("x")).search(" ").await, Err(SearchError::EmptyQuery)));
        assert!(matches!(
            tool(Err("down")).search("q").await,
            Err(SearchError::RequestFailed(_))
        ));
    }
}
