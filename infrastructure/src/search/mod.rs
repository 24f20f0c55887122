//! Search tool adapters
//!
//! Implements the [`SearchTool`] port for the web (Tavily, DuckDuckGo)
//! and for the analyst model's own knowledge, and assembles the enabled
//! tools into a [`SearchToolbox`] from `[search]` configuration.

mod duckduckgo;
mod knowledge;
mod tavily;

pub use duckduckgo::DuckDuckGoSearch;
pub use knowledge::{KnowledgeSearch, SEARCH_KNOWLEDGE};
pub use tavily::{SEARCH_WEB, TavilySearch};

use crate::config::{FileSearchConfig, WebBackend};
use planner_application::ports::llm_gateway::LlmGateway;
use planner_application::ports::search::{SearchError, SearchTool, SearchToolbox};
use planner_domain::Model;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const SEARCH_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the toolbox the analyst gets, per `[search]` configuration.
///
/// `search_knowledge` answers with `knowledge_model` through `gateway`.
/// Tavily without an API key falls back to DuckDuckGo.
pub fn build_toolbox(
    config: &FileSearchConfig,
    gateway: Arc<dyn LlmGateway>,
    knowledge_model: &Model,
) -> Result<SearchToolbox, SearchError> {
    let mut toolbox = SearchToolbox::new();

    if config.knowledge {
        toolbox = toolbox.with_tool(Arc::new(KnowledgeSearch::new(
            gateway,
            knowledge_model.clone(),
        )));
    }

    if config.web {
        let client = reqwest::Client::builder()
            .timeout(SEARCH_HTTP_TIMEOUT)
            .build()
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;

        if config.web_backend == WebBackend::Tavily && config.tavily_key().is_none() {
            warn!("No Tavily API key configured, search_web uses DuckDuckGo");
        }

        let web: Arc<dyn SearchTool> = match (config.effective_web_backend(), config.tavily_key()) {
            (WebBackend::Tavily, Some(key)) => {
                Arc::new(TavilySearch::new(client, key, config.max_results))
            }
            _ => Arc::new(DuckDuckGoSearch::new(client)),
        };
        toolbox = toolbox.with_tool(web);
    }

    info!(tools = ?toolbox.tool_names(), "Search tools enabled");
    Ok(toolbox)
}
