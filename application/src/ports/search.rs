//! Search tool port
//!
//! Analysts call search tools to ground their analysis in current facts.
//! Each backend (web search, knowledge search) implements [`SearchTool`];
//! the [`SearchToolbox`] exposes them to the model as function-calling
//! tools and executes the calls it makes.

use async_trait::async_trait;
use planner_domain::{ToolCall, ToolDefinition, ToolOutput, ToolParameter};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from a search backend
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Empty query")]
    EmptyQuery,

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid search response: {0}")]
    InvalidResponse(String),

    #[error("Search backend unavailable: {0}")]
    Unavailable(String),
}

/// A search backend the analyst can call with a free-text query.
#[async_trait]
pub trait SearchTool: Send + Sync {
    /// Tool name as exposed to the model (e.g. `search_web`)
    fn name(&self) -> &str;

    /// Description shown to the model
    fn description(&self) -> &str;

    /// Run the query and return formatted results.
    async fn search(&self, query: &str) -> Result<String, SearchError>;

    /// Function-calling definition with a single required `query` argument.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameter(ToolParameter::new(
            "query",
            "The search query",
            true,
        ))
    }
}

/// The set of search tools available to an analyst.
#[derive(Clone, Default)]
pub struct SearchToolbox {
    tools: Vec<Arc<dyn SearchTool>>,
}

impl SearchToolbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, tool: Arc<dyn SearchTool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Definitions in the function-calling format sent to the model.
    pub fn function_schemas(&self) -> Vec<serde_json::Value> {
        self.definitions()
            .iter()
            .map(ToolDefinition::to_function_schema)
            .collect()
    }

    /// Execute one tool call. Failures are reported back to the model as
    /// error outputs instead of aborting the analysis.
    pub async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let Some(tool) = self.tools.iter().find(|t| t.name() == call.tool_name) else {
            warn!("Model requested unknown tool: {}", call.tool_name);
            return ToolOutput::failure(call, format!("Unknown tool: {}", call.tool_name));
        };

        let query = match call.require_string("query") {
            Ok(q) => q.trim(),
            Err(msg) => return ToolOutput::failure(call, msg),
        };
        if query.is_empty() {
            return ToolOutput::failure(call, SearchError::EmptyQuery.to_string());
        }

        debug!("Running {} for query: {}", call.tool_name, query);
        match tool.search(query).await {
            Ok(results) => ToolOutput::success(call, results),
            Err(e) => {
                warn!("{} failed: {}", call.tool_name, e);
                ToolOutput::failure(call, e.to_string())
            }
        }
    }
}
