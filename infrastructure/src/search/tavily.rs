//! `search_web` backed by the Tavily search API.

use async_trait::async_trait;
use planner_application::ports::search::{SearchError, SearchTool};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SEARCH_WEB: &str = "search_web";

const TAVILY_API_URL: &str = "https://api.tavily.com/search";
const TAVILY_TOPIC: &str = "general";

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    topic: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

pub struct TavilySearch {
    client: reqwest::Client,
    api_key: String,
    max_results: usize,
    endpoint: String,
}

impl TavilySearch {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, max_results: usize) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            max_results,
            endpoint: TAVILY_API_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchTool for TavilySearch {
    fn name(&self) -> &str {
        SEARCH_WEB
    }

    fn description(&self) -> &str {
        "Search the web for current information: market data, regulations, competitors, prices."
    }

    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        debug!(query = %query, max_results = self.max_results, "Tavily search");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&TavilyRequest {
                api_key: &self.api_key,
                query,
                max_results: self.max_results,
                topic: TAVILY_TOPIC,
            })
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::RequestFailed(format!(
                "Tavily returned {}",
                response.status()
            )));
        }

        let body: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        Ok(format_results(query, &body))
    }
}

fn format_results(query: &str, body: &TavilyResponse) -> String {
    if body.results.is_empty() && body.answer.as_deref().is_none_or(str::is_empty) {
        return "No results".to_string();
    }

    let mut sections = vec![format!("## Search Results for: {}", query)];

    if let Some(answer) = body.answer.as_deref()
        && !answer.is_empty()
    {
        sections.push(format!("### Answer\n{}", answer));
    }

    for result in &body.results {
        sections.push(format!(
            "### {}\n{}\nSource: {}",
            result.title, result.content, result.url
        ));
    }

    sections.join("\n\n")
}
