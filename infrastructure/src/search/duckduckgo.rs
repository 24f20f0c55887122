//! `search_web` backed by the DuckDuckGo Instant Answer API.
//!
//! Needs no API key, so it is the fallback when Tavily is not configured.
//! Instant answers carry abstracts, definitions and related topics rather
//! than full result listings.

use super::tavily::SEARCH_WEB;
use async_trait::async_trait;
use planner_application::ports::search::{SearchError, SearchTool};
use serde_json::Value;
use tracing::debug;

const DDG_API_URL: &str = "https://api.duckduckgo.com/";
const MAX_RELATED_TOPICS: usize = 10;

pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoSearch {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: DDG_API_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchTool for DuckDuckGoSearch {
    fn name(&self) -> &str {
        SEARCH_WEB
    }

    fn description(&self) -> &str {
        "Search the web using DuckDuckGo. Returns instant answers, abstracts, and related topics."
    }

    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        debug!(query = %query, "DuckDuckGo search");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .header("User-Agent", "bizplan/0.1 (search tool)")
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::RequestFailed(format!(
                "DuckDuckGo returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        Ok(format_search_results(query, &body))
    }
}

/// Render an instant-answer payload as markdown sections.
fn format_search_results(query: &str, data: &Value) -> String {
    let mut sections: Vec<String> = vec![format!("## Search Results for: {}", query)];

    if let Some(abstract_text) = data["AbstractText"].as_str()
        && !abstract_text.is_empty()
    {
        let source = data["AbstractSource"].as_str().unwrap_or("Unknown");
        let url = data["AbstractURL"].as_str().unwrap_or("");
        sections.push(format!(
            "### Summary ({})\n{}\nSource: {}",
            source, abstract_text, url
        ));
    }

    if let Some(answer) = data["Answer"].as_str()
        && !answer.is_empty()
    {
        sections.push(format!("### Instant Answer\n{}", answer));
    }

    if let Some(definition) = data["Definition"].as_str()
        && !definition.is_empty()
    {
        let source = data["DefinitionSource"].as_str().unwrap_or("Unknown");
        sections.push(format!("### Definition ({})\n{}", source, definition));
    }

    // Grouped topics have no `Text` and are skipped
    if let Some(topics) = data["RelatedTopics"].as_array() {
        let related: Vec<String> = topics
            .iter()
            .filter_map(|t| {
                let text = t["Text"].as_str().filter(|s| !s.is_empty())?;
                let url = t["FirstURL"].as_str().unwrap_or("");
                Some(format!("- {} ({})", text, url))
            })
            .take(MAX_RELATED_TOPICS)
            .collect();

        if !related.is_empty() {
            sections.push(format!("### Related Topics\n{}", related.join("\n")));
        }
    }

    if sections.len() == 1 {
        return "No results".to_string();
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_with_abstract() {
        let data = json!({
            "AbstractText": "A food truck is a mobile kitchen.",
            "AbstractSource": "Wikipedia",
            "AbstractURL": "https://en.wikipedia.org/wiki/Food_truck",
            "Answer": "",
            "RelatedTopics": []
        });

        let output = format_search_results("food truck", &data);
        assert!(output.contains("### Summary (Wikipedia)"));
        assert!(output.contains("mobile kitchen"));
    }

    #[test]
    fn test_format_related_topics_capped_and_groups_skipped() {
        let mut topics: Vec<Value> = (0..15)
            .map(|i| json!({ "Text": format!("Topic {}", i), "FirstURL": "https://ddg.example" }))
            .collect();
        topics.insert(0, json!({ "Name": "Group", "Topics": [] }));
        let data = json!({ "RelatedTopics": topics });

        let output = format_search_results("trucks", &data);
        assert!(output.contains("- Topic 0 (https://ddg.example)"));
        assert!(output.contains("- Topic 9"));
        assert!(!output.contains("- Topic 10"));
    }

    #[test]
    fn test_format_nothing_found() {
        let data = json!({ "AbstractText": "", "Answer": "", "RelatedTopics": [] });
        assert_eq!(format_search_results("obscure", &data), "No results");
    }

    #[tokio::test]
    async fn test_search_queries_instant_answer_api() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("q".into(), "food truck".into()),
                mockito::Matcher::UrlEncoded("format".into(), "json".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"Answer":"42 trucks","RelatedTopics":[]}"#)
            .create_async()
            .await;

        let tool = DuckDuckGoSearch::new(reqwest::Client::new())
            .with_endpoint(format!("{}/", server.url()));
        let output = tool.search("food truck").await.unwrap();
        assert!(output.contains("### Instant Answer\n42 trucks"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let tool = DuckDuckGoSearch::new(reqwest::Client::new());
        assert!(matches!(tool.search("").await, Err(SearchError::EmptyQuery)));
    }
}
