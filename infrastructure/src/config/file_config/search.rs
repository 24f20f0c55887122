//! Search tool configuration from TOML (`[search]` section)

use planner_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Backend used for `search_web`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebBackend {
    /// Tavily search API (needs an API key)
    #[default]
    Tavily,
    /// DuckDuckGo instant answers (no key)
    DuckDuckGo,
}

/// Raw search configuration
///
/// ```toml
/// [search]
/// knowledge = true
/// web = true
/// web_backend = "tavily"
/// tavily_api_key = "tvly-..."   # or BIZPLAN_SEARCH__TAVILY_API_KEY
/// max_results = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Offer `search_knowledge` (answers from the analyst model itself)
    pub knowledge: bool,
    /// Offer `search_web`
    pub web: bool,
    pub web_backend: WebBackend,
    pub tavily_api_key: Option<String>,
    pub max_results: usize,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            knowledge: true,
            web: true,
            web_backend: WebBackend::default(),
            tavily_api_key: None,
            max_results: 5,
        }
    }
}

impl FileSearchConfig {
    /// The web backend that will actually run: Tavily without a key
    /// falls back to DuckDuckGo.
    pub fn effective_web_backend(&self) -> WebBackend {
        match self.web_backend {
            WebBackend::Tavily if self.tavily_key().is_none() => WebBackend::DuckDuckGo,
            backend => backend,
        }
    }

    /// The Tavily API key, ignoring blank values.
    pub fn tavily_key(&self) -> Option<&str> {
        self.tavily_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.web && self.web_backend == WebBackend::Tavily && self.tavily_key().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingSearchApiKey,
                "search.tavily_api_key: not set, search_web falls back to DuckDuckGo",
            ));
        }
        if !self.knowledge && !self.web {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoSearchTools,
                "search: all tools disabled, analysts answer from model knowledge only",
            ));
        }
        if self.web && self.max_results == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroLimit,
                "search.max_results: must be at least 1",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_falls_back_to_duckduckgo() {
        let config = FileSearchConfig::default();
        assert_eq!(config.effective_web_backend(), WebBackend::DuckDuckGo);

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::MissingSearchApiKey);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_key_selects_tavily() {
        let config = FileSearchConfig {
            tavily_api_key: Some("tvly-abc".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_web_backend(), WebBackend::Tavily);
        assert!(config.validate().is_empty());

        let blank = FileSearchConfig {
            tavily_api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.effective_web_backend(), WebBackend::DuckDuckGo);
    }

    #[test]
    fn test_backend_names() {
        let config: FileSearchConfig = toml::from_str(r#"web_backend = "duckduckgo""#).unwrap();
        assert_eq!(config.web_backend, WebBackend::DuckDuckGo);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_all_tools_disabled_warns() {
        let config = FileSearchConfig {
            knowledge: false,
            web: false,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::NoSearchTools);
    }
}
