//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod analysis;
mod models;
mod ollama;
mod output;
mod refinement;
mod search;

pub use analysis::FileAnalysisConfig;
pub use models::FileModelsConfig;
pub use ollama::FileOllamaConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use refinement::FileRefinementConfig;
pub use search::{FileSearchConfig, WebBackend};

use planner_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Ollama runtime settings
    pub ollama: FileOllamaConfig,
    /// Refinement loop settings
    pub refinement: FileRefinementConfig,
    /// Topic analysis settings
    pub analysis: FileAnalysisConfig,
    /// Search tool settings
    pub search: FileSearchConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.models.to_model_config().1);
        issues.extend(self.refinement.validate());
        issues.extend(self.analysis.validate());
        issues.extend(self.search.validate());

        if self.ollama.host.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyHost,
                "ollama.host: cannot be empty",
            ));
        }

        issues
    }

    /// Whether any issue is fatal.
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(ConfigIssue::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_domain::{Model, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[models]
planner = "qwen3:8b"
critic = "granite3.3:8b"
analyst = "granite3.3:2b"

[ollama]
host = "http://gpu-box:11434"
temperature = 0.2

[refinement]
quality_threshold = 8.5
max_iterations = 3

[analysis]
max_subtopics_per_dispatch = 2
expert_routing = false

[search]
web_backend = "duckduckgo"

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let (models, issues) = config.models.to_model_config();
        assert!(issues.is_empty());
        assert_eq!(models.critic, Model::Granite33);
        assert_eq!(models.analyst, Model::Granite33Lite);
        assert_eq!(config.ollama.host, "http://gpu-box:11434");
        assert_eq!(config.ollama.request_timeout_seconds, 600);
        assert_eq!(config.refinement.to_params().quality_threshold, 8.5);
        assert_eq!(config.refinement.to_params().max_iterations, 3);
        assert_eq!(config.analysis.to_params().max_subtopics_per_dispatch, 2);
        assert!(!config.analysis.expert_routing);
        assert_eq!(config.search.web_backend, WebBackend::DuckDuckGo);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[refinement]\nmax_iterations = 2\n").unwrap();
        assert_eq!(config.refinement.max_iterations, 2);
        // Defaults should apply
        assert_eq!(config.refinement.quality_threshold, 9.0);
        assert!(config.models.planner.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_default_config_only_warns() {
        let issues = FileConfig::default().validate();
        // no Tavily key by default
        assert_eq!(issues.len(), 1);
        assert!(!FileConfig::has_errors(&issues));
    }

    #[test]
    fn test_validate_collects_errors_across_sections() {
        let config: FileConfig = toml::from_str(
            r#"
[models]
planner = ""

[refinement]
max_iterations = 0

[search]
web_backend = "duckduckgo"
"#,
        )
        .unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(FileConfig::has_errors(&issues));
    }
}
