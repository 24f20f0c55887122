//! Role-based model configuration from TOML (`[models]` section)

use planner_domain::{ConfigIssue, ConfigIssueCode, Model, ModelConfig};
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// planner = "qwen3:8b"        # Initial plan + refinement deltas
/// critic = "qwen3:8b"         # Plan scoring
/// analyst = "granite3.3:8b"   # Expert routing, analysis, report synthesis
/// lite = false                # Use the small variants of the defaults
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub planner: Option<String>,
    pub critic: Option<String>,
    pub analyst: Option<String>,
    /// Start from the lite defaults (e.g. `qwen3:1.7b`) instead of the full ones
    pub lite: bool,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    fn parse_single_model(field: &str, value: Option<&String>) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName,
                    format!("models.{}: model name cannot be empty", field),
                )],
            ),
            Some(s) => {
                // Model::from_str is infallible; unknown tags become Custom(...)
                let Ok(model) = s.trim().parse::<Model>();
                (Some(model), Vec::new())
            }
        }
    }

    /// Resolve the role models over the (lite) defaults.
    pub fn to_model_config(&self) -> (ModelConfig, Vec<ConfigIssue>) {
        let mut config = if self.lite {
            ModelConfig::lite()
        } else {
            ModelConfig::default()
        };
        let mut issues = Vec::new();

        let (planner, planner_issues) = Self::parse_single_model("planner", self.planner.as_ref());
        let (critic, critic_issues) = Self::parse_single_model("critic", self.critic.as_ref());
        let (analyst, analyst_issues) = Self::parse_single_model("analyst", self.analyst.as_ref());
        issues.extend(planner_issues);
        issues.extend(critic_issues);
        issues.extend(analyst_issues);

        if let Some(model) = planner {
            config = config.with_planner(model);
        }
        if let Some(model) = critic {
            config = config.with_critic(model);
        }
        if let Some(model) = analyst {
            config = config.with_analyst(model);
        }

        (config, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let (config, issues) = FileModelsConfig::default().to_model_config();
        assert_eq!(config, ModelConfig::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_lite_defaults_with_override() {
        let file = FileModelsConfig {
            lite: true,
            analyst: Some("llama3.2:3b".to_string()),
            ..Default::default()
        };
        let (config, _) = file.to_model_config();
        assert_eq!(config.planner, Model::Qwen3Lite);
        assert_eq!(config.analyst, Model::Custom("llama3.2:3b".to_string()));
    }

    #[test]
    fn test_empty_name_is_an_error() {
        let file = FileModelsConfig {
            critic: Some("  ".to_string()),
            ..Default::default()
        };
        let (config, issues) = file.to_model_config();
        assert_eq!(config.critic, Model::Qwen3);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyModelName);
        assert!(issues[0].message.starts_with("models.critic"));
    }
}
