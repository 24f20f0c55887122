//! Analysis configuration from TOML (`[analysis]` section)

use planner_application::AnalysisParams;
use planner_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw analysis configuration
///
/// ```toml
/// [analysis]
/// max_subtopics_per_dispatch = 3
/// max_tool_rounds = 4
/// expert_routing = true
/// call_timeout_seconds = 300
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalysisConfig {
    pub max_subtopics_per_dispatch: usize,
    pub max_tool_rounds: usize,
    pub expert_routing: bool,
    pub call_timeout_seconds: u64,
}

impl Default for FileAnalysisConfig {
    fn default() -> Self {
        let params = AnalysisParams::default();
        Self {
            max_subtopics_per_dispatch: params.max_subtopics_per_dispatch,
            max_tool_rounds: params.max_tool_rounds,
            expert_routing: params.expert_routing,
            call_timeout_seconds: params.call_timeout.map_or(0, |d| d.as_secs()),
        }
    }
}

impl FileAnalysisConfig {
    pub fn to_params(&self) -> AnalysisParams {
        AnalysisParams::default()
            .with_max_subtopics_per_dispatch(self.max_subtopics_per_dispatch)
            .with_max_tool_rounds(self.max_tool_rounds)
            .with_expert_routing(self.expert_routing)
            .with_call_timeout(
                (self.call_timeout_seconds > 0)
                    .then(|| Duration::from_secs(self.call_timeout_seconds)),
            )
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.max_subtopics_per_dispatch == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroLimit,
                "analysis.max_subtopics_per_dispatch: must be at least 1",
            ));
        }
        issues
    }
}
