//! Refinement loop configuration from TOML (`[refinement]` section)

use planner_application::RefinementParams;
use planner_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw refinement configuration
///
/// ```toml
/// [refinement]
/// quality_threshold = 9.0         # critique score must be strictly above this
/// max_iterations = 5              # generate/critique cycles before giving up
/// max_topics_per_generation = 8   # optional cap on topics per generation
/// call_timeout_seconds = 300      # 0 disables the per-call timeout
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRefinementConfig {
    pub quality_threshold: f64,
    pub max_iterations: usize,
    pub max_topics_per_generation: Option<usize>,
    pub call_timeout_seconds: u64,
}

impl Default for FileRefinementConfig {
    fn default() -> Self {
        let params = RefinementParams::default();
        Self {
            quality_threshold: params.quality_threshold,
            max_iterations: params.max_iterations,
            max_topics_per_generation: params.max_topics_per_generation,
            call_timeout_seconds: params.call_timeout.map_or(0, |d| d.as_secs()),
        }
    }
}

impl FileRefinementConfig {
    pub fn to_params(&self) -> RefinementParams {
        RefinementParams::default()
            .with_quality_threshold(self.quality_threshold)
            .with_max_iterations(self.max_iterations)
            .with_max_topics_per_generation(self.max_topics_per_generation)
            .with_call_timeout(
                (self.call_timeout_seconds > 0)
                    .then(|| Duration::from_secs(self.call_timeout_seconds)),
            )
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let threshold = self.quality_threshold;
        if !threshold.is_finite() || !(1.0..10.0).contains(&threshold) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ThresholdOutOfRange,
                format!(
                    "refinement.quality_threshold: {} must be within [1, 10) or no plan can pass",
                    threshold
                ),
            ));
        }
        if self.max_iterations == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroIterationCap,
                "refinement.max_iterations: must be at least 1",
            ));
        }
        if self.max_topics_per_generation == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroLimit,
                "refinement.max_topics_per_generation: must be at least 1 when set",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_params() {
        assert_eq!(
            FileRefinementConfig::default().to_params(),
            RefinementParams::default()
        );
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = FileRefinementConfig {
            call_timeout_seconds: 0,
            ..Default::default()
        };
        assert_eq!(config.to_params().call_timeout, None);
    }

    #[test]
    fn test_validate() {
        assert!(FileRefinementConfig::default().validate().is_empty());

        let config = FileRefinementConfig {
            quality_threshold: 10.0,
            max_iterations: 0,
            max_topics_per_generation: Some(0),
            ..Default::default()
        };
        let codes: Vec<ConfigIssueCode> = config.validate().iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![
                ConfigIssueCode::ThresholdOutOfRange,
                ConfigIssueCode::ZeroIterationCap,
                ConfigIssueCode::ZeroLimit,
            ]
        );
    }
}
