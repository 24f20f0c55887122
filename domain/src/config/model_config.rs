//! Role-based model configuration.
//!
//! [`ModelConfig`] groups the model selections for the planning and
//! analysis roles. Once created, models don't change at runtime.

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Role-based model configuration.
///
/// - **Planner**: generates the initial plan and each refinement delta
/// - **Critic**: scores the accumulated plan
/// - **Analyst**: routes subtopics to experts, runs tool-augmented analysis
///   and synthesizes the per-topic report
///
/// # Example
///
/// ```
/// use planner_domain::{Model, ModelConfig};
///
/// let config = ModelConfig::default().with_critic(Model::Granite33);
///
/// assert_eq!(config.planner, Model::Qwen3);
/// assert_eq!(config.critic, Model::Granite33);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub planner: Model,
    pub critic: Model,
    pub analyst: Model,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            planner: Model::default_reasoning(),
            critic: Model::default_reasoning(),
            analyst: Model::default_general(),
        }
    }
}

impl ModelConfig {
    /// All roles on the lite variants of their models.
    pub fn lite() -> Self {
        let base = Self::default();
        Self {
            planner: base.planner.lite(),
            critic: base.critic.lite(),
            analyst: base.analyst.lite(),
        }
    }

    pub fn with_planner(mut self, model: Model) -> Self {
        self.planner = model;
        self
    }

    pub fn with_critic(mut self, model: Model) -> Self {
        self.critic = model;
        self
    }

    pub fn with_analyst(mut self, model: Model) -> Self {
        self.analyst = model;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roles() {
        let config = ModelConfig::default();
        assert_eq!(config.planner, Model::Qwen3);
        assert_eq!(config.critic, Model::Qwen3);
        assert_eq!(config.analyst, Model::Granite33);
    }

    #[test]
    fn test_lite_roles() {
        let config = ModelConfig::lite();
        assert_eq!(config.planner, Model::Qwen3Lite);
        assert_eq!(config.analyst, Model::Granite33Lite);
    }
}
