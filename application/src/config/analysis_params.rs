//! Analysis parameters: supervisor fan-out and analyst tool loop control.

use std::time::Duration;

/// Analysis control parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    /// Number of leading subtopics dispatched per topic.
    pub max_subtopics_per_dispatch: usize,
    /// Maximum tool-call rounds per subtopic before the analyst must answer.
    pub max_tool_rounds: usize,
    /// Route each subtopic to a domain expert; otherwise use the business analyst.
    pub expert_routing: bool,
    /// Timeout for each analyst model call.
    pub call_timeout: Option<Duration>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            max_subtopics_per_dispatch: 3,
            max_tool_rounds: 4,
            expert_routing: true,
            call_timeout: Some(Duration::from_secs(300)),
        }
    }
}

impl AnalysisParams {
    // ==================== Builder Methods ====================

    pub fn with_max_subtopics_per_dispatch(mut self, max: usize) -> Self {
        self.max_subtopics_per_dispatch = max;
        self
    }

    pub fn with_max_tool_rounds(mut self, max: usize) -> Self {
        self.max_tool_rounds = max;
        self
    }

    pub fn with_expert_routing(mut self, enabled: bool) -> Self {
        self.expert_routing = enabled;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = AnalysisParams::default();
        assert_eq!(params.max_subtopics_per_dispatch, 3);
        assert_eq!(params.max_tool_rounds, 4);
        assert!(params.expert_routing);
    }

    #[test]
    fn test_builder() {
        let params = AnalysisParams::default()
            .with_max_subtopics_per_dispatch(5)
            .with_expert_routing(false);
        assert_eq!(params.max_subtopics_per_dispatch, 5);
        assert!(!params.expert_routing);
    }
}
