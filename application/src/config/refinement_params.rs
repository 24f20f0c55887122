//! Refinement parameters: loop control for
//! [`RefinePlanUseCase`](crate::use_cases::refine_plan::RefinePlanUseCase).

use std::time::Duration;

/// Refinement loop control parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementParams {
    /// The loop finishes once a critique scores strictly above this.
    pub quality_threshold: f64,
    /// Maximum number of generate→critique cycles. Must be at least 1.
    pub max_iterations: usize,
    /// Keep only the first N topics of each generation call.
    pub max_topics_per_generation: Option<usize>,
    /// Timeout for each generator or critic call.
    pub call_timeout: Option<Duration>,
}

impl Default for RefinementParams {
    fn default() -> Self {
        Self {
            quality_threshold: 9.0,
            max_iterations: 5,
            max_topics_per_generation: None,
            call_timeout: Some(Duration::from_secs(300)),
        }
    }
}

impl RefinementParams {
    // ==================== Builder Methods ====================

    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_max_topics_per_generation(mut self, max: Option<usize>) -> Self {
        self.max_topics_per_generation = max;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }
}
