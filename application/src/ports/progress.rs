//! Progress notification ports
//!
//! Implementations live in the presentation layer and can display
//! progress in various ways (spinners, plain lines, nothing at all).
//! Every callback has a no-op default so reporters only override what
//! they show.

use planner_domain::{Critique, Topic};

/// Callbacks for the plan refinement loop
pub trait RefinementProgressNotifier: Send + Sync {
    /// A generation step starts. `iteration` is one-based; `refining` is
    /// false for the initial plan.
    fn on_generation_start(&self, _iteration: usize, _refining: bool) {}

    /// A generation step merged `new_topics` topics; the plan now has `total`.
    fn on_generation_complete(&self, _iteration: usize, _new_topics: usize, _total: usize) {}

    fn on_critique_start(&self, _iteration: usize) {}

    fn on_critique_complete(&self, _iteration: usize, _critique: &Critique, _passed: bool) {}
}

/// Callbacks for the per-topic analysis supervisor
pub trait AnalysisProgressNotifier: Send + Sync {
    fn on_analysis_start(&self, _total_topics: usize) {}

    /// `index` is the zero-based cursor of the dispatched topic.
    fn on_topic_start(&self, _index: usize, _total: usize, _topic: &Topic) {}

    fn on_topic_complete(&self, _index: usize, _total: usize, _topic: &Topic) {}

    fn on_analysis_complete(&self, _analyzed: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RefinementProgressNotifier for NoProgress {}

impl AnalysisProgressNotifier for NoProgress {}
