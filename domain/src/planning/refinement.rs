//! Refinement loop state and its transitions.
//!
//! The loop alternates between two steps until the critic's score clears
//! the quality threshold:
//!
//! ```text
//! Generate ──merge delta──▶ Critique ──score > threshold──▶ Done
//!    ▲                         │
//!    └──────── otherwise ──────┘
//! ```
//!
//! Transitions take the state by value and return the next state. The use
//! case in the application layer performs the collaborator calls between
//! them; this module only decides what the next state is.

use super::critique::Critique;
use super::plan::Plan;
use crate::core::error::ValidationError;

/// Where the refinement loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementPhase {
    /// Ask the generator for a plan (fresh) or a delta (after a critique).
    Generate,
    /// Ask the critic to score the accumulated plan.
    Critique,
    /// The latest critique cleared the threshold.
    Done,
}

impl RefinementPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefinementPhase::Generate => "generate",
            RefinementPhase::Critique => "critique",
            RefinementPhase::Done => "done",
        }
    }
}

impl std::fmt::Display for RefinementPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Working state of one refinement run.
///
/// `subject` and `context` are fixed for the run. The plan only grows.
/// Only the latest critique is held; whenever one is present the plan is
/// non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementState {
    subject: String,
    context: String,
    plan: Plan,
    critique: Option<Critique>,
    phase: RefinementPhase,
    iteration: usize,
}

impl RefinementState {
    /// Start a run in the `Generate` phase with an empty plan.
    pub fn new(subject: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            context: context.into(),
            plan: Plan::draft(),
            critique: None,
            phase: RefinementPhase::Generate,
            iteration: 0,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn critique(&self) -> Option<&Critique> {
        self.critique.as_ref()
    }

    pub fn phase(&self) -> RefinementPhase {
        self.phase
    }

    /// Number of completed generation steps.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn is_done(&self) -> bool {
        self.phase == RefinementPhase::Done
    }

    /// The prior plan to hand the generator, `None` before the first merge.
    pub fn prior_plan(&self) -> Option<&Plan> {
        if self.plan.is_empty() {
            None
        } else {
            Some(&self.plan)
        }
    }

    /// GENERATE: append the generated topics after the existing ones and
    /// move on to critique.
    pub fn merge_generated(self, delta: Plan) -> Self {
        Self {
            plan: self.plan.merge(delta),
            phase: RefinementPhase::Critique,
            iteration: self.iteration + 1,
            ..self
        }
    }

    /// CRITIQUE: record the critique, then route on `score > threshold`.
    pub fn apply_critique(self, critique: Critique, threshold: f64) -> Result<Self, ValidationError> {
        if self.plan.is_empty() {
            return Err(ValidationError::CritiqueWithoutPlan);
        }
        let phase = if critique.passes(threshold) {
            RefinementPhase::Done
        } else {
            RefinementPhase::Generate
        };
        Ok(Self {
            critique: Some(critique),
            phase,
            ..self
        })
    }

    pub fn into_parts(self) -> (Plan, Option<Critique>) {
        (self.plan, self.critique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::topic::Topic;

    fn plan(names: &[&str]) -> Plan {
        Plan::new(names.iter().map(|n| Topic::new(*n, "").unwrap()).collect()).unwrap()
    }

    fn critique(score: f64) -> Critique {
        Critique::new("review", score).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = RefinementState::new("Falooda", "Sweden");
        assert_eq!(state.phase(), RefinementPhase::Generate);
        assert_eq!(state.iteration(), 0);
        assert!(state.prior_plan().is_none());
        assert!(state.critique().is_none());
    }

    #[test]
    fn test_generate_then_passing_critique_is_done() {
        let state = RefinementState::new("Falooda", "Sweden").merge_generated(plan(&["A"]));
        assert_eq!(state.phase(), RefinementPhase::Critique);
        assert_eq!(state.iteration(), 1);

        let state = state.apply_critique(critique(9.5), 9.0).unwrap();
        assert!(state.is_done());
        assert_eq!(state.critique().map(Critique::score), Some(9.5));
    }

    #[test]
    fn test_score_equal_to_threshold_loops() {
        let state = RefinementState::new("s", "c")
            .merge_generated(plan(&["A"]))
            .apply_critique(critique(9.0), 9.0)
            .unwrap();
        assert_eq!(state.phase(), RefinementPhase::Generate);
    }

    #[test]
    fn test_delta_appends_after_existing_topics() {
        let state = RefinementState::new("s", "c")
            .merge_generated(plan(&["A", "B"]))
            .apply_critique(critique(5.0), 9.0)
            .unwrap()
            .merge_generated(plan(&["C", "D"]));
        assert_eq!(state.plan().topic_names(), vec!["A", "B", "C", "D"]);
        assert_eq!(state.iteration(), 2);
        // the last critique is kept until the next one replaces it
        assert_eq!(state.critique().map(Critique::score), Some(5.0));
    }

    #[test]
    fn test_critique_of_empty_plan_rejected() {
        let state = RefinementState::new("s", "c");
        assert_eq!(
            state.apply_critique(critique(9.5), 9.0),
            Err(ValidationError::CritiqueWithoutPlan)
        );
    }
}
