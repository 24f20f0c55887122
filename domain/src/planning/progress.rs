//! Per-topic sequencing state for the analysis supervisor.
//!
//! ```text
//! Advance ──▶ Dispatch ──pending non-empty──▶ Advance
//!                 │
//!                 └──────── otherwise ──────▶ Done
//! ```
//!
//! The cursor starts at `-1` ("before the first topic") and only moves
//! forward, one topic per advance.

use super::plan::Plan;
use super::topic::Topic;
use crate::core::error::ValidationError;

/// Where the supervisor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorPhase {
    Advance,
    Dispatch,
    Done,
}

/// Topics of a finalized plan plus the cursor walking them.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisProgress {
    topics: Vec<Topic>,
    cursor: isize,
}

impl AnalysisProgress {
    /// Cursor value meaning "before the first topic".
    pub const START: isize = -1;

    /// Start before the first topic.
    pub fn new(topics: Vec<Topic>) -> Self {
        Self {
            topics,
            cursor: Self::START,
        }
    }

    pub fn from_plan(plan: Plan) -> Self {
        Self::new(plan.into_topics())
    }

    /// Resume at an explicit cursor. Fails fast when the cursor does not
    /// point inside `topics` (or is below `-1`).
    pub fn with_cursor(topics: Vec<Topic>, cursor: isize) -> Result<Self, ValidationError> {
        let len = topics.len();
        let in_range = cursor == Self::START || (cursor >= 0 && (cursor as usize) < len);
        if !in_range {
            return Err(ValidationError::CursorOutOfRange { cursor, len });
        }
        Ok(Self { topics, cursor })
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn into_topics(self) -> Vec<Topic> {
        self.topics
    }

    fn active_index(&self) -> Option<usize> {
        usize::try_from(self.cursor)
            .ok()
            .filter(|&i| i < self.topics.len())
    }

    /// Topics at `[0, cursor)`.
    pub fn processed(&self) -> &[Topic] {
        match self.active_index() {
            Some(i) => &self.topics[..i],
            None => &[],
        }
    }

    /// Topic at `cursor`, if the cursor points inside the list.
    pub fn active(&self) -> Option<&Topic> {
        self.active_index().map(|i| &self.topics[i])
    }

    /// Topics at `[cursor + 1, end)`.
    pub fn pending(&self) -> &[Topic] {
        let start = usize::try_from(self.cursor + 1).unwrap_or(0);
        &self.topics[start.min(self.topics.len())..]
    }

    pub fn has_pending(&self) -> bool {
        !self.pending().is_empty()
    }

    /// Move the cursor to the next topic. Refuses to move past the end.
    pub fn advance(self) -> Result<Self, ValidationError> {
        if !self.has_pending() {
            return Err(ValidationError::NothingPending);
        }
        Ok(Self {
            cursor: self.cursor + 1,
            ..self
        })
    }

    /// Store the active topic's report.
    pub fn record_result(mut self, report: impl Into<String>) -> Result<Self, ValidationError> {
        let index = self.active_index().ok_or(ValidationError::NoActiveTopic)?;
        self.topics[index].set_result(report)?;
        Ok(self)
    }

    /// Fails on the first topic that already carries a report.
    pub fn ensure_unanalyzed(&self) -> Result<(), ValidationError> {
        match self.topics.iter().find(|t| t.is_analyzed()) {
            Some(topic) => Err(ValidationError::ResultAlreadySet(topic.name().to_string())),
            None => Ok(()),
        }
    }

    /// Routing decision after a dispatch (or at start): advance while
    /// anything is pending, otherwise finish.
    pub fn next_phase(&self) -> SupervisorPhase {
        if self.has_pending() {
            SupervisorPhase::Advance
        } else {
            SupervisorPhase::Done
        }
    }
}
