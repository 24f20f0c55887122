//! Domain error types

use thiserror::Error;

/// A structural invariant was violated.
///
/// Always fatal to the operation that produced it; nothing in the domain
/// layer silently corrects an invalid value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Topic name must not be empty")]
    EmptyTopicName,

    #[error("Plan must contain at least one topic")]
    EmptyPlan,

    #[error("Score {0} is outside the range [1, 10]")]
    ScoreOutOfRange(f64),

    #[error("Cursor {cursor} is out of range for {len} topics")]
    CursorOutOfRange { cursor: isize, len: usize },

    #[error("No pending topic to advance to")]
    NothingPending,

    #[error("No active topic to record a result for")]
    NoActiveTopic,

    #[error("Topic '{0}' already has a result")]
    ResultAlreadySet(String),

    #[error("A critique requires a non-empty plan")]
    CritiqueWithoutPlan,

    #[error("Model name must not be empty")]
    EmptyModelName,

    #[error("Unknown expert: {0}")]
    UnknownExpert(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ValidationError::CursorOutOfRange { cursor: 5, len: 2 }.to_string(),
            "Cursor 5 is out of range for 2 topics"
        );
        assert_eq!(
            ValidationError::ScoreOutOfRange(10.5).to_string(),
            "Score 10.5 is outside the range [1, 10]"
        );
    }
}
