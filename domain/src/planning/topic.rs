//! Topic entity: one unit of research in a business plan.

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};

/// A named research area with its rationale, ordered subtopics and,
/// once analyzed, a report.
///
/// The name is trimmed and must be non-empty; this is checked on
/// construction and on deserialization, so a `Topic` value is always valid.
///
/// # Example
///
/// ```
/// use planner_domain::Topic;
///
/// let topic = Topic::new("Market research", "Demand drives every estimate")
///     .unwrap()
///     .with_subtopics(["Customer segments", "Pricing sensitivity"]);
///
/// assert_eq!(topic.name(), "Market research");
/// assert_eq!(topic.subtopics().len(), 2);
/// assert!(topic.result().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TopicRecord", into = "TopicRecord")]
pub struct Topic {
    name: String,
    rationale: String,
    subtopics: Vec<String>,
    result: Option<String>,
}

impl Topic {
    pub fn new(
        name: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyTopicName);
        }
        Ok(Self {
            name,
            rationale: rationale.into(),
            subtopics: Vec::new(),
            result: None,
        })
    }

    pub fn with_subtopics<I, S>(mut self, subtopics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtopics.extend(subtopics.into_iter().map(Into::into));
        self
    }

    pub fn with_subtopic(mut self, subtopic: impl Into<String>) -> Self {
        self.subtopics.push(subtopic.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn subtopics(&self) -> &[String] {
        &self.subtopics
    }

    /// The first `limit` subtopics, in order.
    pub fn leading_subtopics(&self, limit: usize) -> &[String] {
        &self.subtopics[..self.subtopics.len().min(limit)]
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn is_analyzed(&self) -> bool {
        self.result.is_some()
    }

    /// Store the analysis report. A topic is analyzed exactly once.
    pub fn set_result(&mut self, report: impl Into<String>) -> Result<(), ValidationError> {
        if self.result.is_some() {
            return Err(ValidationError::ResultAlreadySet(self.name.clone()));
        }
        self.result = Some(report.into());
        Ok(())
    }

    /// Drop a stored report so the topic can be analyzed again.
    pub fn clear_result(&mut self) -> Option<String> {
        self.result.take()
    }
}

/// Persisted shape of a [`Topic`]. Checks shape only; invariants are
/// checked by the `TryFrom` conversion.
#[derive(Serialize, Deserialize)]
pub(crate) struct TopicRecord {
    pub(crate) topic: String,
    #[serde(default)]
    pub(crate) reason: String,
    #[serde(default)]
    pub(crate) subtopics: Vec<String>,
    #[serde(default)]
    pub(crate) report: Option<String>,
}

impl TryFrom<TopicRecord> for Topic {
    type Error = ValidationError;

    fn try_from(record: TopicRecord) -> Result<Self, Self::Error> {
        let mut topic = Topic::new(record.topic, record.reason)?.with_subtopics(record.subtopics);
        topic.result = record.report;
        Ok(topic)
    }
}

impl From<Topic> for TopicRecord {
    fn from(topic: Topic) -> Self {
        Self {
            topic: topic.name,
            reason: topic.rationale,
            subtopics: topic.subtopics,
            report: topic.result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_names_rejected() {
        assert_eq!(Topic::new("", "r"), Err(ValidationError::EmptyTopicName));
        assert_eq!(Topic::new("   ", "r"), Err(ValidationError::EmptyTopicName));
        assert_eq!(Topic::new("\t\n", "r"), Err(ValidationError::EmptyTopicName));
    }

    #[test]
    fn test_name_is_trimmed() {
        let topic = Topic::new("  Legal setup ", "").unwrap();
        assert_eq!(topic.name(), "Legal setup");
        assert_eq!(topic.rationale(), "");
    }

    #[test]
    fn test_leading_subtopics() {
        let topic = Topic::new("Finance", "")
            .unwrap()
            .with_subtopics(["a", "b", "c", "d"]);
        assert_eq!(topic.leading_subtopics(3), ["a", "b", "c"]);
        assert_eq!(topic.leading_subtopics(10).len(), 4);
        assert!(topic.leading_subtopics(0).is_empty());
    }

    #[test]
    fn test_result_is_set_once() {
        let mut topic = Topic::new("Finance", "").unwrap();
        topic.set_result("report").unwrap();
        assert_eq!(topic.result(), Some("report"));
        assert_eq!(
            topic.set_result("again"),
            Err(ValidationError::ResultAlreadySet("Finance".to_string()))
        );
    }

    #[test]
    fn test_cleared_result_can_be_set_again() {
        let mut topic = Topic::new("Finance", "").unwrap();
        topic.set_result("old").unwrap();
        assert_eq!(topic.clear_result(), Some("old".to_string()));
        assert!(!topic.is_analyzed());
        topic.set_result("new").unwrap();
        assert_eq!(topic.result(), Some("new"));
    }

    #[test]
    fn test_json_field_names() {
        let topic = Topic::new("Finance", "Money matters")
            .unwrap()
            .with_subtopic("Break-even");
        let json = serde_json::to_value(&topic).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "topic": "Finance",
                "reason": "Money matters",
                "subtopics": ["Break-even"],
                "report": null
            })
        );
    }

    #[test]
    fn test_deserialize_defaults_and_validation() {
        let topic: Topic = serde_json::from_str(r#"{"topic": "Hiring"}"#).unwrap();
        assert_eq!(topic.rationale(), "");
        assert!(topic.subtopics().is_empty());
        assert!(topic.result().is_none());

        assert!(serde_json::from_str::<Topic>(r#"{"topic": "  "}"#).is_err());
        assert!(serde_json::from_str::<Topic>(r#"{"reason": "x"}"#).is_err());
    }
}
