//! Plan entity: the ordered topic outline a refinement run builds.

use super::topic::{Topic, TopicRecord};
use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};

/// An ordered collection of [`Topic`]s. Insertion order is processing order.
///
/// A plan handed to the critic or to analysis must contain at least one
/// topic. [`Plan::new`] and deserialization enforce that; only
/// [`Plan::draft`] produces an empty plan, for the refinement state before
/// its first generation step.
///
/// # Example
///
/// ```
/// use planner_domain::{Plan, Topic};
///
/// let plan = Plan::new(vec![Topic::new("Market research", "").unwrap()]).unwrap();
/// let delta = Plan::new(vec![Topic::new("Licensing", "").unwrap()]).unwrap();
///
/// let merged = plan.merge(delta);
/// assert_eq!(merged.topic_names(), vec!["Market research", "Licensing"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "PlanRecord", into = "PlanRecord")]
pub struct Plan {
    topics: Vec<Topic>,
}

impl Plan {
    pub fn new(topics: Vec<Topic>) -> Result<Self, ValidationError> {
        let plan = Self { topics };
        plan.validate()?;
        Ok(plan)
    }

    /// An empty plan that is still being built.
    pub fn draft() -> Self {
        Self::default()
    }

    /// Check the non-empty invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topics.is_empty() {
            return Err(ValidationError::EmptyPlan);
        }
        Ok(())
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn into_topics(self) -> Vec<Topic> {
        self.topics
    }

    pub fn topic_names(&self) -> Vec<&str> {
        self.topics.iter().map(Topic::name).collect()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Append `delta`'s topics after the existing ones.
    pub fn merge(mut self, delta: Plan) -> Plan {
        self.topics.extend(delta.topics);
        self
    }

    /// Number of topics that already carry a report.
    pub fn analyzed_count(&self) -> usize {
        self.topics.iter().filter(|t| t.is_analyzed()).count()
    }

    /// The same plan with every stored report dropped.
    pub fn without_results(mut self) -> Plan {
        for topic in &mut self.topics {
            topic.clear_result();
        }
        self
    }

    /// Keep only the first `max` topics (at least one).
    pub fn truncated(mut self, max: usize) -> Plan {
        self.topics.truncate(max.max(1));
        self
    }

    /// Human-readable outline: numbered topics with their subtopics.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for (i, topic) in self.topics.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, topic.name()));
            for sub in topic.subtopics() {
                out.push_str(&format!("   - {}\n", sub));
            }
        }
        out
    }

    /// JSON schema for structured-output requests.
    pub fn json_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "topics": {
                    "type": "array",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "properties": {
                            "topic": { "type": "string" },
                            "reason": { "type": "string" },
                            "subtopics": { "type": "array", "items": { "type": "string" } }
                        },
                        "required": ["topic", "reason", "subtopics"]
                    }
                }
            },
            "required": ["topics"]
        })
    }
}

/// Persisted shape of a [`Plan`]: `{"topics": [...]}`.
#[derive(Serialize, Deserialize)]
pub(crate) struct PlanRecord {
    pub(crate) topics: Vec<TopicRecord>,
}

impl TryFrom<PlanRecord> for Plan {
    type Error = ValidationError;

    fn try_from(record: PlanRecord) -> Result<Self, Self::Error> {
        let topics = record
            .topics
            .into_iter()
            .map(Topic::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Plan::new(topics)
    }
}

impl From<Plan> for PlanRecord {
    fn from(plan: Plan) -> Self {
        Self {
            topics: plan.topics.into_iter().map(TopicRecord::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(name: &str) -> Topic {
        Topic::new(name, format!("why {}", name)).unwrap()
    }

    fn plan(names: &[&str]) -> Plan {
        Plan::new(names.iter().map(|n| topic(n)).collect()).unwrap()
    }

    #[test]
    fn test_empty_plan_rejected() {
        assert_eq!(Plan::new(vec![]), Err(ValidationError::EmptyPlan));
        assert!(Plan::new(vec![topic("A")]).is_ok());
    }

    #[test]
    fn test_draft_is_empty_and_invalid() {
        let draft = Plan::draft();
        assert!(draft.is_empty());
        assert_eq!(draft.validate(), Err(ValidationError::EmptyPlan));
    }

    #[test]
    fn test_merge_preserves_order() {
        let merged = plan(&["A", "B"]).merge(plan(&["C", "D"]));
        assert_eq!(merged, plan(&["A", "B", "C", "D"]));
    }

    #[test]
    fn test_merge_into_draft() {
        let merged = Plan::draft().merge(plan(&["A"]));
        assert_eq!(merged.topic_names(), vec!["A"]);
    }

    #[test]
    fn test_truncated_keeps_leading_topics() {
        let p = plan(&["A", "B", "C", "D"]).truncated(3);
        assert_eq!(p.topic_names(), vec!["A", "B", "C"]);
        assert_eq!(plan(&["A", "B"]).truncated(0).len(), 1);
    }

    #[test]
    fn test_without_results() {
        let mut analyzed = topic("B");
        analyzed.set_result("old").unwrap();
        let p = Plan::new(vec![topic("A"), analyzed]).unwrap();
        assert_eq!(p.analyzed_count(), 1);

        let cleared = p.without_results();
        assert_eq!(cleared.analyzed_count(), 0);
        assert_eq!(cleared.topic_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_outline() {
        let p = Plan::new(vec![topic("Finance").with_subtopics(["Cash flow", "Tax"])]).unwrap();
        assert_eq!(p.outline(), "1. Finance\n   - Cash flow\n   - Tax\n");
    }

    #[test]
    fn test_json_round_trip() {
        let mut analyzed = topic("B").with_subtopics(["b1", "b2"]);
        analyzed.set_result("done").unwrap();
        let original = Plan::new(vec![topic("A"), analyzed]).unwrap();

        let json = serde_json::to_string(&original).unwrap();
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
        assert_eq!(back.topics()[1].result(), Some("done"));
    }

    #[test]
    fn test_deserialize_rejects_invalid_plans() {
        assert!(serde_json::from_str::<Plan>(r#"{"topics": []}"#).is_err());
        assert!(serde_json::from_str::<Plan>(r#"{"topics": [{"topic": ""}]}"#).is_err());
    }
}
