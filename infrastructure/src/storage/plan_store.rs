//! JSON persistence for refined plans.

use planner_domain::{Plan, Topic, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PlanStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed plan file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid plan in {path}: {source}")]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// A plan together with the subject and context it was refined for.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPlan {
    pub subject: Option<String>,
    pub context: Option<String>,
    pub plan: Plan,
}

impl StoredPlan {
    pub fn new(subject: impl Into<String>, context: impl Into<String>, plan: Plan) -> Self {
        Self {
            subject: Some(subject.into()),
            context: Some(context.into()),
            plan,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PlanDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<String>,
    topics: Vec<Topic>,
}

/// Reads and writes `{"subject", "context", "topics": [...]}` documents.
pub struct JsonPlanStore {
    path: PathBuf,
}

impl JsonPlanStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the plan as pretty JSON, creating parent directories.
    pub fn save(&self, stored: &StoredPlan) -> Result<(), PlanStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| self.io(source))?;
        }

        let document = PlanDocument {
            subject: stored.subject.clone(),
            context: stored.context.clone(),
            topics: stored.plan.topics().to_vec(),
        };
        let json = serde_json::to_string_pretty(&document).map_err(|source| {
            PlanStoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|source| self.io(source))?;

        info!(path = %self.path.display(), topics = stored.plan.len(), "Saved plan");
        Ok(())
    }

    /// Read and validate a plan document.
    pub fn load(&self) -> Result<StoredPlan, PlanStoreError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| self.io(source))?;
        let document: PlanDocument =
            serde_json::from_str(&text).map_err(|source| PlanStoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        let plan = Plan::new(document.topics).map_err(|source| PlanStoreError::Validation {
            path: self.path.clone(),
            source,
        })?;

        Ok(StoredPlan {
            subject: document.subject,
            context: document.context,
            plan,
        })
    }

    fn io(&self, source: std::io::Error) -> PlanStoreError {
        PlanStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Plan {
        Plan::new(vec![
            Topic::new("Market research", "who buys")
                .unwrap()
                .with_subtopics(["Foot traffic", "Competitors"]),
            Topic::new("Licensing", "permits").unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_save_creates_parents_and_load_restores() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPlanStore::new(dir.path().join("plans").join("plan.json"));
        let stored = StoredPlan::new("food truck", "Stockholm", plan());

        store.save(&stored).unwrap();
        assert_eq!(store.load().unwrap(), stored);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["subject"], "food truck");
        assert_eq!(raw["topics"][0]["topic"], "Market research");
        assert_eq!(raw["topics"][0]["subtopics"][1], "Competitors");
    }

    #[test]
    fn test_bare_topics_document_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, r#"{"topics": [{"topic": "Pricing"}]}"#).unwrap();

        let stored = JsonPlanStore::new(&path).load().unwrap();
        assert!(stored.subject.is_none());
        assert_eq!(stored.plan.topic_names(), vec!["Pricing"]);
    }

    #[test]
    fn test_empty_topic_list_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, r#"{"topics": []}"#).unwrap();

        let err = JsonPlanStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            PlanStoreError::Validation {
                source: ValidationError::EmptyPlan,
                ..
            }
        ));
    }

    #[test]
    fn test_blank_topic_name_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, r#"{"topics": [{"topic": "  "}]}"#).unwrap();
        assert!(matches!(
            JsonPlanStore::new(&path).load(),
            Err(PlanStoreError::Json { .. })
        ));

        let missing = JsonPlanStore::new(dir.path().join("nope.json"));
        assert!(matches!(missing.load(), Err(PlanStoreError::Io { .. })));
    }
}
