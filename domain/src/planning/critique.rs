//! Critique value object: a scored verdict over a plan.

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 1.0;
/// Highest accepted score.
pub const MAX_SCORE: f64 = 10.0;

/// Structured quality verdict over a [`Plan`](super::plan::Plan).
///
/// The score must lie in the closed interval `[1.0, 10.0]`. Construction and
/// deserialization both enforce this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CritiqueRecord", into = "CritiqueRecord")]
pub struct Critique {
    assessment: String,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    suggestions: Vec<String>,
    recommendations: Vec<String>,
    score: f64,
}

/// Informative reading of a score. Nothing in the loop branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Poor,
    Adequate,
    Good,
    Excellent,
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreBand::Poor => "poor",
            ScoreBand::Adequate => "adequate",
            ScoreBand::Good => "good",
            ScoreBand::Excellent => "excellent",
        };
        f.write_str(label)
    }
}

impl Critique {
    pub fn new(assessment: impl Into<String>, score: f64) -> Result<Self, ValidationError> {
        if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange(score));
        }
        Ok(Self {
            assessment: assessment.into(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            suggestions: Vec::new(),
            recommendations: Vec::new(),
            score,
        })
    }

    pub fn with_strengths(mut self, items: Vec<String>) -> Self {
        self.strengths = items;
        self
    }

    pub fn with_weaknesses(mut self, items: Vec<String>) -> Self {
        self.weaknesses = items;
        self
    }

    pub fn with_suggestions(mut self, items: Vec<String>) -> Self {
        self.suggestions = items;
        self
    }

    pub fn with_recommendations(mut self, items: Vec<String>) -> Self {
        self.recommendations = items;
        self
    }

    pub fn assessment(&self) -> &str {
        &self.assessment
    }

    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    pub fn weaknesses(&self) -> &[String] {
        &self.weaknesses
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Strict greater-than against the quality threshold.
    pub fn passes(&self, threshold: f64) -> bool {
        self.score > threshold
    }

    pub fn score_band(&self) -> ScoreBand {
        match self.score {
            s if s < 4.0 => ScoreBand::Poor,
            s if s < 7.0 => ScoreBand::Adequate,
            s if s < 9.0 => ScoreBand::Good,
            _ => ScoreBand::Excellent,
        }
    }

    /// Weaknesses, suggestions and recommendations combined.
    pub fn open_issue_count(&self) -> usize {
        self.weaknesses.len() + self.suggestions.len() + self.recommendations.len()
    }

    /// JSON schema for structured-output requests.
    pub fn json_schema() -> serde_json::Value {
        let list = serde_json::json!({ "type": "array", "items": { "type": "string" } });
        serde_json::json!({
            "type": "object",
            "properties": {
                "assessment": { "type": "string" },
                "strengths": list.clone(),
                "weaknesses": list.clone(),
                "suggestions": list.clone(),
                "recommendations": list,
                "score": { "type": "number", "minimum": MIN_SCORE, "maximum": MAX_SCORE }
            },
            "required": ["assessment", "score"]
        })
    }
}

/// Wire shape of a [`Critique`]. Accepts the long `*_list` names too.
#[derive(Serialize, Deserialize)]
pub(crate) struct CritiqueRecord {
    assessment: String,
    #[serde(default, alias = "strength_list")]
    strengths: Vec<String>,
    #[serde(default, alias = "weakness_list")]
    weaknesses: Vec<String>,
    #[serde(default, alias = "suggestion_list")]
    suggestions: Vec<String>,
    #[serde(default, alias = "recommendation_list")]
    recommendations: Vec<String>,
    score: f64,
}

impl TryFrom<CritiqueRecord> for Critique {
    type Error = ValidationError;

    fn try_from(r: CritiqueRecord) -> Result<Self, Self::Error> {
        Ok(Critique::new(r.assessment, r.score)?
            .with_strengths(r.strengths)
            .with_weaknesses(r.weaknesses)
            .with_suggestions(r.suggestions)
            .with_recommendations(r.recommendations))
    }
}

impl From<Critique> for CritiqueRecord {
    fn from(c: Critique) -> Self {
        Self {
            assessment: c.assessment,
            strengths: c.strengths,
            weaknesses: c.weaknesses,
            suggestions: c.suggestions,
            recommendations: c.recommendations,
            score: c.score,
        }
    }
}
