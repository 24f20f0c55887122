//! Structured decoding of model output.
//!
//! Local models asked for JSON answer in several shapes: a fenced
//! ` ```json ` block, bare JSON, JSON buried in prose, and (for reasoning
//! models) any of those preceded by a `<think>` block. [`extract_json`]
//! normalizes all of them; each [`StructuredDecoder`] then checks the
//! shape of one target type and its invariants.

use super::critique::{Critique, CritiqueRecord};
use super::expert::{ExpertDecision, ExpertDomain};
use super::plan::{Plan, PlanRecord};
use crate::core::error::ValidationError;
use crate::core::string::strip_reasoning;
use serde_json::Value;
use thiserror::Error;

/// Model output could not be coerced into the requested type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaValidationError {
    #[error("No JSON found in model output")]
    NoJson,

    #[error("Malformed JSON in model output: {0}")]
    Malformed(String),

    #[error("Output does not match the {schema} schema: {message}")]
    Mismatch {
        schema: &'static str,
        message: String,
    },

    #[error("Invalid decoded value: {0}")]
    Invariant(#[from] ValidationError),
}

/// Decodes raw model output into one target type.
pub trait StructuredDecoder: Send + Sync {
    type Output;

    /// Short name used in errors and logs.
    fn schema_name(&self) -> &'static str;

    /// JSON schema sent with structured-output requests.
    fn schema(&self) -> Value;

    fn decode(&self, raw: &str) -> Result<Self::Output, SchemaValidationError>;
}

/// Decodes a [`Plan`]. A top-level array is accepted as the topic list.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanDecoder;

impl StructuredDecoder for PlanDecoder {
    type Output = Plan;

    fn schema_name(&self) -> &'static str {
        "plan"
    }

    fn schema(&self) -> Value {
        Plan::json_schema()
    }

    fn decode(&self, raw: &str) -> Result<Plan, SchemaValidationError> {
        let value = match extract_json(raw)? {
            topics @ Value::Array(_) => serde_json::json!({ "topics": topics }),
            other => other,
        };
        let record: PlanRecord = serde_json::from_value(value).map_err(|e| mismatch(self, e))?;
        Ok(Plan::try_from(record)?)
    }
}

/// Decodes a [`Critique`], accepting short and `*_list` field names.
#[derive(Debug, Clone, Copy, Default)]
pub struct CritiqueDecoder;

impl StructuredDecoder for CritiqueDecoder {
    type Output = Critique;

    fn schema_name(&self) -> &'static str {
        "critique"
    }

    fn schema(&self) -> Value {
        Critique::json_schema()
    }

    fn decode(&self, raw: &str) -> Result<Critique, SchemaValidationError> {
        let record: CritiqueRecord =
            serde_json::from_value(extract_json(raw)?).map_err(|e| mismatch(self, e))?;
        Ok(Critique::try_from(record)?)
    }
}

/// Decodes an [`ExpertDecision`] from `{"expert": "..."}` or a bare key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpertDecisionDecoder;

impl StructuredDecoder for ExpertDecisionDecoder {
    type Output = ExpertDecision;

    fn schema_name(&self) -> &'static str {
        "expert decision"
    }

    fn schema(&self) -> Value {
        ExpertDecision::json_schema()
    }

    fn decode(&self, raw: &str) -> Result<ExpertDecision, SchemaValidationError> {
        let key = match extract_json(raw) {
            Ok(value) => value
                .get("expert")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| SchemaValidationError::Mismatch {
                    schema: self.schema_name(),
                    message: "missing string field `expert`".to_string(),
                })?,
            Err(SchemaValidationError::NoJson) => strip_reasoning(raw),
            Err(e) => return Err(e),
        };
        let expert: ExpertDomain = key.parse()?;
        Ok(ExpertDecision { expert })
    }
}

fn mismatch<D: StructuredDecoder + ?Sized>(
    decoder: &D,
    err: serde_json::Error,
) -> SchemaValidationError {
    SchemaValidationError::Mismatch {
        schema: decoder.schema_name(),
        message: err.to_string(),
    }
}

/// Extract the JSON value from model output.
///
/// Tries, in order:
/// 1. a ` ```json ` (or bare ` ``` `) fenced block
/// 2. the whole response (after removing `<think>` blocks)
/// 3. the outermost `{...}` or `[...]` span
pub fn extract_json(raw: &str) -> Result<Value, SchemaValidationError> {
    let text = strip_reasoning(raw);

    if let Some(block) = fenced_block(&text) {
        return serde_json::from_str(&block)
            .map_err(|e| SchemaValidationError::Malformed(e.to_string()));
    }

    if let Ok(value) = serde_json::from_str::<Value>(&text)
        && (value.is_object() || value.is_array())
    {
        return Ok(value);
    }

    let span = outer_span(&text).ok_or(SchemaValidationError::NoJson)?;
    serde_json::from_str(span).map_err(|e| SchemaValidationError::Malformed(e.to_string()))
}

fn fenced_block(text: &str) -> Option<String> {
    let mut in_block = false;
    let mut current = String::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if !in_block && (trimmed == "```json" || trimmed == "```") {
            in_block = true;
            current.clear();
        } else if in_block && trimmed == "```" {
            return Some(current);
        } else if in_block {
            current.push_str(line);
            current.push('\n');
        }
    }

    None
}

fn outer_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let close = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}
