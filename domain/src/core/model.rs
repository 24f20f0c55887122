//! Model value object representing a locally served LLM

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ollama model tags known to the planner (Value Object)
///
/// Any other tag pulled into the local Ollama instance is carried as
/// [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // General-purpose models
    Granite33,
    Granite33Lite,
    // Reasoning models
    Qwen3,
    Qwen3Lite,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the Ollama tag for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Granite33 => "granite3.3:8b",
            Model::Granite33Lite => "granite3.3:2b",
            Model::Qwen3 => "qwen3:8b",
            Model::Qwen3Lite => "qwen3:1.7b",
            Model::Custom(s) => s,
        }
    }

    /// Default model for planning and critique
    pub fn default_reasoning() -> Model {
        Model::Qwen3
    }

    /// Default model for topic analysis and report synthesis
    pub fn default_general() -> Model {
        Model::Granite33
    }

    /// Check if this model emits `<think>` blocks before its answer
    pub fn is_reasoning(&self) -> bool {
        match self {
            Model::Qwen3 | Model::Qwen3Lite => true,
            Model::Custom(s) => s.starts_with("qwen3") || s.starts_with("deepseek-r1"),
            _ => false,
        }
    }

    /// The smaller sibling of a known model, used for quick local runs
    pub fn lite(&self) -> Model {
        match self {
            Model::Granite33 => Model::Granite33Lite,
            Model::Qwen3 => Model::Qwen3Lite,
            other => other.clone(),
        }
    }
}

impl Default for Model {
    /// Returns the default reasoning model (qwen3:8b)
    fn default() -> Self {
        Model::default_reasoning()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "granite3.3:8b" | "granite3.3" => Model::Granite33,
            "granite3.3:2b" => Model::Granite33Lite,
            "qwen3:8b" | "qwen3" => Model::Qwen3,
            "qwen3:1.7b" => Model::Qwen3Lite,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in [Model::Granite33, Model::Granite33Lite, Model::Qwen3, Model::Qwen3Lite] {
            let s = model.to_string();
            let parsed: Model = s.parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "llama3.1:8b".parse().unwrap();
        assert_eq!(model, Model::Custom("llama3.1:8b".to_string()));
        assert_eq!(model.to_string(), "llama3.1:8b");
    }

    #[test]
    fn test_reasoning_detection() {
        assert!(Model::Qwen3.is_reasoning());
        assert!(Model::Custom("qwen3:14b".to_string()).is_reasoning());
        assert!(!Model::Granite33.is_reasoning());
    }

    #[test]
    fn test_lite_variants() {
        assert_eq!(Model::Qwen3.lite(), Model::Qwen3Lite);
        assert_eq!(Model::Granite33.lite(), Model::Granite33Lite);
        let custom = Model::Custom("mistral".to_string());
        assert_eq!(custom.lite(), custom);
    }

    #[test]
    fn test_model_serde() {
        let json = serde_json::to_string(&Model::Qwen3).unwrap();
        assert_eq!(json, "\"qwen3:8b\"");
        let back: Model = serde_json::from_str("\"granite3.3:2b\"").unwrap();
        assert_eq!(back, Model::Granite33Lite);
    }
}
