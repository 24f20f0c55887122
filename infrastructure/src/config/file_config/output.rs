//! Output configuration from TOML (`[output]` section)

use planner_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Re-export OutputFormat from domain for convenience
pub use planner_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
///
/// ```toml
/// [output]
/// format = "summary"
/// color = true
/// plan_path = "business_plan.json"
/// reports_dir = "reports"
/// conversation_log = "logs/conversation.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Console output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Where the refined plan is saved and loaded from
    pub plan_path: PathBuf,
    /// Root directory for per-business report folders
    pub reports_dir: PathBuf,
    /// JSONL transcript of model exchanges; disabled when unset
    pub conversation_log: Option<PathBuf>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            plan_path: PathBuf::from("business_plan.json"),
            reports_dir: PathBuf::from("reports"),
            conversation_log: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_deserialize() {
        let toml_str = r#"
[output]
format = "json"
reports_dir = "out/reports"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.output.reports_dir, PathBuf::from("out/reports"));
        // untouched keys keep their defaults
        assert_eq!(config.output.plan_path, PathBuf::from("business_plan.json"));
        assert!(config.output.color);
    }
}
