//! Configuration validation results.
//!
//! Loaders in the infrastructure layer inspect the merged configuration
//! and report problems as [`ConfigIssue`]s with a severity, so the CLI
//! can abort on errors and print warnings.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// Quality threshold outside `[1, 10)`: the loop could never converge.
    ThresholdOutOfRange,
    /// `max_iterations` is zero.
    ZeroIterationCap,
    /// A fan-out or truncation limit is zero.
    ZeroLimit,
    /// A model role has an empty name.
    EmptyModelName,
    /// The Ollama host URL is empty.
    EmptyHost,
    /// Tavily is selected but no API key is configured.
    MissingSearchApiKey,
    /// Both search tools are disabled; analysis runs on model knowledge only.
    NoSearchTools,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let e = ConfigIssue::error(ConfigIssueCode::ZeroIterationCap, "cap");
        assert!(e.is_error());
        let w = ConfigIssue::warning(ConfigIssueCode::NoSearchTools, "none");
        assert!(!w.is_error());
        assert_eq!(w.message, "none");
    }
}
