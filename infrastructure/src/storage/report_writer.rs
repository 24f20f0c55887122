//! Markdown report output.

use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_FILE_NAME: &str = "business_analysis_report.md";

/// Writes `<reports_dir>/<Subject>_<Context>/business_analysis_report.md`.
pub struct ReportWriter {
    reports_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    /// Path the report for this subject and context is written to.
    pub fn report_path(&self, subject: &str, context: &str) -> PathBuf {
        let folder = format!("{}_{}", sanitize(subject), sanitize(context));
        self.reports_dir.join(folder).join(REPORT_FILE_NAME)
    }

    pub fn write(&self, subject: &str, context: &str, body: &str) -> std::io::Result<PathBuf> {
        let path = self.report_path(subject, context);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let document = format!(
            "# Business analysis: {} in {}\n\n{}",
            subject.trim(),
            context.trim(),
            body
        );
        std::fs::write(&path, document)?;

        info!(path = %path.display(), "Wrote report");
        Ok(path)
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }
}

/// Spaces become underscores; anything outside `[A-Za-z0-9_-]` is dropped.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_alphanumeric() || c == '_' || c == '-' => Some(c),
            _ => None,
        })
        .collect();

    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}
