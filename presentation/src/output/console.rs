//! Console output for plans, critiques and analysis reports

use colored::Colorize;
use planner_application::{AnalysisOutcome, RefinementOutcome};
use planner_domain::{Critique, OutputFormat, Plan, ScoreBand};

/// Formats refinement and analysis results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a finished refinement run
    pub fn format_refinement(
        outcome: &RefinementOutcome,
        subject: &str,
        context: &str,
        threshold: f64,
        format: OutputFormat,
    ) -> String {
        match format {
            OutputFormat::Json => Self::format_plan_json(subject, context, outcome.plan()),
            OutputFormat::Summary => Self::refinement_summary(outcome, subject, context, threshold),
            OutputFormat::Full => {
                let mut output = Self::header(&format!("Business plan: {} in {}", subject, context));
                output.push('\n');
                output.push_str(&Self::section_header("Topics"));
                output.push_str(&outcome.plan().outline());
                output.push_str(&Self::section_header("Latest critique"));
                output.push_str(&Self::format_critique(outcome.critique()));
                output.push_str(&Self::verdict(outcome, threshold));
                output.push_str(&Self::footer());
                output
            }
        }
    }

    /// The plan in its persisted JSON shape
    pub fn format_plan_json(subject: &str, context: &str, plan: &Plan) -> String {
        let document = serde_json::json!({
            "subject": subject,
            "context": context,
            "topics": plan.topics(),
        });
        serde_json::to_string_pretty(&document).unwrap_or_else(|_| "{}".to_string())
    }

    /// Score, band and the critique's lists
    pub fn format_critique(critique: &Critique) -> String {
        let mut output = format!(
            "{} {:.1}/10 ({})\n",
            "Score:".cyan().bold(),
            critique.score(),
            Self::band(critique.score_band())
        );

        if !critique.assessment().is_empty() {
            output.push_str(&format!("\n{}\n", critique.assessment()));
        }

        for (title, items) in [
            ("Strengths", critique.strengths()),
            ("Weaknesses", critique.weaknesses()),
            ("Suggestions", critique.suggestions()),
            ("Recommendations", critique.recommendations()),
        ] {
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{}\n", format!("{}:", title).bold()));
            for item in items {
                output.push_str(&format!("  * {}\n", item));
            }
        }

        output
    }

    /// Format a finished analysis run
    pub fn format_analysis(outcome: &AnalysisOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                let document = serde_json::json!({ "topics": outcome.topics });
                serde_json::to_string_pretty(&document).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Summary => {
                let mut output = format!(
                    "{} {} topics analyzed\n",
                    "Analysis:".cyan().bold(),
                    outcome.reports.len()
                );
                for report in &outcome.reports {
                    output.push_str(&format!(
                        "  {} {} ({} chars)\n",
                        "v".green(),
                        report.topic,
                        report.report.chars().count()
                    ));
                }
                output
            }
            OutputFormat::Full => outcome.combined_report(),
        }
    }

    fn refinement_summary(
        outcome: &RefinementOutcome,
        subject: &str,
        context: &str,
        threshold: f64,
    ) -> String {
        let mut output = format!(
            "{}\n\n",
            format!("=== Plan: {} in {} ===", subject, context).cyan().bold()
        );

        for (i, name) in outcome.plan().topic_names().iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, name));
        }

        output.push('\n');
        output.push_str(&format!(
            "{} {:.1}/10 ({})\n",
            "Score:".cyan().bold(),
            outcome.critique().score(),
            Self::band(outcome.critique().score_band())
        ));
        output.push_str(&Self::verdict(outcome, threshold));
        output
    }

    fn verdict(outcome: &RefinementOutcome, threshold: f64) -> String {
        let iterations = outcome.iterations();
        if outcome.is_converged() {
            format!(
                "\n{} above {:.1} after {} iteration(s)\n",
                "Accepted".green().bold(),
                threshold,
                iterations
            )
        } else {
            format!(
                "\n{} did not exceed {:.1} within {} iteration(s)\n",
                "Not accepted:".yellow().bold(),
                threshold,
                iterations
            )
        }
    }

    fn band(band: ScoreBand) -> colored::ColoredString {
        let label = band.to_string();
        match band {
            ScoreBand::Poor => label.red(),
            ScoreBand::Adequate => label.yellow(),
            ScoreBand::Good => label.normal(),
            ScoreBand::Excellent => label.green(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
