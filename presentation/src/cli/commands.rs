//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for plans, critiques and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plan outline with every subtopic, the full critique and reports
    Full,
    /// Topic names, score and verdict only
    Summary,
    /// The plan as JSON
    Json,
}

impl From<OutputFormat> for planner_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => planner_domain::OutputFormat::Full,
            OutputFormat::Summary => planner_domain::OutputFormat::Summary,
            OutputFormat::Json => planner_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for bizplan
#[derive(Parser, Debug)]
#[command(name = "bizplan")]
#[command(author, version, about = "Refine a business research plan and analyze it with local models")]
#[command(long_about = r#"
bizplan builds a research plan for a business idea and analyzes it.

Planning is a loop:
1. Generate: a planner model proposes research topics
2. Critique: a critic model scores the accumulated plan from 1 to 10
3. Refine: below the quality threshold, the planner adds topics that answer the critique

Analysis walks the finished plan topic by topic. Each topic's leading
subtopics are analyzed by routed experts with web and knowledge search,
then condensed into a report.

Models are served by a local Ollama instance.

Configuration files are loaded from (in priority order):
1. BIZPLAN_* environment variables
2. --config <path>     Explicit config file
3. ./bizplan.toml      Project-level config
4. ~/.config/bizplan/config.toml   Global config

Example:
  bizplan plan "food truck" "Stockholm"
  bizplan analyze --plan business_plan.json
  bizplan run "coffee roastery" "Lisbon" --threshold 8.5
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Fail instead of saving a plan that never reached the threshold
    #[arg(long, global = true)]
    pub strict: bool,

    /// Quality threshold the critique score must exceed
    #[arg(long, value_name = "SCORE", global = true)]
    pub threshold: Option<f64>,

    /// Maximum number of generate/critique iterations
    #[arg(long, value_name = "N", global = true)]
    pub max_iterations: Option<usize>,

    /// Use the smaller model variants
    #[arg(long, global = true)]
    pub lite: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Refine a research plan and save it as JSON
    Plan {
        /// What the business is (e.g. "food truck")
        subject: String,
        /// Where or for whom (e.g. "Stockholm")
        context: String,
        /// Where to save the plan (defaults to output.plan_path)
        #[arg(long, value_name = "PATH")]
        plan: Option<PathBuf>,
    },

    /// Analyze a saved plan and write the report
    Analyze {
        /// Plan file to analyze (defaults to output.plan_path)
        #[arg(long, value_name = "PATH")]
        plan: Option<PathBuf>,
        /// Subject, when the plan file does not record one
        #[arg(long)]
        subject: Option<String>,
        /// Context, when the plan file does not record one
        #[arg(long)]
        context: Option<String>,
    },

    /// Refine a plan, then analyze it
    Run {
        subject: String,
        context: String,
        /// Where to save the plan (defaults to output.plan_path)
        #[arg(long, value_name = "PATH")]
        plan: Option<PathBuf>,
    },

    /// Show configuration sources and effective values
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plan_with_global_flags() {
        let cli = Cli::try_parse_from([
            "bizplan",
            "plan",
            "food truck",
            "Stockholm",
            "--threshold",
            "8.5",
            "-vv",
            "--strict",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Plan {
                subject: "food truck".to_string(),
                context: "Stockholm".to_string(),
                plan: None,
            }
        );
        assert_eq!(cli.threshold, Some(8.5));
        assert_eq!(cli.verbose, 2);
        assert!(cli.strict);
    }

    #[test]
    fn test_analyze_flags() {
        let cli = Cli::try_parse_from([
            "bizplan",
            "analyze",
            "--plan",
            "plans/truck.json",
            "--subject",
            "food truck",
            "-o",
            "full",
        ])
        .unwrap();

        match cli.command {
            Command::Analyze {
                plan,
                subject,
                context,
            } => {
                assert_eq!(plan, Some(PathBuf::from("plans/truck.json")));
                assert_eq!(subject.as_deref(), Some("food truck"));
                assert!(context.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.output, Some(OutputFormat::Full));
    }

    #[test]
    fn test_plan_requires_subject_and_context() {
        assert!(Cli::try_parse_from(["bizplan", "plan", "food truck"]).is_err());
    }
}
