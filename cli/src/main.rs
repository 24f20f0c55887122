//! CLI entrypoint for bizplan
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use planner_application::{
    ConversationLogger, LlmGateway, LlmPlanCritic, LlmPlanGenerator, RefinePlanInput,
    RefinePlanUseCase, RefinementOutcome, RunAnalysisInput, RunAnalysisUseCase,
    ToolAugmentedAnalyzer,
};
use planner_domain::{ModelConfig, OutputFormat, Plan};
use planner_infrastructure::{
    ConfigLoader, FileConfig, JsonPlanStore, JsonlConversationLogger, OllamaConfig,
    OllamaGateway, ReportWriter, StoredPlan, build_toolbox,
};
use planner_presentation::{Cli, Command, ConsoleFormatter, ProgressReporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "bizplan.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting bizplan");

    let config = load_config(&cli)?;

    if !cli.no_color && config.output.color {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }

    if cli.command == Command::Config {
        show_config(&cli, &config)?;
        return Ok(());
    }

    let app = App::new(&cli, config)?;
    app.check_models().await;

    match cli.command.clone() {
        Command::Plan {
            subject,
            context,
            plan,
        } => {
            app.plan(&subject, &context, plan.as_deref()).await?;
        }
        Command::Analyze {
            plan,
            subject,
            context,
        } => {
            let path = plan.unwrap_or_else(|| app.config.output.plan_path.clone());
            let stored = JsonPlanStore::new(&path)
                .load()
                .with_context(|| format!("Failed to load plan from {}", path.display()))?;

            let Some(subject) = subject.or(stored.subject) else {
                bail!("{} records no subject; pass --subject", path.display());
            };
            let Some(context) = context.or(stored.context) else {
                bail!("{} records no context; pass --context", path.display());
            };
            let mut plan = stored.plan;
            let analyzed = plan.analyzed_count();
            if analyzed > 0 {
                warn!(
                    "{} already holds {} topic reports; re-analyzing from scratch",
                    path.display(),
                    analyzed
                );
                plan = plan.without_results();
            }
            app.analyze(&subject, &context, plan, &path).await?;
        }
        Command::Run {
            subject,
            context,
            plan,
        } => {
            let path = plan.unwrap_or_else(|| app.config.output.plan_path.clone());
            let refined = app.plan(&subject, &context, Some(&path)).await?;
            app.analyze(&subject, &context, refined, &path).await?;
        }
        Command::Config => {}
    }

    Ok(())
}

/// Install the tracing subscriber. `-v` count picks the level unless
/// `RUST_LOG` is set; `--log-dir` adds a daily-rolling log file.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}

/// Load configuration files, apply flag overrides and validate.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    if let Some(threshold) = cli.threshold {
        config.refinement.quality_threshold = threshold;
    }
    if let Some(max) = cli.max_iterations {
        config.refinement.max_iterations = max;
    }
    if cli.lite {
        config.models.lite = true;
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("error: {}", issue.message);
        } else {
            eprintln!("warning: {}", issue.message);
        }
    }
    if FileConfig::has_errors(&issues) {
        bail!("Invalid configuration");
    }

    Ok(config)
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    for line in ConfigLoader::config_sources(cli.config.as_deref()) {
        println!("{}", line);
    }

    let mut shown = config.clone();
    if shown.search.tavily_api_key.is_some() {
        shown.search.tavily_api_key = Some("********".to_string());
    }
    let (models, _) = config.models.to_model_config();

    println!();
    println!(
        "Models: planner={} critic={} analyst={}",
        models.planner, models.critic, models.analyst
    );
    println!();
    println!(
        "{}",
        toml::to_string_pretty(&shown).context("Failed to render configuration")?
    );
    Ok(())
}

/// Wired dependencies shared by the subcommands
struct App {
    config: FileConfig,
    models: ModelConfig,
    format: OutputFormat,
    gateway: Arc<OllamaGateway>,
    conversation_logger: Option<Arc<dyn ConversationLogger>>,
    cancellation: CancellationToken,
    quiet: bool,
    strict: bool,
}

impl App {
    fn new(cli: &Cli, config: FileConfig) -> Result<Self> {
        let (models, _) = config.models.to_model_config();
        let format = config.output.format.unwrap_or_default();

        // === Dependency Injection ===
        let gateway = Arc::new(
            OllamaGateway::new(OllamaConfig::from(&config.ollama))
                .context("Failed to create Ollama gateway")?,
        );

        let conversation_logger = config
            .output
            .conversation_log
            .as_ref()
            .and_then(JsonlConversationLogger::new)
            .map(|logger| Arc::new(logger) as Arc<dyn ConversationLogger>);

        let cancellation = CancellationToken::new();
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling");
                token.cancel();
            }
        });

        Ok(Self {
            config,
            models,
            format,
            gateway,
            conversation_logger,
            cancellation,
            quiet: cli.quiet,
            strict: cli.strict,
        })
    }

    /// Warn about configured models the server has not pulled.
    async fn check_models(&self) {
        let available = match self.gateway.available_models().await {
            Ok(models) => models,
            Err(e) => {
                warn!("Could not list models at {}: {}", self.gateway.host(), e);
                return;
            }
        };

        for model in [&self.models.planner, &self.models.critic, &self.models.analyst] {
            if !available.contains(model) {
                warn!("Model {} is not pulled; run `ollama pull {}`", model, model);
            }
        }
    }

    /// Refine a plan and save it.
    async fn plan(&self, subject: &str, context: &str, path: Option<&Path>) -> Result<Plan> {
        let mut generator = LlmPlanGenerator::new(self.gateway.clone(), self.models.planner.clone());
        let mut critic = LlmPlanCritic::new(self.gateway.clone(), self.models.critic.clone());
        if let Some(logger) = &self.conversation_logger {
            generator = generator.with_conversation_logger(logger.clone());
            critic = critic.with_conversation_logger(logger.clone());
        }

        let params = self.config.refinement.to_params();
        let threshold = params.quality_threshold;
        let use_case = RefinePlanUseCase::new(Arc::new(generator), Arc::new(critic))
            .with_params(params)
            .with_cancellation(self.cancellation.clone());

        let input = RefinePlanInput::new(subject, context);
        let outcome = if self.quiet {
            use_case.execute(input).await
        } else {
            let progress = ProgressReporter::new();
            use_case.execute_with_progress(input, &progress).await
        }
        .context("Plan refinement failed")?;

        println!(
            "{}",
            ConsoleFormatter::format_refinement(&outcome, subject, context, threshold, self.format)
        );

        let outcome = if self.strict {
            outcome.into_converged()?
        } else {
            if let RefinementOutcome::Exhausted {
                iterations,
                critique,
                ..
            } = &outcome
            {
                warn!(
                    "Plan stayed at {:.1} after {} iterations; saving it anyway",
                    critique.score(),
                    iterations
                );
            }
            outcome
        };

        let plan = outcome.into_plan();
        let path = path.map_or_else(|| self.config.output.plan_path.clone(), Path::to_path_buf);
        JsonPlanStore::new(&path)
            .save(&StoredPlan::new(subject, context, plan.clone()))
            .with_context(|| format!("Failed to save plan to {}", path.display()))?;
        if !self.quiet {
            eprintln!("Plan saved to {}", path.display());
        }

        Ok(plan)
    }

    /// Analyze every topic, write the report and save the analyzed plan.
    async fn analyze(&self, subject: &str, context: &str, plan: Plan, plan_path: &Path) -> Result<()> {
        let params = self.config.analysis.to_params();
        let analyst: Arc<dyn LlmGateway> = self.gateway.clone();
        let toolbox = build_toolbox(&self.config.search, analyst, &self.models.analyst)
            .context("Failed to set up search tools")?;

        let mut analyzer = ToolAugmentedAnalyzer::new(self.gateway.clone(), self.models.analyst.clone())
            .with_toolbox(toolbox)
            .with_params(params.clone());
        if let Some(logger) = &self.conversation_logger {
            analyzer = analyzer.with_conversation_logger(logger.clone());
        }

        let use_case = RunAnalysisUseCase::new(Arc::new(analyzer))
            .with_params(params)
            .with_cancellation(self.cancellation.clone());

        let input = RunAnalysisInput::new(subject, context, plan);
        let outcome = if self.quiet {
            use_case.execute(input).await
        } else {
            let progress = ProgressReporter::new();
            use_case.execute_with_progress(input, &progress).await
        }
        .context("Analysis failed")?;

        println!("{}", ConsoleFormatter::format_analysis(&outcome, self.format));

        let report_path: PathBuf = ReportWriter::new(&self.config.output.reports_dir)
            .write(subject, context, &outcome.combined_report())
            .context("Failed to write report")?;

        let analyzed = outcome.into_plan()?;
        JsonPlanStore::new(plan_path)
            .save(&StoredPlan::new(subject, context, analyzed))
            .with_context(|| format!("Failed to save analyzed plan to {}", plan_path.display()))?;

        if !self.quiet {
            eprintln!("Report written to {}", report_path.display());
        }
        Ok(())
    }
}
