//! Progress reporting for refinement and analysis runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use planner_application::{AnalysisProgressNotifier, RefinementProgressNotifier};
use planner_domain::{Critique, Topic};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with spinners and a topic progress bar
pub struct ProgressReporter {
    multi: MultiProgress,
    step: Mutex<Option<ProgressBar>>,
    topics: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            step: Mutex::new(None),
            topics: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn start_step(&self, prefix: String, message: &str) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut step) = self.step.lock()
            && let Some(previous) = step.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn finish_step(&self, message: String) {
        if let Ok(mut step) = self.step.lock()
            && let Some(pb) = step.take()
        {
            pb.finish_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RefinementProgressNotifier for ProgressReporter {
    fn on_generation_start(&self, iteration: usize, refining: bool) {
        let message = if refining {
            "Refining plan from critique..."
        } else {
            "Generating initial plan..."
        };
        self.start_step(format!("Iteration {}", iteration), message);
    }

    fn on_generation_complete(&self, _iteration: usize, new_topics: usize, total: usize) {
        self.finish_step(format!(
            "{} +{} topics ({} total)",
            "v".green(),
            new_topics,
            total
        ));
    }

    fn on_critique_start(&self, iteration: usize) {
        self.start_step(format!("Iteration {}", iteration), "Critiquing plan...");
    }

    fn on_critique_complete(&self, _iteration: usize, critique: &Critique, passed: bool) {
        let mark = if passed { "v".green() } else { "x".yellow() };
        self.finish_step(format!(
            "{} score {:.1} ({})",
            mark,
            critique.score(),
            critique.score_band()
        ));
    }
}

impl AnalysisProgressNotifier for ProgressReporter {
    fn on_analysis_start(&self, total_topics: usize) {
        let pb = self.multi.add(ProgressBar::new(total_topics as u64));
        pb.set_style(Self::bar_style());
        pb.set_prefix("Analysis");
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut topics) = self.topics.lock() {
            *topics = Some(pb);
        }
    }

    fn on_topic_start(&self, _index: usize, _total: usize, topic: &Topic) {
        if let Ok(topics) = self.topics.lock()
            && let Some(pb) = topics.as_ref()
        {
            pb.set_message(topic.name().to_string());
        }
    }

    fn on_topic_complete(&self, _index: usize, _total: usize, topic: &Topic) {
        if let Ok(topics) = self.topics.lock()
            && let Some(pb) = topics.as_ref()
        {
            pb.set_message(format!("{} {}", "v".green(), topic.name()));
            pb.inc(1);
        }
    }

    fn on_analysis_complete(&self, analyzed: usize) {
        if let Ok(mut topics) = self.topics.lock()
            && let Some(pb) = topics.take()
        {
            pb.finish_with_message(format!("{} {} topics", "complete!".green(), analyzed));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RefinementProgressNotifier for SimpleProgress {
    fn on_generation_start(&self, iteration: usize, refining: bool) {
        let what = if refining { "Refining plan" } else { "Generating plan" };
        println!("{} {} (iteration {})", "->".cyan(), what.bold(), iteration);
    }

    fn on_generation_complete(&self, _iteration: usize, new_topics: usize, total: usize) {
        println!("  {} +{} topics ({} total)", "v".green(), new_topics, total);
    }

    fn on_critique_start(&self, _iteration: usize) {
        println!("{} {}", "->".cyan(), "Critiquing plan".bold());
    }

    fn on_critique_complete(&self, _iteration: usize, critique: &Critique, passed: bool) {
        if passed {
            println!("  {} score {:.1}", "v".green(), critique.score());
        } else {
            println!("  {} score {:.1} (below threshold)", "x".yellow(), critique.score());
        }
    }
}

impl AnalysisProgressNotifier for SimpleProgress {
    fn on_analysis_start(&self, total_topics: usize) {
        println!("{} {} ({} topics)", "->".cyan(), "Analysis".bold(), total_topics);
    }

    fn on_topic_start(&self, index: usize, total: usize, topic: &Topic) {
        println!("  [{}/{}] {}", index + 1, total, topic.name());
    }

    fn on_analysis_complete(&self, analyzed: usize) {
        println!("  {} {} topics analyzed", "v".green(), analyzed);
        println!();
    }
}
