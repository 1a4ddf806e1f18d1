//! Progress reporting for batch runs

use atoss_application::{BatchProgressNotifier, BatchReport, RecordOutcome, RecordStatus};
use atoss_domain::SplitPhase;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Reports progress during a batch run with a progress bar
pub struct BatchProgressReporter {
    bar: ProgressBar,
}

impl BatchProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::new(0),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed}, eta {eta}) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: SplitPhase) -> &'static str {
        match phase {
            SplitPhase::Fetching => "fetching",
            SplitPhase::Generating => "generating candidates",
            SplitPhase::LoggingRaw => "writing raw log",
            SplitPhase::Filtering => "filtering",
            SplitPhase::LoggingFinal => "writing final log",
        }
    }
}

impl Default for BatchProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProgressNotifier for BatchProgressReporter {
    fn on_run_start(&self, total_records: usize) {
        self.bar.set_length(total_records as u64);
        self.bar.set_style(Self::bar_style());
        self.bar.set_prefix("Splitting");
        self.bar.set_message("Starting...");
    }

    fn on_phase(&self, index: usize, phase: SplitPhase) {
        self.bar.set_message(format!(
            "#{} {}",
            index,
            Self::phase_display_name(phase).dimmed()
        ));
    }

    fn on_record_complete(&self, outcome: &RecordOutcome) {
        match outcome.status {
            RecordStatus::Written => {}
            RecordStatus::NoCandidates => self.bar.println(format!(
                "{} #{} skipped: no candidates",
                "!".yellow(),
                outcome.index
            )),
            RecordStatus::NoSelections => self.bar.println(format!(
                "{} #{} skipped final log: no selections",
                "!".yellow(),
                outcome.index
            )),
        }
        self.bar.inc(1);
    }

    fn on_run_complete(&self, report: &BatchReport) {
        if report.cancelled {
            self.bar
                .abandon_with_message(format!("{}", "Cancelled".yellow().bold()));
        } else {
            self.bar
                .finish_with_message(format!("{}", "Done!".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl BatchProgressNotifier for SimpleProgress {
    fn on_run_start(&self, total_records: usize) {
        eprintln!("{} {} ({} records)", "->".cyan(), "Splitting".bold(), total_records);
    }

    fn on_record_complete(&self, outcome: &RecordOutcome) {
        match outcome.status {
            RecordStatus::Written => eprintln!(
                "  {} #{} {} raw, {} final ({:.1}s)",
                "v".green(),
                outcome.index,
                outcome.raw_lines,
                outcome.final_lines,
                outcome.elapsed.as_secs_f64()
            ),
            RecordStatus::NoCandidates => {
                eprintln!("  {} #{} no candidates", "x".red(), outcome.index)
            }
            RecordStatus::NoSelections => eprintln!(
                "  {} #{} {} raw, no selections",
                "x".yellow(),
                outcome.index,
                outcome.raw_lines
            ),
        }
    }

    fn on_run_complete(&self, _report: &BatchReport) {
        eprintln!();
    }
}
