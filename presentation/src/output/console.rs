//! Console output formatter for batch reports

use atoss_application::BatchReport;
use atoss_domain::ReportFormat;
use colored::Colorize;

/// Formats batch reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format in the requested style
    pub fn render(report: &BatchReport, format: ReportFormat) -> String {
        match format {
            ReportFormat::Text => Self::format(report),
            ReportFormat::Json => Self::format_json(report),
        }
    }

    /// Human-readable summary
    pub fn format(report: &BatchReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Split Run Summary"));
        output.push('\n');

        let status = if report.cancelled {
            "cancelled".yellow().bold()
        } else {
            "completed".green().bold()
        };
        output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), status));
        output.push_str(&format!(
            "{} {}..{} ({} of {} planned)\n",
            "Records:".cyan().bold(),
            report.start,
            report.end,
            report.processed,
            report.planned()
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Started:".cyan().bold(),
            report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&Self::row("Written", report.written));
        output.push_str(&Self::row("Skipped (no candidates)", report.skipped_no_candidates));
        output.push_str(&Self::row("Skipped (no selections)", report.skipped_no_selections));
        output.push_str(&Self::row("Raw lines", report.raw_lines));
        output.push_str(&Self::row("Final lines", report.final_lines));

        let anomalies = [
            ("Partial generations", report.partial_generations),
            ("Partial selections", report.partial_selections),
            ("Undecodable lines kept", report.decode_fallbacks),
        ];
        if anomalies.iter().any(|(_, count)| *count > 0) {
            output.push_str(&format!("\n{}\n", "Warnings:".yellow().bold()));
            for (label, count) in anomalies.iter().filter(|(_, count)| *count > 0) {
                output.push_str(&format!("  * {label}: {count}\n"));
            }
        }

        output.push_str(&format!(
            "\n{} {:.1}s\n",
            "Elapsed:".dimmed(),
            report.elapsed.as_secs_f64()
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &BatchReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn row(label: &str, value: usize) -> String {
        format!("  {:<26}{}\n", label, value)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn sample_report() -> BatchReport {
        BatchReport {
            started_at: chrono::Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap(),
            start: 0,
            end: 3,
            processed: 3,
            written: 2,
            skipped_no_candidates: 1,
            skipped_no_selections: 0,
            partial_generations: 0,
            partial_selections: 1,
            raw_lines: 20,
            final_lines: 5,
            decode_fallbacks: 0,
            cancelled: false,
            elapsed: Duration::from_secs(12),
        }
    }

    #[test]
    fn test_text_summary() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&sample_report());

        assert!(text.contains("Status: completed"));
        assert!(text.contains("0..3 (3 of 3 planned)"));
        assert!(text.contains("2026-01-05 10:00:00 UTC"));
        assert!(text.contains("Raw lines                 20"));
        assert!(text.contains("Partial selections: 1"));
        assert!(!text.contains("Partial generations"));
        assert!(text.contains("Elapsed: 12.0s"));
    }

    #[test]
    fn test_cancelled_status() {
        colored::control::set_override(false);
        let mut report = sample_report();
        report.cancelled = true;
        assert!(ConsoleFormatter::format(&report).contains("Status: cancelled"));
    }

    #[test]
    fn test_json_report() {
        let json = ConsoleFormatter::render(&sample_report(), ReportFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["processed"], 3);
        assert_eq!(value["final_lines"], 5);
        assert_eq!(value["cancelled"], false);
        assert_eq!(value["started_at"], "2026-01-05T10:00:00Z");
    }
}
