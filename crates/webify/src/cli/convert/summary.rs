//! Progress display and the end-of-run summary.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use webify_core::{ConversionOutcome, FileReport, RunSummary};

/// Spinner shown while a directory is being converted.
pub fn create_spinner(directory: &Path) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(format!("scanning {}", directory.display()));
    pb
}

/// Running per-directory counters behind the spinner message.
#[derive(Debug, Default)]
pub struct Tally {
    pub converted: u64,
    pub failed: u64,
    pub skipped: u64,
}

impl Tally {
    pub fn record(&mut self, file: &FileReport) {
        match file.outcome {
            ConversionOutcome::Converted { .. } => self.converted += 1,
            ConversionOutcome::Failed { .. } => self.failed += 1,
            ConversionOutcome::Skipped { .. } => self.skipped += 1,
        }
    }

    pub fn message(&self) -> String {
        format!(
            "{} converted, {} failed, {} skipped",
            self.converted, self.failed, self.skipped
        )
    }
}

/// Print the summary table to stdout.
pub fn print_summary(summary: &RunSummary, elapsed: Duration) {
    println!("{}", render_summary(summary, elapsed));
}

/// Format the end-of-run summary table.
pub fn render_summary(summary: &RunSummary, elapsed: Duration) -> String {
    let totals = summary.totals;
    let rule = "  ====================================".to_string();

    let mut lines = vec![
        String::new(),
        rule.clone(),
        "               Summary".to_string(),
        rule.clone(),
    ];
    for dir in &summary.directories {
        if dir.found {
            lines.push(format!("    {}", dir.directory.display()));
            lines.push(format!(
                "      converted {:>5}   failed {:>5}   skipped {:>5}",
                dir.converted(),
                dir.failed(),
                dir.skipped()
            ));
        } else {
            lines.push(format!("    {} (not found)", dir.directory.display()));
        }
    }
    lines.push("  ------------------------------------".to_string());
    lines.push(format!("    Converted:    {:>8}", totals.converted));
    if totals.failed > 0 {
        lines.push(format!("    Failed:       {:>8}", totals.failed));
    }
    if totals.skipped > 0 {
        lines.push(format!("    Skipped:      {:>8}", totals.skipped));
    }
    if totals.missing_directories > 0 {
        lines.push(format!("    Missing dirs: {:>8}", totals.missing_directories));
    }
    lines.push(format!("    Duration:     {:>7.1}s", elapsed.as_secs_f64()));
    lines.push(rule);
    lines.join("\n")
}

/// Reminder that renamed files may break an external listing.
pub fn completion_notice(manifest: &str) -> String {
    format!("All conversion tasks completed. Update {manifest} if filenames changed!")
}
