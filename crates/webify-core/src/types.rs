//! Report types produced by a conversion run.
//!
//! Nothing here is persisted; reports exist so the caller can log, print a
//! summary, or emit JSON.

use serde::Serialize;
use std::path::PathBuf;

use crate::pipeline::job::SkipReason;

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionOutcome {
    /// Left alone
    Skipped { reason: SkipReason },
    /// Written as JPEG and the original removed
    Converted { output: PathBuf },
    /// Conversion failed at `stage`; see `reason`
    Failed { stage: String, reason: String },
}

/// Outcome for one directory entry.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Source file
    pub source: PathBuf,
    #[serde(flatten)]
    pub outcome: ConversionOutcome,
}

/// Outcome for one target directory.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryReport {
    /// Directory that was scanned
    pub directory: PathBuf,
    /// False if the directory did not exist
    pub found: bool,
    /// Per-file outcomes in processing order
    pub files: Vec<FileReport>,
}

impl DirectoryReport {
    /// Report for a directory that does not exist.
    pub fn missing(directory: PathBuf) -> Self {
        Self {
            directory,
            found: false,
            files: Vec::new(),
        }
    }

    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, ConversionOutcome::Converted { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ConversionOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ConversionOutcome::Skipped { .. }))
    }

    fn count(&self, pred: impl Fn(&ConversionOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Totals across every directory in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub missing_directories: usize,
}

/// Everything a run did, in directory order.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub directories: Vec<DirectoryReport>,
    pub totals: RunTotals,
}

impl RunSummary {
    /// Build a summary, computing totals from the directory reports.
    pub fn new(directories: Vec<DirectoryReport>) -> Self {
        let totals = directories
            .iter()
            .fold(RunTotals::default(), |mut acc, dir| {
                acc.converted += dir.converted();
                acc.failed += dir.failed();
                acc.skipped += dir.skipped();
                if !dir.found {
                    acc.missing_directories += 1;
                }
                acc
            });
        Self {
            directories,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(source: &str, outcome: ConversionOutcome) -> FileReport {
        FileReport {
            source: PathBuf::from(source),
            outcome,
        }
    }

    #[test]
    fn test_run_summary_totals() {
        let first = DirectoryReport {
            directory: PathBuf::from("/site/public/cooking"),
            found: true,
            files: vec![
                report(
                    "a.heic",
                    ConversionOutcome::Converted {
                        output: PathBuf::from("a.jpg"),
                    },
                ),
                report(
                    "b.png",
                    ConversionOutcome::Skipped {
                        reason: SkipReason::WebSafe,
                    },
                ),
                report(
                    "c.nef",
                    ConversionOutcome::Failed {
                        stage: "decode".into(),
                        reason: "truncated".into(),
                    },
                ),
            ],
        };
        let second = DirectoryReport::missing(PathBuf::from("/site/public/Photography"));

        let summary = RunSummary::new(vec![first, second]);
        assert_eq!(
            summary.totals,
            RunTotals {
                converted: 1,
                failed: 1,
                skipped: 1,
                missing_directories: 1,
            }
        );
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let file = report(
            "c.nef",
            ConversionOutcome::Failed {
                stage: "decode".into(),
                reason: "truncated".into(),
            },
        );
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["stage"], "decode");
        assert_eq!(json["source"], "c.nef");
    }
}
