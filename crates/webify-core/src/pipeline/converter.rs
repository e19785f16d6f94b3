//! Directory conversion: list, classify, decode, encode, delete, report.

use std::path::{Path, PathBuf};

use crate::config::ConversionConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::types::{ConversionOutcome, DirectoryReport, FileReport, RunSummary};

use super::decode::ImageDecoder;
use super::discovery::FileDiscovery;
use super::encode::JpegWriter;
use super::job::{classify, ConversionJob, EntryClass};

/// Converts every non-web-safe image in a directory to JPEG in place.
///
/// Files are processed one at a time. A failure on one file is logged and
/// recorded; it never stops the rest of the directory.
pub struct DirectoryConverter {
    writer: JpegWriter,
}

impl DirectoryConverter {
    /// Create a converter with the given conversion settings.
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            writer: JpegWriter::new(config.jpeg_quality),
        }
    }

    /// Convert each directory in order. Missing directories are reported and
    /// do not affect the others.
    pub fn convert_all(&self, directories: &[PathBuf]) -> RunSummary {
        let reports = directories
            .iter()
            .map(|dir| self.convert_directory(dir))
            .collect();
        RunSummary::new(reports)
    }

    /// Convert a single directory, one level deep.
    pub fn convert_directory(&self, directory: &Path) -> DirectoryReport {
        self.convert_directory_with(directory, |_| {})
    }

    /// Like [`convert_directory`](Self::convert_directory), calling
    /// `on_file` after each entry is handled.
    pub fn convert_directory_with(
        &self,
        directory: &Path,
        mut on_file: impl FnMut(&FileReport),
    ) -> DirectoryReport {
        if !directory.exists() {
            tracing::warn!("Directory not found: {}", directory.display());
            return DirectoryReport::missing(directory.to_path_buf());
        }
        if !directory.is_dir() {
            tracing::warn!("Not a directory: {}", directory.display());
            return DirectoryReport::missing(directory.to_path_buf());
        }

        tracing::info!(
            "Scanning directory: {} for unsupported images...",
            directory.display()
        );
        tracing::debug!("JPEG quality: {}", self.writer.quality());

        let mut report = DirectoryReport {
            directory: directory.to_path_buf(),
            found: true,
            files: Vec::new(),
        };

        let files = match FileDiscovery::discover(directory) {
            Ok(files) => files,
            Err(e) => {
                tracing::error!("Cannot list {}: {}", directory.display(), e);
                return report;
            }
        };

        for path in files {
            let outcome = match classify(&path) {
                EntryClass::Skip(reason) => {
                    tracing::debug!("Skipping {:?} ({:?})", path, reason);
                    ConversionOutcome::Skipped { reason }
                }
                EntryClass::Convert(job) => self.run_job(&job),
            };

            let file = FileReport {
                source: path,
                outcome,
            };
            on_file(&file);
            report.files.push(file);
        }

        tracing::info!(
            "Finished {}: {} converted, {} failed, {} skipped",
            directory.display(),
            report.converted(),
            report.failed(),
            report.skipped()
        );
        report
    }

    /// Decode, encode and remove the original for one job.
    ///
    /// The original is removed only after the JPEG is fully in place. If
    /// removal fails the JPEG is kept and the error is returned.
    pub fn convert_file(&self, job: &ConversionJob) -> ConvertResult<PathBuf> {
        let image = ImageDecoder::decode(job)?;
        self.writer.write(&image, &job.target_path)?;

        std::fs::remove_file(&job.source_path).map_err(|source| ConvertError::Delete {
            path: job.source_path.clone(),
            source,
        })?;
        tracing::info!("Removed original: {}", display_name(&job.source_path));

        Ok(job.target_path.clone())
    }

    /// Run a job and turn its result into a logged outcome.
    fn run_job(&self, job: &ConversionJob) -> ConversionOutcome {
        let name = display_name(&job.source_path);
        tracing::info!("Converting: {} ...", name);

        match self.convert_file(job) {
            Ok(output) => {
                tracing::info!("Success: {} -> {}", name, display_name(&output));
                ConversionOutcome::Converted { output }
            }
            Err(e) => {
                tracing::error!(stage = e.stage(), "Failed to convert {}: {}", name, e);
                ConversionOutcome::Failed {
                    stage: e.stage().to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
