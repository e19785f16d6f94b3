//! The default command: convert every target directory in place.

mod summary;
pub mod types;

pub use types::SummaryFormat;

use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use webify_core::{Config, DirectoryConverter, RunSummary};

use summary::{completion_notice, create_spinner, print_summary, Tally};

/// Arguments for a conversion run.
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Directories to convert instead of the configured ones
    /// (resolved against the current directory)
    pub dirs: Vec<PathBuf>,

    /// Root that configured relative directories are resolved against
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// JPEG quality (1-100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// How to print the end-of-run summary
    #[arg(long, value_enum, default_value = "text")]
    pub summary: SummaryFormat,
}

/// Fold command-line overrides into the loaded configuration.
fn apply_overrides(args: &ConvertArgs, config: &mut Config) -> anyhow::Result<()> {
    if let Some(root) = &args.root {
        config.general.root = Some(root.clone());
    }
    if !args.dirs.is_empty() {
        config.targets.directories = args
            .dirs
            .iter()
            .map(std::path::absolute)
            .collect::<std::io::Result<_>>()?;
    }
    if let Some(quality) = args.quality {
        config.conversion.jpeg_quality = quality;
    }
    config.validate()?;
    Ok(())
}

/// Convert each target directory in sequence and print the summary.
///
/// Per-file failures and missing directories are logged and summarised but
/// never turn into an error.
pub fn execute(args: ConvertArgs, mut config: Config) -> anyhow::Result<()> {
    apply_overrides(&args, &mut config)?;
    let (summary, elapsed) = run(&config);

    let notice = completion_notice(&config.general.manifest);
    match args.summary {
        SummaryFormat::Text => {
            print_summary(&summary, elapsed);
            println!("\n{notice}\n");
        }
        SummaryFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            tracing::info!("{notice}");
        }
    }

    Ok(())
}

/// Run the converter over every target directory with a spinner per directory.
fn run(config: &Config) -> (RunSummary, std::time::Duration) {
    let converter = DirectoryConverter::new(&config.conversion);
    let start = Instant::now();

    let mut reports = Vec::new();
    for dir in config.target_dirs() {
        let spinner = create_spinner(&dir);
        let mut tally = Tally::default();
        let report = converter.convert_directory_with(&dir, |file| {
            tally.record(file);
            spinner.set_message(tally.message());
            spinner.tick();
        });
        spinner.finish_and_clear();
        reports.push(report);
    }

    (RunSummary::new(reports), start.elapsed())
}
