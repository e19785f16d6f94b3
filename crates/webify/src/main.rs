//! webify CLI - convert RAW, HEIC and other non-web images to JPEG in place.
//!
//! Every file in the target directories that is not already web-safe
//! (JPEG, PNG, WebP, GIF, SVG) is rewritten as `<stem>.jpg` and the original
//! is removed. Subdirectories are not visited.
//!
//! # Usage
//!
//! ```bash
//! # Convert the configured directories (public/cooking, public/Photography)
//! webify
//!
//! # Convert specific directories
//! webify ./photos ./uploads --quality 85
//!
//! # View configuration
//! webify config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// webify - convert RAW, HEIC and other non-web images to JPEG in place.
#[derive(Parser, Debug)]
#[command(name = "webify")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Load configuration from this file instead of the default location
    #[arg(long, global = true, env = "WEBIFY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: cli::convert::ConvertArgs,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(webify_core::Config::default_path);
    let config = match (&cli.config, config_path.exists()) {
        // An explicit file must load; falling back could convert the wrong directories.
        (Some(path), _) => webify_core::Config::load_from(path)?,
        (None, true) => match webify_core::Config::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `webify config path`."
                );
                webify_core::Config::default()
            }
        },
        (None, false) => webify_core::Config::default(),
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("webify v{}", webify_core::VERSION);

    match cli.command {
        Some(Commands::Config(args)) => cli::config::execute(args, &config, &config_path),
        None => cli::convert::execute(cli.convert, config),
    }
}
