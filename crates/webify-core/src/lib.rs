//! webify core - convert non-web-friendly images to JPEG in place.
//!
//! Camera RAW files, HEIC/HEIF and any other raster format the decoders
//! understand are rewritten as `<stem>.jpg` next to the original, and the
//! original is removed once the JPEG is safely on disk. Files that browsers
//! already handle (JPEG, PNG, WebP, GIF, SVG) are left alone.
//!
//! # Pipeline
//!
//! ```text
//! Directory → List → Classify → Decode (RAW | generic) → JPEG → Remove original
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use webify_core::{Config, DirectoryConverter};
//!
//! let config = Config::load().unwrap_or_default();
//! let converter = DirectoryConverter::new(&config.conversion);
//! let summary = converter.convert_all(&config.target_dirs());
//! println!("{} converted, {} failed", summary.totals.converted, summary.totals.failed);
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, ConvertError, ConvertResult};
pub use pipeline::{ConversionJob, DecoderKind, DirectoryConverter, EntryClass, SkipReason};
pub use types::{ConversionOutcome, DirectoryReport, FileReport, RunSummary, RunTotals};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
