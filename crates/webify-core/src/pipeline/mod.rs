//! Conversion pipeline components.
//!
//! - **discovery**: List the files directly inside a directory
//! - **job**: Skip rule, decoder selection and target naming
//! - **decode**: RAW and generic decoding to RGB
//! - **encode**: JPEG output with write-then-rename
//! - **converter**: Orchestrates a directory, one file at a time

pub mod converter;
pub mod decode;
pub mod discovery;
pub mod encode;
pub mod job;

// Re-exports for convenient access
pub use converter::DirectoryConverter;
pub use decode::ImageDecoder;
pub use discovery::FileDiscovery;
pub use encode::JpegWriter;
pub use job::{classify, ConversionJob, DecoderKind, EntryClass, SkipReason};
