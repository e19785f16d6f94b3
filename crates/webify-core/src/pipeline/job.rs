//! Per-file classification: skip rule, decoder selection and target naming.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Extensions browsers already handle; files with these are never touched.
pub const WEB_SAFE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".webp", ".gif", ".svg"];

/// Camera RAW extensions routed to the RAW decoder.
pub const RAW_EXTENSIONS: [&str; 5] = [".dng", ".cr2", ".nef", ".arw", ".raw"];

/// Extension given to every converted file.
pub const TARGET_EXTENSION: &str = "jpg";

/// Decoder strategy for a file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoderKind {
    /// Sensor data, demosaiced to RGB
    Raw,
    /// Anything else: HEIF, BMP, TIFF and whatever the image decoder sniffs
    Generic,
}

impl DecoderKind {
    /// Pick the decoder for a normalised (lowercase, dotted) extension.
    ///
    /// Unknown extensions fall through to [`DecoderKind::Generic`].
    pub fn for_extension(extension: &str) -> Self {
        if RAW_EXTENSIONS.contains(&extension) {
            DecoderKind::Raw
        } else {
            DecoderKind::Generic
        }
    }
}

/// Why a directory entry was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Already in a web-safe format
    WebSafe,
    /// Name has no extension
    NoExtension,
    /// Dotfile
    Hidden,
}

/// A single pending conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// File to convert
    pub source_path: PathBuf,
    /// Lowercase extension including the leading dot
    pub extension: String,
    /// Sibling of `source_path` named `<stem>.jpg`
    pub target_path: PathBuf,
    /// Decoder selected for `extension`
    pub decoder: DecoderKind,
}

/// Result of classifying a directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryClass {
    Skip(SkipReason),
    Convert(ConversionJob),
}

/// Lowercase extension of `path` with a leading dot, if it has one.
pub fn normalized_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Classify a file: skip it, or build the job that converts it.
pub fn classify(path: &Path) -> EntryClass {
    let hidden = path
        .file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false);
    if hidden {
        return EntryClass::Skip(SkipReason::Hidden);
    }

    let Some(extension) = normalized_extension(path) else {
        return EntryClass::Skip(SkipReason::NoExtension);
    };
    if WEB_SAFE_EXTENSIONS.contains(&extension.as_str()) {
        return EntryClass::Skip(SkipReason::WebSafe);
    }

    EntryClass::Convert(ConversionJob {
        source_path: path.to_path_buf(),
        target_path: path.with_extension(TARGET_EXTENSION),
        decoder: DecoderKind::for_extension(&extension),
        extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(path: &str) -> ConversionJob {
        match classify(Path::new(path)) {
            EntryClass::Convert(job) => job,
            other => panic!("expected a job for {path}, got {other:?}"),
        }
    }

    #[test]
    fn test_web_safe_extensions_are_skipped_case_insensitively() {
        for name in [
            "a.jpg", "a.JPG", "a.jpeg", "a.Jpeg", "a.png", "a.PNG", "a.webp", "a.gif", "a.svg",
            "a.SVG",
        ] {
            assert_eq!(
                classify(Path::new(name)),
                EntryClass::Skip(SkipReason::WebSafe),
                "{name}"
            );
        }
    }

    #[test]
    fn test_raw_extensions_select_raw_decoder() {
        for name in ["p.dng", "p.CR2", "p.nef", "p.ARW", "p.raw"] {
            assert_eq!(job(name).decoder, DecoderKind::Raw, "{name}");
        }
    }

    #[test]
    fn test_other_extensions_fall_through_to_generic() {
        for name in ["p.heic", "p.HEIF", "p.bmp", "p.tiff", "p.xyz"] {
            assert_eq!(job(name).decoder, DecoderKind::Generic, "{name}");
        }
    }

    #[test]
    fn test_target_is_sibling_with_jpg_extension() {
        let job = job("/photos/sunset.ARW");
        assert_eq!(job.target_path, PathBuf::from("/photos/sunset.jpg"));
        assert_eq!(job.extension, ".arw");
        assert_eq!(job.source_path, PathBuf::from("/photos/sunset.ARW"));
    }

    #[test]
    fn test_only_last_extension_is_replaced() {
        let job = job("/photos/trip.day1.heic");
        assert_eq!(job.target_path, PathBuf::from("/photos/trip.day1.jpg"));
    }

    #[test]
    fn test_hidden_and_extensionless_files_are_skipped() {
        assert_eq!(
            classify(Path::new("/photos/.DS_Store")),
            EntryClass::Skip(SkipReason::Hidden)
        );
        assert_eq!(
            classify(Path::new("/photos/.hidden.nef")),
            EntryClass::Skip(SkipReason::Hidden)
        );
        assert_eq!(
            classify(Path::new("/photos/README")),
            EntryClass::Skip(SkipReason::NoExtension)
        );
    }
}
