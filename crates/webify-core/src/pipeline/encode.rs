//! JPEG encoding with write-then-rename.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};

/// Writes RGB buffers as baseline JPEG files.
pub struct JpegWriter {
    quality: u8,
}

impl JpegWriter {
    /// Create a writer with the given quality (1-100).
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }

    /// Encode `image` to `target`.
    ///
    /// The data goes to a hidden temporary file in the target's directory
    /// which is renamed over `target` once fully written, replacing any
    /// existing file. On failure nothing is left at `target`.
    pub fn write(&self, image: &RgbImage, target: &Path) -> ConvertResult<()> {
        let encode_err = |message: String| ConvertError::Encode {
            path: target.to_path_buf(),
            message,
        };

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".webify-")
            .suffix(".part")
            .tempfile_in(dir)
            .map_err(|e| encode_err(format!("Cannot create temporary file: {}", e)))?;

        {
            let mut out = BufWriter::new(tmp.as_file_mut());
            JpegEncoder::new_with_quality(&mut out, self.quality)
                .write_image(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| encode_err(e.to_string()))?;
            out.flush().map_err(|e| encode_err(e.to_string()))?;
        }

        tmp.persist(target)
            .map_err(|e| encode_err(format!("Cannot move output into place: {}", e.error)))?;
        Ok(())
    }

    /// Configured JPEG quality.
    pub fn quality(&self) -> u8 {
        self.quality
    }
}
