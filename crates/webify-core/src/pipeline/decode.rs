//! Decoding to an 8-bit RGB buffer.
//!
//! RAW files go through imagepipe (rawloader + demosaic with default
//! processing). Everything else goes through the `image` crate with the
//! format sniffed from content, falling back to the extension. HEIF content
//! is routed to libheif when the `heif` feature is enabled.

use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};

use super::job::{ConversionJob, DecoderKind};

/// ISO-BMFF major brands that identify HEIF still images.
const HEIF_BRANDS: [&[u8; 4]; 9] = [
    b"heic", b"heix", b"heim", b"heis", b"hevc", b"hevx", b"hevm", b"mif1", b"msf1",
];

/// Decodes source files into RGB pixel buffers.
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode the job's source with the decoder it was classified for.
    ///
    /// Decoder panics on malformed input are caught and reported as
    /// [`ConvertError::Decode`] so one bad file cannot end the batch.
    pub fn decode(job: &ConversionJob) -> ConvertResult<RgbImage> {
        let path = job.source_path.as_path();
        let decoder = job.decoder;

        panic::catch_unwind(AssertUnwindSafe(|| match decoder {
            DecoderKind::Raw => Self::decode_raw(path),
            DecoderKind::Generic => Self::decode_generic(path),
        }))
        .unwrap_or_else(|payload| {
            Err(ConvertError::Decode {
                path: path.to_path_buf(),
                message: format!("decoder panicked: {}", panic_message(payload.as_ref())),
            })
        })
    }

    /// Decode camera RAW sensor data and demosaic it with default settings.
    pub fn decode_raw(path: &Path) -> ConvertResult<RgbImage> {
        // 0x0 keeps the full sensor resolution
        let decoded =
            imagepipe::simple_decode_8bit(path, 0, 0).map_err(|message| ConvertError::Decode {
                path: path.to_path_buf(),
                message,
            })?;

        let (width, height) = (decoded.width as u32, decoded.height as u32);
        RgbImage::from_raw(width, height, decoded.data).ok_or_else(|| ConvertError::Decode {
            path: path.to_path_buf(),
            message: format!("RAW decoder returned a short buffer for {width}x{height}"),
        })
    }

    /// Decode any other raster format, converting to RGB.
    ///
    /// Alpha is dropped; greyscale and palette images are promoted.
    pub fn decode_generic(path: &Path) -> ConvertResult<RgbImage> {
        let bytes = std::fs::read(path).map_err(|e| ConvertError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read file: {}", e),
        })?;

        if is_heif(&bytes) {
            return Self::decode_heif(path);
        }

        let mut reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ConvertError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        if reader.format().is_none() {
            let format =
                ImageFormat::from_path(path).map_err(|_| ConvertError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    format: path
                        .extension()
                        .and_then(|e| e.to_str())
                        .unwrap_or("unknown")
                        .to_string(),
                })?;
            reader.set_format(format);
        }

        let image = reader.decode().map_err(|e| ConvertError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(image.into_rgb8())
    }

    #[cfg(feature = "heif")]
    fn decode_heif(path: &Path) -> ConvertResult<RgbImage> {
        use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

        let heif_err = |e: libheif_rs::HeifError| ConvertError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let path_str = path.to_str().ok_or_else(|| ConvertError::Decode {
            path: path.to_path_buf(),
            message: "HEIF path is not valid UTF-8".to_string(),
        })?;
        let lib_heif = LibHeif::new();
        let ctx = HeifContext::read_from_file(path_str).map_err(heif_err)?;
        let handle = ctx.primary_image_handle().map_err(heif_err)?;
        let decoded = lib_heif
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(heif_err)?;

        let (width, height) = (decoded.width(), decoded.height());
        let planes = decoded.planes();
        let plane = planes.interleaved.ok_or_else(|| ConvertError::Decode {
            path: path.to_path_buf(),
            message: "HEIF decoder returned no interleaved plane".to_string(),
        })?;

        // Rows may be padded past width * 3
        let row_len = width as usize * 3;
        let mut data = Vec::with_capacity(row_len * height as usize);
        for row in plane.data.chunks(plane.stride).take(height as usize) {
            data.extend_from_slice(&row[..row_len]);
        }
        RgbImage::from_raw(width, height, data).ok_or_else(|| ConvertError::Decode {
            path: path.to_path_buf(),
            message: format!("HEIF decoder returned a short buffer for {width}x{height}"),
        })
    }

    #[cfg(not(feature = "heif"))]
    fn decode_heif(path: &Path) -> ConvertResult<RgbImage> {
        Err(ConvertError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: "heif (built without the `heif` feature)".to_string(),
        })
    }
}

/// Check for an ISO-BMFF `ftyp` box carrying a HEIF brand.
fn is_heif(header: &[u8]) -> bool {
    header.len() >= 12
        && &header[4..8] == b"ftyp"
        && HEIF_BRANDS.iter().any(|brand| &header[8..12] == brand.as_slice())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::job::{classify, EntryClass};
    use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};

    fn job_for(path: &Path) -> ConversionJob {
        match classify(path) {
            EntryClass::Convert(job) => job,
            other => panic!("expected a job, got {other:?}"),
        }
    }

    #[test]
    fn test_is_heif() {
        let heic = [0, 0, 0, 0x18, b'f', b't', b'y', b'p', b'h', b'e', b'i', b'c'];
        let mif1 = [0, 0, 0, 0x18, b'f', b't', b'y', b'p', b'm', b'i', b'f', b'1'];
        let mp4 = [0, 0, 0, 0x18, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(is_heif(&heic));
        assert!(is_heif(&mif1));
        assert!(!is_heif(&mp4));
        assert!(!is_heif(b"BM"));
    }

    #[test]
    fn test_generic_decode_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.tiff");
        let mut img = RgbaImage::new(8, 4);
        for pixel in img.pixels_mut() {
            *pixel = Rgba([10, 200, 30, 0]);
        }
        DynamicImage::ImageRgba8(img)
            .save_with_format(&path, ImageFormat::Tiff)
            .unwrap();

        let rgb = ImageDecoder::decode(&job_for(&path)).unwrap();
        assert_eq!(rgb.dimensions(), (8, 4));
        assert_eq!(rgb.get_pixel(0, 0).0, [10, 200, 30]);
    }

    #[test]
    fn test_generic_decode_promotes_greyscale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.bmp");
        let img = GrayImage::from_pixel(5, 5, Luma([77]));
        DynamicImage::ImageLuma8(img)
            .save_with_format(&path, ImageFormat::Bmp)
            .unwrap();

        let rgb = ImageDecoder::decode(&job_for(&path)).unwrap();
        assert_eq!(rgb.get_pixel(2, 2).0, [77, 77, 77]);
    }

    #[test]
    fn test_generic_decode_sniffs_content_over_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabelled.dat");
        DynamicImage::new_rgb8(3, 3)
            .save_with_format(&path, ImageFormat::Bmp)
            .unwrap();

        let rgb = ImageDecoder::decode(&job_for(&path)).unwrap();
        assert_eq!(rgb.dimensions(), (3, 3));
    }

    #[test]
    fn test_generic_decode_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"definitely not pixels").unwrap();

        let err = ImageDecoder::decode(&job_for(&path)).unwrap_err();
        assert_eq!(err.stage(), "decode");
    }

    #[test]
    fn test_raw_decode_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.nef");
        std::fs::write(&path, vec![0xAB; 512]).unwrap();

        let err = ImageDecoder::decode(&job_for(&path)).unwrap_err();
        assert!(matches!(err, ConvertError::Decode { .. }));
    }

    #[cfg(not(feature = "heif"))]
    #[test]
    fn test_heif_without_feature_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.heic");
        let mut bytes = vec![0, 0, 0, 0x18, b'f', b't', b'y', b'p', b'h', b'e', b'i', b'c'];
        bytes.extend_from_slice(&[0; 64]);
        std::fs::write(&path, bytes).unwrap();

        let err = ImageDecoder::decode(&job_for(&path)).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    }
}
