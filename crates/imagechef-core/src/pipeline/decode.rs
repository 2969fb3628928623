//! Image decoding with content-based format detection.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Decodes image files into memory.
#[derive(Debug, Clone, Default)]
pub struct ImageDecoder;

/// Result of decoding an image.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Read and decode the image at `path`.
    ///
    /// The format is sniffed from the file contents first and only falls
    /// back to the extension when the contents are not recognised.
    pub fn decode(&self, path: &Path) -> PipelineResult<DecodedImage> {
        let bytes = std::fs::read(path).map_err(|e| PipelineError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::decode_bytes(bytes, path)
    }

    /// Decode from an in-memory buffer; `path` is used for format fallback
    /// and error context.
    pub fn decode_bytes(bytes: Vec<u8>, path: &Path) -> PipelineResult<DecodedImage> {
        use std::io::Cursor;

        let cursor = Cursor::new(bytes);
        let mut reader = image::ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = match reader.format() {
            Some(f) => f,
            None => {
                let f = ImageFormat::from_path(path).map_err(|_| {
                    PipelineError::UnsupportedFormat {
                        path: path.to_path_buf(),
                        format: extension_of(path),
                    }
                })?;
                reader.set_format(f);
                f
            }
        };
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        tracing::trace!("Decoded {:?} as {:?} ({}x{})", path, format, width, height);
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }

    /// Decode every path in order, failing on the first error.
    pub fn decode_all(&self, paths: &[std::path::PathBuf]) -> PipelineResult<Vec<DynamicImage>> {
        paths
            .iter()
            .map(|p| self.decode(p).map(|d| d.image))
            .collect()
    }
}

/// Lowercased extension of `path`, or `"unknown"`.
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        ImageFormat::OpenExr => "exr".to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_format_to_string() {
        assert_eq!(format_to_string(ImageFormat::Jpeg), "jpeg");
        assert_eq!(format_to_string(ImageFormat::Png), "png");
        assert_eq!(format_to_string(ImageFormat::OpenExr), "exr");
    }

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        RgbImage::from_pixel(7, 3, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let decoded = ImageDecoder::new().decode(&path).unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!((decoded.width, decoded.height), (7, 3));
    }

    #[test]
    fn test_format_detected_by_content() {
        // A PNG saved under a .jpg name is still decoded as PNG
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("real.png");
        RgbImage::new(4, 4).save(&png).unwrap();
        let misnamed = dir.path().join("misnamed.jpg");
        std::fs::copy(&png, &misnamed).unwrap();

        let bytes = std::fs::read(&misnamed).unwrap();
        let result = ImageDecoder::decode_bytes(bytes, &misnamed).unwrap();
        assert_eq!(result.format, ImageFormat::Png);
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = ImageDecoder::new().decode(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageDecoder::new()
            .decode(&dir.path().join("gone.png"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
