//! Writing processed images back to disk.

use image::{DynamicImage, ImageFormat};
use std::path::Path;

use super::decode::extension_of;
use crate::error::{PipelineError, PipelineResult};

/// Save `image` to `path`, choosing the encoder from the file extension.
///
/// The pixel layout is converted to one the target encoder accepts: JPEG
/// has no alpha channel and OpenEXR only stores 32-bit float samples.
pub fn save_image(image: &DynamicImage, path: &Path) -> PipelineResult<()> {
    let format = ImageFormat::from_path(path).map_err(|_| PipelineError::UnsupportedFormat {
        path: path.to_path_buf(),
        format: extension_of(path),
    })?;

    let converted = match format {
        ImageFormat::Jpeg if needs_rgb8(image) => Some(DynamicImage::ImageRgb8(image.to_rgb8())),
        ImageFormat::OpenExr if needs_rgba32f(image) => {
            Some(DynamicImage::ImageRgba32F(image.to_rgba32f()))
        }
        _ => None,
    };
    let to_write = converted.as_ref().unwrap_or(image);

    to_write
        .save_with_format(path, format)
        .map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    tracing::trace!("Saved {:?} as {:?}", path, format);
    Ok(())
}

fn needs_rgb8(image: &DynamicImage) -> bool {
    !matches!(image, DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_))
}

fn needs_rgba32f(image: &DynamicImage) -> bool {
    !matches!(
        image,
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_)
    )
}
