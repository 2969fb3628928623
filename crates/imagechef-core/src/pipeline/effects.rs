//! The effect pipeline: applies enabled effects to one image in fixed order.

use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageBuffer, Pixel, Rgba};
use imageproc::definitions::{Clamp, Image};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};

use super::dither::riemersma_dither;
use crate::types::{Dimensions, Effect, JobParams};

/// Apply every effect enabled in `params` to `image`.
///
/// Returns the transformed image and whether any effect fired. An enabled
/// effect counts even when it leaves the pixels unchanged.
pub fn apply_effects(image: DynamicImage, params: &JobParams) -> (DynamicImage, bool) {
    let mut image = image;
    let mut applied = false;
    for effect in params.effects() {
        image = apply_effect(image, effect);
        applied = true;
    }
    (image, applied)
}

/// Apply a single effect.
pub fn apply_effect(image: DynamicImage, effect: Effect) -> DynamicImage {
    tracing::trace!("Applying {} to {}x{}", effect.name(), image.width(), image.height());
    match effect {
        Effect::Dither(colors) => riemersma_dither(&image, colors),
        Effect::Pixelate(factor) => pixelate(&image, factor),
        Effect::Resize(dims) => resize(&image, dims),
        Effect::Rotate(angle) => rotate(&image, angle),
        Effect::Blur(radius) => blur(image, radius),
        Effect::Mirror => image.fliph(),
    }
}

/// Downscale by `factor` (integer division), then scale back up by `factor`.
///
/// The result is `(w / factor) * factor` wide, so it can be a few pixels
/// smaller than the input when `factor` does not divide the size. The factor
/// is capped at the shorter side, so the output is never larger than the input.
pub fn pixelate(image: &DynamicImage, factor: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let factor = factor.min(width.min(height)).max(1);
    let small_w = (width / factor).max(1);
    let small_h = (height / factor).max(1);

    let small = image.resize_exact(small_w, small_h, FilterType::Triangle);
    small.resize_exact(small_w * factor, small_h * factor, FilterType::Nearest)
}

/// Scale to exactly `dims`, ignoring aspect ratio.
pub fn resize(image: &DynamicImage, dims: Dimensions) -> DynamicImage {
    image.resize_exact(dims.width.max(1), dims.height.max(1), FilterType::Lanczos3)
}

/// Rotate clockwise by `degrees`, growing the canvas to fit the result.
///
/// Quarter turns are exact. Other angles are resampled bilinearly and the
/// uncovered corners are white, or transparent if the image has alpha. The
/// result keeps the input's color type.
pub fn rotate(image: &DynamicImage, degrees: f32) -> DynamicImage {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        return image.clone();
    }
    if normalized == 90.0 {
        return image.rotate90();
    }
    if normalized == 180.0 {
        return image.rotate180();
    }
    if normalized == 270.0 {
        return image.rotate270();
    }

    let had_alpha = image.color().has_alpha();
    let rotated = if is_high_precision(image.color()) {
        let background = if had_alpha {
            Rgba([0.0, 0.0, 0.0, 0.0])
        } else {
            Rgba([1.0, 1.0, 1.0, 1.0])
        };
        DynamicImage::ImageRgba32F(warp_rotated(&image.to_rgba32f(), normalized, background))
    } else {
        let background = if had_alpha {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([255, 255, 255, 255])
        };
        DynamicImage::ImageRgba8(warp_rotated(&image.to_rgba8(), normalized, background))
    };
    restore_color(rotated, image.color())
}

/// Rotate `source` clockwise about its centre onto a canvas just large enough
/// to hold it, filling uncovered pixels with `background`.
fn warp_rotated<P>(source: &Image<P>, degrees: f32, background: P) -> Image<P>
where
    P: Pixel + Send + Sync,
    P::Subpixel: Into<f32> + Clamp<f32> + Send + Sync,
{
    let (width, height) = source.dimensions();
    let (out_w, out_h) = rotated_bounds(width, height, degrees);

    // Move the source centre to the origin, rotate, then onto the new centre
    let projection = Projection::translate(out_w as f32 / 2.0, out_h as f32 / 2.0)
        * Projection::rotate(degrees.to_radians())
        * Projection::translate(-(width as f32) / 2.0, -(height as f32) / 2.0);

    let mut out = ImageBuffer::from_pixel(out_w, out_h, background);
    warp_into(
        source,
        &projection,
        Interpolation::Bilinear,
        background,
        &mut out,
    );
    out
}

/// 16-bit and float images are rotated in f32 so no precision is lost.
fn is_high_precision(color: ColorType) -> bool {
    color.bytes_per_pixel() > color.channel_count()
}

/// Convert a rotated RGBA buffer back to the caller's color type.
fn restore_color(image: DynamicImage, color: ColorType) -> DynamicImage {
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(image.to_rgb8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(image.to_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(image.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(image.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        _ => image,
    }
}

/// Size of the axis-aligned box holding a `width` x `height` image rotated by
/// `degrees`.
pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let theta = f64::from(degrees).to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (w, h) = (f64::from(width), f64::from(height));
    // Shave off float noise so 90-degree-ish results do not gain a pixel
    let out_w = (w * cos + h * sin - 1e-6).ceil().max(1.0);
    let out_h = (w * sin + h * cos - 1e-6).ceil().max(1.0);
    (out_w as u32, out_h as u32)
}

/// Gaussian blur with standard deviation `radius`. Zero leaves the image as is.
pub fn blur(image: DynamicImage, radius: f32) -> DynamicImage {
    if radius > 0.0 {
        image.blur(radius)
    } else {
        image
    }
}
