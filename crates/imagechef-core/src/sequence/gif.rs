//! Animated GIF output.

use ::gif::{Encoder, Frame, Repeat};
use image::DynamicImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::common_frame_size;
use crate::config::GifConfig;
use crate::error::{EncodeError, EncodeResult};

/// Per-call GIF settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GifOptions {
    /// Display time of each frame in milliseconds
    pub delay_ms: f32,
    /// Number of loops; 0 loops forever
    pub loop_count: u16,
}

impl GifOptions {
    /// Frame delay in the GIF's native unit (hundredths of a second).
    pub fn delay_centis(&self) -> u16 {
        (self.delay_ms / 10.0).round().clamp(0.0, f32::from(u16::MAX)) as u16
    }

    fn repeat(&self) -> Repeat {
        match self.loop_count {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        }
    }
}

/// Append `.gif` unless the path already ends with it (any case).
pub fn normalize_gif_path(path: &Path) -> PathBuf {
    let has_gif_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"));
    if has_gif_ext {
        path.to_path_buf()
    } else {
        let mut raw = path.as_os_str().to_os_string();
        raw.push(".gif");
        PathBuf::from(raw)
    }
}

/// Encodes frame sequences as looping GIFs.
#[derive(Debug, Clone)]
pub struct GifEncoder {
    quantizer_speed: i32,
}

impl GifEncoder {
    pub fn new(config: &GifConfig) -> Self {
        Self {
            quantizer_speed: config.quantizer_speed.clamp(1, 30),
        }
    }

    /// Write `frames` to `output` (normalised to end in `.gif`).
    ///
    /// Returns the path written, or `None` when there are no frames, in which
    /// case nothing is created. A file left half-written by a failed encode
    /// is removed.
    pub fn encode(
        &self,
        frames: &[DynamicImage],
        output: &Path,
        options: &GifOptions,
    ) -> EncodeResult<Option<PathBuf>> {
        self.encode_with(frames, output, options, |path| {
            File::create(path).map(BufWriter::new)
        })
    }

    fn encode_with<W, F>(
        &self,
        frames: &[DynamicImage],
        output: &Path,
        options: &GifOptions,
        create: F,
    ) -> EncodeResult<Option<PathBuf>>
    where
        W: Write,
        F: FnOnce(&Path) -> std::io::Result<W>,
    {
        let Some((width, height)) = common_frame_size(frames)? else {
            tracing::debug!("No frames, skipping GIF {:?}", output);
            return Ok(None);
        };
        let max = u32::from(u16::MAX);
        if width > max || height > max {
            return Err(EncodeError::FrameTooLarge { width, height, max });
        }

        let path = normalize_gif_path(output);
        tracing::debug!(
            "Encoding {} frame(s) to {:?} (delay={}cs, loop={})",
            frames.len(),
            path,
            options.delay_centis(),
            options.loop_count
        );

        let writer = create(&path).map_err(|e| EncodeError::Io {
            path: path.clone(),
            source: e,
        })?;
        let size = (width as u16, height as u16);
        if let Err(e) = self.write_frames(writer, frames, size, options, &path) {
            if let Err(remove_err) = std::fs::remove_file(&path) {
                tracing::warn!("Could not remove partial GIF {:?}: {}", path, remove_err);
            }
            return Err(e);
        }

        tracing::info!("Wrote {} frame(s) to {:?}", frames.len(), path);
        Ok(Some(path))
    }

    fn write_frames<W: Write>(
        &self,
        writer: W,
        frames: &[DynamicImage],
        (width, height): (u16, u16),
        options: &GifOptions,
        path: &Path,
    ) -> EncodeResult<()> {
        let mut encoder = Encoder::new(writer, width, height, &[])
            .map_err(|e| EncodeError::Gif(format!("Failed to create GIF encoder: {e}")))?;
        encoder
            .set_repeat(options.repeat())
            .map_err(|e| EncodeError::Gif(format!("Failed to set GIF repeat: {e}")))?;

        for image in frames {
            let mut pixels = image.to_rgba8().into_raw();
            let mut frame =
                Frame::from_rgba_speed(width, height, &mut pixels, self.quantizer_speed);
            frame.delay = options.delay_centis();
            encoder
                .write_frame(&frame)
                .map_err(|e| EncodeError::Gif(format!("Failed to write GIF frame: {e}")))?;
        }

        let mut writer = encoder
            .into_inner()
            .map_err(|e| EncodeError::Gif(format!("Failed to finish GIF: {e}")))?;
        writer.flush().map_err(|e| EncodeError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
