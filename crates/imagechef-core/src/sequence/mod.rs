//! Frame sequence encoders: a folder of images in, one MP4 or GIF out.
//!
//! Frames are taken in lexicographic file order and must all share the
//! dimensions of the first frame.

pub mod gif;
pub mod video;

pub use self::gif::{normalize_gif_path, GifEncoder, GifOptions};
pub use self::video::VideoEncoder;

use image::DynamicImage;
use std::path::Path;

use crate::error::{EncodeError, EncodeResult, PipelineResult};
use crate::pipeline::{FileDiscovery, FrameOrder, ImageDecoder};

/// Decode every supported image in `folder`, in sorted order.
pub fn load_frames(
    discovery: &FileDiscovery,
    decoder: &ImageDecoder,
    folder: &Path,
) -> PipelineResult<Vec<DynamicImage>> {
    let paths = discovery.discover_paths(folder, FrameOrder::Sorted)?;
    tracing::debug!("Loading {} frame(s) from {:?}", paths.len(), folder);
    decoder.decode_all(&paths)
}

/// Dimensions shared by all frames, or the first frame that differs.
///
/// Returns `None` for an empty sequence.
pub fn common_frame_size(frames: &[DynamicImage]) -> EncodeResult<Option<(u32, u32)>> {
    let Some(first) = frames.first() else {
        return Ok(None);
    };
    let expected = (first.width(), first.height());
    for (index, frame) in frames.iter().enumerate().skip(1) {
        let found = (frame.width(), frame.height());
        if found != expected {
            return Err(EncodeError::FrameSizeMismatch {
                index,
                expected,
                found,
            });
        }
    }
    Ok(Some(expected))
}
