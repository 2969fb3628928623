//! MP4 output through an external `ffmpeg` process.
//!
//! Frames are streamed to ffmpeg's stdin as raw RGB24; ffmpeg does the
//! encoding and muxing.

use image::DynamicImage;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::common_frame_size;
use crate::config::{Config, VideoConfig};
use crate::error::{EncodeError, EncodeResult};

/// Encodes frame sequences as MP4 files.
#[derive(Debug, Clone)]
pub struct VideoEncoder {
    program: PathBuf,
    settings: VideoConfig,
}

impl VideoEncoder {
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.ffmpeg_path(),
            settings: config.video.clone(),
        }
    }

    /// Command-line arguments for a `width` x `height` stream at `fps`.
    pub fn ffmpeg_args(&self, width: u32, height: u32, fps: u32, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-y",
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        args.push("-s".into());
        args.push(format!("{width}x{height}").into());
        args.push("-r".into());
        args.push(fps.to_string().into());
        args.extend(["-i", "-", "-an"].iter().map(OsString::from));
        // yuv420p needs even dimensions
        args.push("-vf".into());
        args.push("pad=ceil(iw/2)*2:ceil(ih/2)*2".into());
        args.push("-c:v".into());
        args.push(self.settings.codec.clone().into());
        args.push("-q:v".into());
        args.push(self.settings.quality.to_string().into());
        args.push("-pix_fmt".into());
        args.push(self.settings.pixel_format.clone().into());
        args.push(output.as_os_str().to_os_string());
        args
    }

    /// Encode `frames` at `fps` into `output`.
    ///
    /// Returns the path written, or `None` when there are no frames, in which
    /// case ffmpeg is never started.
    pub fn encode(
        &self,
        frames: &[DynamicImage],
        output: &Path,
        fps: u32,
    ) -> EncodeResult<Option<PathBuf>> {
        let Some((width, height)) = common_frame_size(frames)? else {
            tracing::debug!("No frames, skipping MP4 {:?}", output);
            return Ok(None);
        };

        let args = self.ffmpeg_args(width, height, fps, output);
        tracing::debug!("Running {:?} {:?}", self.program, args);

        let spawn_error = |e: std::io::Error| EncodeError::Spawn {
            program: self.program.display().to_string(),
            source: e,
        };
        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // A write error means ffmpeg went away; its exit status and stderr
        // explain why, so keep going and report those instead.
        let mut write_failed = None;
        if let Some(mut stdin) = child.stdin.take() {
            for frame in frames {
                let rgb = frame.to_rgb8();
                if let Err(e) = stdin.write_all(rgb.as_raw()) {
                    write_failed = Some(e);
                    break;
                }
            }
        }

        let result = child.wait_with_output().map_err(spawn_error)?;
        if !result.status.success() {
            return Err(EncodeError::Ffmpeg {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        if let Some(e) = write_failed {
            return Err(EncodeError::Io {
                path: output.to_path_buf(),
                source: e,
            });
        }

        tracing::info!(
            "Wrote {} frame(s) at {} fps to {:?}",
            frames.len(),
            fps,
            output
        );
        Ok(Some(output.to_path_buf()))
    }
}
