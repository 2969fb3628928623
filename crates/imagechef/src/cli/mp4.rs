//! The `imagechef mp4` command: stitch a folder of frames into a video.

use clap::Args;
use imagechef_core::pipeline::{FileDiscovery, ImageDecoder};
use imagechef_core::sequence::load_frames;
use imagechef_core::{Config, VideoEncoder};
use std::path::PathBuf;

/// Arguments for the `mp4` command.
#[derive(Args, Debug)]
pub struct Mp4Args {
    /// Folder of frames, taken in file name order
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output video file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Frames per second [default: from config, 24]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: Option<u32>,
}

/// Execute the mp4 command.
pub fn execute(args: Mp4Args, config: &Config) -> anyhow::Result<()> {
    let fps = args.fps.unwrap_or(config.defaults.fps);
    let discovery = FileDiscovery::new(&config.formats.video);
    let frames = load_frames(&discovery, &ImageDecoder::new(), &args.input)?;

    match VideoEncoder::new(config).encode(&frames, &args.output, fps)? {
        Some(path) => println!("Created MP4 {}", path.display()),
        None => tracing::warn!("No frames found in {:?}, nothing written", args.input),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        args: Mp4Args,
    }

    #[test]
    fn test_output_is_required() {
        assert!(Harness::try_parse_from(["mp4", "./frames"]).is_err());
    }

    #[test]
    fn test_fps_defaults_to_config() {
        let parsed = Harness::try_parse_from(["mp4", "./frames", "-o", "movie.mp4"]).unwrap();
        assert_eq!(parsed.args.fps, None);

        let parsed =
            Harness::try_parse_from(["mp4", "./frames", "-o", "movie.mp4", "--fps", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_folder_writes_nothing() {
        let input = tempfile::tempdir().unwrap();
        let output = input.path().join("movie.mp4");
        let args = Mp4Args {
            input: input.path().to_path_buf(),
            output: output.clone(),
            fps: Some(12),
        };
        execute(args, &Config::default()).unwrap();
        assert!(!output.exists());
    }
}
