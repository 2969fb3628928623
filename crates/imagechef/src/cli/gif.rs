//! The `imagechef gif` command: stitch a folder of frames into an animated GIF.

use clap::Args;
use imagechef_core::pipeline::{FileDiscovery, ImageDecoder};
use imagechef_core::sequence::load_frames;
use imagechef_core::{Config, GifEncoder, GifOptions};
use std::path::PathBuf;

/// Arguments for the `gif` command.
#[derive(Args, Debug)]
pub struct GifArgs {
    /// Folder of frames, taken in file name order
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file; `.gif` is appended if missing
    #[arg(short, long)]
    pub output: PathBuf,

    /// Display time of each frame in milliseconds [default: from config]
    #[arg(long, value_name = "MS")]
    pub duration: Option<f32>,

    /// Number of loops, 0 loops forever [default: from config]
    #[arg(long = "loop", value_name = "N")]
    pub loop_count: Option<u16>,
}

impl GifArgs {
    fn options(&self, config: &Config) -> anyhow::Result<GifOptions> {
        let delay_ms = self.duration.unwrap_or(config.defaults.gif_duration_ms);
        anyhow::ensure!(
            delay_ms.is_finite() && delay_ms >= 0.0,
            "--duration must be a non-negative number"
        );
        Ok(GifOptions {
            delay_ms,
            loop_count: self.loop_count.unwrap_or(config.defaults.gif_loop),
        })
    }
}

/// Execute the gif command.
pub fn execute(args: GifArgs, config: &Config) -> anyhow::Result<()> {
    let options = args.options(config)?;
    let discovery = FileDiscovery::new(&config.formats.gif);
    let frames = load_frames(&discovery, &ImageDecoder::new(), &args.input)?;

    match GifEncoder::new(&config.gif).encode(&frames, &args.output, &options)? {
        Some(path) => println!("Created GIF {}", path.display()),
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
        args: GifArgs,
    }

    #[test]
    fn test_defaults_come_from_config() {
        let parsed = Harness::try_parse_from(["gif", "./frames", "-o", "clip"]).unwrap();
        let options = parsed.args.options(&Config::default()).unwrap();
        assert_eq!(options.delay_ms, 5.0);
        assert_eq!(options.loop_count, 0);
    }

    #[test]
    fn test_loop_flag() {
        let parsed =
            Harness::try_parse_from(["gif", "./frames", "-o", "clip", "--loop", "3"]).unwrap();
        assert_eq!(parsed.args.loop_count, Some(3));
        assert!(Harness::try_parse_from(["gif", "./frames", "-o", "clip", "--loop", "-1"]).is_err());
    }

    #[test]
    fn test_execute_appends_extension() {
        let input = tempfile::tempdir().unwrap();
        for i in 0..2u8 {
            image::RgbImage::from_pixel(4, 4, image::Rgb([i * 100, 0, 0]))
                .save(input.path().join(format!("f{i}.png")))
                .unwrap();
        }
        let args = GifArgs {
            input: input.path().to_path_buf(),
            output: input.path().join("clip"),
            duration: Some(40.0),
            loop_count: None,
        };
        execute(args, &Config::default()).unwrap();
        assert!(input.path().join("clip.gif").exists());
    }
}
