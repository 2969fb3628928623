//! The `imagechef process` command: apply effects to a folder of images.

use clap::Args;
use imagechef_core::pipeline::FileDiscovery;
use imagechef_core::{BatchSummary, Config, Dimensions, ImageProcessor, JobParams};
use std::path::PathBuf;

/// Arguments for the `process` command.
///
/// Each effect is enabled by passing its flag; effects always run in the
/// order dither, pixelate, resize, rotate, blur, mirror.
#[derive(Args, Debug, Default)]
pub struct ProcessArgs {
    /// Folder of images to process
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output folder (defaults to overwriting the input files)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dither to this many colors
    #[arg(long, value_name = "COLORS", value_parser = clap::value_parser!(u32).range(1..))]
    pub dither: Option<u32>,

    /// Pixelate with blocks of this many pixels
    #[arg(long, value_name = "FACTOR", value_parser = clap::value_parser!(u32).range(1..))]
    pub pixelate: Option<u32>,

    /// Resize to exactly WIDTHxHEIGHT, ignoring aspect ratio
    #[arg(long, value_name = "WxH")]
    pub resize: Option<Dimensions>,

    /// Rotate clockwise by this many degrees, expanding the canvas
    #[arg(long, value_name = "DEGREES", allow_negative_numbers = true)]
    pub rotate: Option<f32>,

    /// Gaussian blur radius
    #[arg(long, value_name = "RADIUS")]
    pub blur: Option<f32>,

    /// Flip horizontally
    #[arg(long)]
    pub mirror: bool,
}

impl ProcessArgs {
    /// Effect parameters for this invocation.
    pub fn job_params(&self) -> anyhow::Result<JobParams> {
        if let Some(angle) = self.rotate {
            anyhow::ensure!(angle.is_finite(), "--rotate must be a finite number");
        }
        if let Some(radius) = self.blur {
            anyhow::ensure!(
                radius.is_finite() && radius >= 0.0,
                "--blur must be a non-negative number"
            );
        }
        Ok(JobParams {
            dither: self.dither,
            pixelate: self.pixelate,
            resize: self.resize,
            rotate: self.rotate,
            blur: self.blur,
            mirror: self.mirror,
        })
    }
}

/// Execute the process command.
pub fn execute(args: ProcessArgs, config: &Config) -> anyhow::Result<()> {
    let params = args.job_params()?;
    let processor = ImageProcessor::new(config);
    let plan = processor.plan(&args.input, args.output.as_deref())?;

    if plan.files.is_empty() {
        tracing::warn!("No supported image files found in {:?}", args.input);
        return Ok(());
    }
    let total_bytes = FileDiscovery::total_size(&plan.files);
    tracing::info!(
        "Found {} image(s) ({:.1} MB)",
        plan.files.len(),
        total_bytes as f64 / 1_000_000.0
    );
    if args.output.is_none() {
        tracing::warn!("No output folder given, overwriting images in {:?}", args.input);
    }
    if params.is_empty() {
        tracing::info!("No effects enabled, images will only be re-encoded");
    }

    let progress = create_progress_bar(plan.files.len() as u64)?;
    let result = processor.run(&plan, &params, |path| {
        if let Some(name) = path.file_name() {
            progress.set_message(name.to_string_lossy().into_owned());
        }
        progress.inc(1);
    });
    progress.finish_and_clear();

    let summary = result?;
    print_summary(&summary, total_bytes);
    Ok(())
}

/// Create a progress bar for batch processing.
pub(crate) fn create_progress_bar(total: u64) -> anyhow::Result<indicatif::ProgressBar> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )?
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    Ok(pb)
}

/// Print a formatted summary table after batch processing.
fn print_summary(summary: &BatchSummary, total_bytes: u64) {
    let secs = summary.elapsed.as_secs_f64();
    let rate = if secs > 0.0 {
        summary.files_written as f64 / secs
    } else {
        0.0
    };
    let throughput = if secs > 0.0 {
        total_bytes as f64 / 1_000_000.0 / secs
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Written:      {:>8}", summary.files_written);
    eprintln!(
        "    Effects:      {:>8}",
        if summary.effects_applied { "yes" } else { "none" }
    );
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", secs);
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("    Throughput:   {:>7.1} MB/sec", throughput);
    eprintln!("  ====================================");
    eprintln!(
        "  {}",
        if summary.effects_applied {
            "Processing Done"
        } else {
            "No Processing Done"
        }
    );
}
