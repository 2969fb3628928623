//! Batch orchestration: enumerate, decode, apply effects, save.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{BatchSummary, JobParams};

use super::decode::ImageDecoder;
use super::discovery::{DiscoveredFile, FileDiscovery, FrameOrder};
use super::effects::apply_effects;
use super::save::save_image;

/// The files a batch will touch and where results go.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    /// Input files in directory order
    pub files: Vec<DiscoveredFile>,
    /// Folder receiving the results
    pub output_dir: PathBuf,
}

impl BatchPlan {
    /// Output path for an input file: same base name, in the output folder.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        match input.file_name() {
            Some(name) => self.output_dir.join(name),
            None => self.output_dir.join(input),
        }
    }
}

/// Applies a set of effects to every supported image in a folder.
pub struct ImageProcessor {
    decoder: ImageDecoder,
    discovery: FileDiscovery,
}

impl ImageProcessor {
    /// Create a processor that accepts the batch extension list from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            decoder: ImageDecoder::new(),
            discovery: FileDiscovery::new(&config.formats.batch),
        }
    }

    /// Enumerate `input` and resolve the output folder.
    ///
    /// With no output folder the results overwrite the inputs in place.
    pub fn plan(&self, input: &Path, output: Option<&Path>) -> PipelineResult<BatchPlan> {
        let files = self.discovery.discover(input, FrameOrder::Directory)?;
        let output_dir = output.unwrap_or(input).to_path_buf();
        Ok(BatchPlan { files, output_dir })
    }

    /// Decode one file, apply `params`, and write it to `output`.
    ///
    /// Returns whether any effect was applied.
    pub fn process_file(
        &self,
        input: &Path,
        output: &Path,
        params: &JobParams,
    ) -> PipelineResult<bool> {
        let start = Instant::now();
        let decoded = self.decoder.decode(input)?;
        let (image, applied) = apply_effects(decoded.image, params);
        save_image(&image, output)?;
        tracing::debug!(
            "Processed {:?} -> {:?} ({}x{} -> {}x{}) in {:?}",
            input,
            output,
            decoded.width,
            decoded.height,
            image.width(),
            image.height(),
            start.elapsed()
        );
        Ok(applied)
    }

    /// Run a planned batch, calling `on_file` after each file is written.
    ///
    /// Files are processed sequentially and the first failure aborts the
    /// batch. Every matched file is written, even when `params` enables no
    /// effect.
    pub fn run(
        &self,
        plan: &BatchPlan,
        params: &JobParams,
        mut on_file: impl FnMut(&Path),
    ) -> PipelineResult<BatchSummary> {
        let start = Instant::now();
        if !plan.files.is_empty() {
            std::fs::create_dir_all(&plan.output_dir).map_err(|e| PipelineError::Io {
                path: plan.output_dir.clone(),
                source: e,
            })?;
        }

        let mut summary = BatchSummary::default();
        for file in &plan.files {
            let output = plan.output_path(&file.path);
            let applied = self.process_file(&file.path, &output, params)?;
            summary.effects_applied |= applied;
            summary.files_written += 1;
            on_file(&file.path);
        }
        summary.elapsed = start.elapsed();

        tracing::info!(
            "Wrote {} image(s) to {:?} in {:.2}s",
            summary.files_written,
            plan.output_dir,
            summary.elapsed.as_secs_f64()
        );
        Ok(summary)
    }

    /// Plan and run in one step.
    pub fn process_folder(
        &self,
        input: &Path,
        output: Option<&Path>,
        params: &JobParams,
    ) -> PipelineResult<BatchSummary> {
        let plan = self.plan(input, output)?;
        self.run(&plan, params, |_| {})
    }
}
