//! ImageChef Core - batch image effects and frame sequence assembly.
//!
//! ImageChef applies a fixed chain of effects to every image in a folder and
//! can stitch a folder of frames into an MP4 or an animated GIF.
//!
//! # Architecture
//!
//! ```text
//! Folder → Discover → Decode → Dither → Pixelate → Resize → Rotate → Blur → Mirror → Save
//! Folder → Discover (sorted) → Decode → MP4 (ffmpeg) | GIF
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use imagechef_core::{Config, ImageProcessor, JobParams};
//! use std::path::Path;
//!
//! fn main() -> imagechef_core::Result<()> {
//!     let config = Config::load()?;
//!     let processor = ImageProcessor::new(&config);
//!
//!     let params = JobParams {
//!         pixelate: Some(4),
//!         mirror: true,
//!         ..Default::default()
//!     };
//!     let summary = processor.process_folder(Path::new("./frames"), None, &params)?;
//!     println!("Wrote {} image(s)", summary.files_written);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod pipeline;
pub mod sequence;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use controller::{handle, Action, AppState, Message, Outcome, Severity};
pub use error::{
    ChefError, ConfigError, EncodeError, EncodeResult, InputError, PipelineError, PipelineResult,
    Result,
};
pub use form::FormValues;
pub use pipeline::{apply_effects, FileDiscovery, FrameOrder, ImageDecoder, ImageProcessor};
pub use sequence::{GifEncoder, GifOptions, VideoEncoder};
pub use types::{BatchSummary, Dimensions, Effect, JobParams};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_state_uses_configured_defaults() {
        let state = AppState::new(Config::default());
        let form = state.default_form();
        assert_eq!(form.fps, "24");
        assert_eq!(form.width, "512");
    }
}
