//! Per-image pipeline components.
//!
//! - **discovery**: Find image files in a folder
//! - **decode**: Load and decode images
//! - **dither**: Median-cut palette and Riemersma dithering
//! - **effects**: Apply enabled effects in fixed order
//! - **save**: Write results with per-format pixel conversion
//! - **processor**: Orchestrates a whole folder

pub mod decode;
pub mod discovery;
pub mod dither;
pub mod effects;
pub mod processor;
pub mod save;

// Re-exports for convenient access
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{DiscoveredFile, FileDiscovery, FrameOrder};
pub use effects::apply_effects;
pub use processor::{BatchPlan, ImageProcessor};
pub use save::save_image;
