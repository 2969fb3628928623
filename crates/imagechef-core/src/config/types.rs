//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Initial values for the numeric form fields.
///
/// These only seed the form; the values actually used are whatever the user
/// submits for a given action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    /// Palette size for dithering
    pub num_colors: u32,

    /// Block size for pixelation
    pub pixelate_factor: u32,

    /// Target width for resize
    pub width: u32,

    /// Target height for resize
    pub height: u32,

    /// Rotation in degrees, clockwise
    pub angle: f32,

    /// Gaussian blur sigma
    pub blur_radius: f32,

    /// MP4 frames per second
    pub fps: u32,

    /// GIF per-frame display time in milliseconds
    pub gif_duration_ms: f32,

    /// GIF loop count (0 loops forever)
    pub gif_loop: u16,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            num_colors: 256,
            pixelate_factor: 1,
            width: 512,
            height: 512,
            angle: 90.0,
            blur_radius: 0.0,
            fps: 24,
            gif_duration_ms: 5.0,
            gif_loop: 0,
        }
    }
}

/// Extension allow-lists, compared case-insensitively and without the dot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatsConfig {
    /// Files picked up by "Process Images"
    pub batch: Vec<String>,

    /// Files used as MP4 frames
    pub video: Vec<String>,

    /// Files used as GIF frames
    pub gif: Vec<String>,
}

impl Default for FormatsConfig {
    fn default() -> Self {
        let still = ["png", "jpg", "jpeg"];
        let with_hdr = ["png", "jpg", "jpeg", "tiff", "exr"];
        Self {
            batch: with_hdr.iter().map(|s| s.to_string()).collect(),
            video: still.iter().map(|s| s.to_string()).collect(),
            gif: with_hdr.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// MP4 encoding through an external ffmpeg process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// ffmpeg executable name or path (supports ~)
    pub ffmpeg: String,

    /// Video codec passed to `-c:v`
    pub codec: String,

    /// Output pixel format passed to `-pix_fmt`
    pub pixel_format: String,

    /// Fixed quantizer passed to `-q:v` (lower is better, 1-31)
    pub quality: u8,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            codec: "mpeg4".to_string(),
            pixel_format: "yuv420p".to_string(),
            quality: 5,
        }
    }
}

/// GIF encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GifConfig {
    /// NeuQuant sampling speed, 1 (best) to 30 (fastest)
    pub quantizer_speed: i32,
}

impl Default for GifConfig {
    fn default() -> Self {
        Self {
            quantizer_speed: 10,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
