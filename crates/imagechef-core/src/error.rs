//! Error types for ImageChef.
//!
//! Errors are split by where they originate: user input, configuration, the
//! per-image pipeline, and the frame sequence encoders. Each variant carries
//! enough context (field name, file path, frame index) to be shown to the
//! user as-is.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for ImageChef operations.
#[derive(Error, Debug)]
pub enum ChefError {
    /// A form value failed validation
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Per-image processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// MP4 / GIF assembly errors
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation failures for raw, user-entered form values.
///
/// These are always raised before any file is read or written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// A folder field is empty or does not name an existing directory
    #[error("{field}: invalid or non-existent folder {value:?}")]
    InvalidFolder { field: &'static str, value: String },

    /// A numeric field did not parse or is out of range
    #[error("{field}: {value:?} {reason}")]
    InvalidNumericInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// An output file path required by the action is empty
    #[error("{field}: output path is empty")]
    MissingOutputPath { field: &'static str },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while enumerating, decoding, transforming or saving images.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The folder to enumerate is missing or not a directory
    #[error("Invalid or non-existent folder: {0}")]
    InvalidFolder(PathBuf),

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Image encoding failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Output format could not be determined or is not supported
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Filesystem failure while reading a folder or writing a result
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while assembling a frame sequence into an MP4 or GIF.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// A frame does not match the dimensions of the first frame
    #[error("Frame {index} is {found:?}, expected {expected:?} like the first frame")]
    FrameSizeMismatch {
        index: usize,
        expected: (u32, u32),
        found: (u32, u32),
    },

    /// Frame dimensions exceed what the container can store
    #[error("Frame is {width}x{height}, larger than the {max}px limit")]
    FrameTooLarge { width: u32, height: u32, max: u32 },

    /// The ffmpeg executable could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// ffmpeg ran but reported failure
    #[error("ffmpeg exited with {status}: {stderr}")]
    Ffmpeg { status: String, stderr: String },

    /// The GIF encoder rejected a frame or the output
    #[error("GIF encoding failed: {0}")]
    Gif(String),

    /// Failed to create or write the output file
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for ImageChef results.
pub type Result<T> = std::result::Result<T, ChefError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Convenience type alias for sequence encoder results.
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
