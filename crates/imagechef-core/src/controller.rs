//! Front-end controller: turns a form submission into work and user messages.
//!
//! Front ends (the interactive terminal form, tests) fill in a
//! [`FormValues`], pick an [`Action`] and render whatever [`Message`]s come
//! back. Nothing in here prints or prompts.

use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::error::ChefError;
use crate::form::{self, FormValues};
use crate::pipeline::{FileDiscovery, ImageDecoder, ImageProcessor};
use crate::sequence::{self, GifEncoder, VideoEncoder};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ProcessImages,
    CreateMp4,
    CreateGif,
    Exit,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::ProcessImages,
        Action::CreateMp4,
        Action::CreateGif,
        Action::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::ProcessImages => "Process Images",
            Action::CreateMp4 => "Create MP4",
            Action::CreateGif => "Create GIF",
            Action::Exit => "Exit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A notice for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

impl Message {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

/// Result of handling one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep the session going and show these messages.
    Continue(Vec<Message>),
    Exit,
}

impl Outcome {
    pub fn messages(&self) -> &[Message] {
        match self {
            Outcome::Continue(messages) => messages,
            Outcome::Exit => &[],
        }
    }
}

/// Long-lived collaborators shared by every action in a session.
pub struct AppState {
    config: Config,
    processor: ImageProcessor,
    decoder: ImageDecoder,
    video: VideoEncoder,
    video_frames: FileDiscovery,
    gif: GifEncoder,
    gif_frames: FileDiscovery,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            processor: ImageProcessor::new(&config),
            decoder: ImageDecoder::new(),
            video: VideoEncoder::new(&config),
            video_frames: FileDiscovery::new(&config.formats.video),
            gif: GifEncoder::new(&config.gif),
            gif_frames: FileDiscovery::new(&config.formats.gif),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A form pre-filled with the configured defaults.
    pub fn default_form(&self) -> FormValues {
        FormValues::with_defaults(&self.config.defaults)
    }
}

/// Handle one form submission.
///
/// Invalid input never touches the filesystem. Processing and encoding
/// failures are reported as error messages and the session continues.
pub fn handle(state: &AppState, action: Action, values: &FormValues) -> Outcome {
    tracing::debug!("Handling {}", action);
    let messages = match action {
        Action::Exit => return Outcome::Exit,
        Action::ProcessImages => process_images(state, values),
        Action::CreateMp4 => create_mp4(state, values),
        Action::CreateGif => create_gif(state, values),
    };
    Outcome::Continue(messages)
}

fn process_images(state: &AppState, values: &FormValues) -> Vec<Message> {
    let request = match form::parse_process(values) {
        Ok(request) => request,
        Err(e) => return vec![Message::error(format!("Invalid input: {e}"))],
    };

    let mut messages = Vec::new();
    if request.output.is_none() {
        messages.push(Message::warning(
            "No output folder specified, processed images will be saved in the input folder.",
        ));
    }

    match state
        .processor
        .process_folder(&request.input, request.output.as_deref(), &request.params)
    {
        Ok(summary) if summary.effects_applied => {
            messages.push(Message::info("Processing Done"));
        }
        Ok(_) => messages.push(Message::info("No Processing Done")),
        Err(e) => {
            tracing::error!("Batch failed: {}", e);
            messages.push(Message::error(ChefError::from(e).to_string()));
        }
    }
    messages
}

fn create_mp4(state: &AppState, values: &FormValues) -> Vec<Message> {
    let request = match form::parse_mp4(values) {
        Ok(request) => request,
        Err(e) => {
            return vec![Message::error(format!(
                "Invalid input for MP4 creation: {e}"
            ))]
        }
    };

    let result = load(state, &state.video_frames, &request.input).and_then(|frames| {
        state
            .video
            .encode(&frames, &request.output, request.fps)
            .map_err(ChefError::from)
    });
    report(result, "MP4", &request.input)
}

fn create_gif(state: &AppState, values: &FormValues) -> Vec<Message> {
    let request = match form::parse_gif(values) {
        Ok(request) => request,
        Err(e) => {
            return vec![Message::error(format!(
                "Invalid input for GIF creation: {e}"
            ))]
        }
    };

    let result = load(state, &state.gif_frames, &request.source).and_then(|frames| {
        state
            .gif
            .encode(&frames, &request.output, &request.options)
            .map_err(ChefError::from)
    });
    report(result, "GIF", &request.source)
}

fn load(
    state: &AppState,
    discovery: &FileDiscovery,
    folder: &Path,
) -> crate::error::Result<Vec<image::DynamicImage>> {
    Ok(sequence::load_frames(discovery, &state.decoder, folder)?)
}

fn report(
    result: crate::error::Result<Option<std::path::PathBuf>>,
    kind: &str,
    folder: &Path,
) -> Vec<Message> {
    match result {
        Ok(Some(path)) => vec![Message::info(format!("Created {kind} {}", path.display()))],
        Ok(None) => vec![Message::warning(format!(
            "No images found in {}, no {kind} written",
            folder.display()
        ))],
        Err(e) => {
            tracing::error!("{} creation failed: {}", kind, e);
            vec![Message::error(e.to_string())]
        }
    }
}
