//! Raw form values and their conversion into typed requests.
//!
//! Every field arrives as text, exactly as typed. Nothing in here touches
//! the filesystem beyond checking that a folder exists, so a bad value is
//! always rejected before any image is read or written.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::FormDefaults;
use crate::error::InputError;
use crate::sequence::GifOptions;
use crate::types::{Dimensions, JobParams};

/// Everything the form holds, as entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub input_folder: String,
    pub output_folder: String,

    pub dither: bool,
    pub num_colors: String,
    pub pixelate: bool,
    pub pixelate_factor: String,
    pub resize: bool,
    pub width: String,
    pub height: String,
    pub rotate: bool,
    pub angle: String,
    pub blur: bool,
    pub blur_radius: String,
    pub mirror: bool,

    pub mp4_path: String,
    pub fps: String,

    pub gif_path: String,
    pub gif_duration: String,
    pub gif_loop: String,
}

impl FormValues {
    /// A blank form with numeric fields pre-filled from `defaults`.
    pub fn with_defaults(defaults: &FormDefaults) -> Self {
        Self {
            num_colors: defaults.num_colors.to_string(),
            pixelate_factor: defaults.pixelate_factor.to_string(),
            width: defaults.width.to_string(),
            height: defaults.height.to_string(),
            angle: defaults.angle.to_string(),
            blur_radius: defaults.blur_radius.to_string(),
            fps: defaults.fps.to_string(),
            gif_duration: defaults.gif_duration_ms.to_string(),
            gif_loop: defaults.gif_loop.to_string(),
            ..Default::default()
        }
    }
}

/// A validated "Process Images" request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRequest {
    pub input: PathBuf,
    /// `None` when the output field was left empty; results go to `input`.
    pub output: Option<PathBuf>,
    pub params: JobParams,
}

/// A validated "Create MP4" request.
#[derive(Debug, Clone, PartialEq)]
pub struct Mp4Request {
    pub input: PathBuf,
    pub output: PathBuf,
    pub fps: u32,
}

/// A validated "Create GIF" request.
#[derive(Debug, Clone, PartialEq)]
pub struct GifRequest {
    /// Folder the frames are read from
    pub source: PathBuf,
    pub output: PathBuf,
    pub options: GifOptions,
}

/// Parse the fields used by "Process Images".
///
/// All numeric fields are parsed whether or not their effect is ticked;
/// range checks only apply to ticked effects.
pub fn parse_process(form: &FormValues) -> Result<ProcessRequest, InputError> {
    let num_colors: u32 = parse_number("Dither colors", &form.num_colors)?;
    let pixelate_factor: u32 = parse_number("Pixelate factor", &form.pixelate_factor)?;
    let width: u32 = parse_number("Width", &form.width)?;
    let height: u32 = parse_number("Height", &form.height)?;
    let angle: f32 = parse_finite("Angle", &form.angle)?;
    let blur_radius: f32 = parse_finite("Blur radius", &form.blur_radius)?;

    let input = existing_folder("Input folder", &form.input_folder)?;
    let output = optional_path(&form.output_folder);

    let params = JobParams {
        dither: form
            .dither
            .then(|| at_least("Dither colors", &form.num_colors, num_colors, 1))
            .transpose()?,
        pixelate: form
            .pixelate
            .then(|| at_least("Pixelate factor", &form.pixelate_factor, pixelate_factor, 1))
            .transpose()?,
        resize: form
            .resize
            .then(|| -> Result<Dimensions, InputError> {
                let width = at_least("Width", &form.width, width, 1)?;
                let height = at_least("Height", &form.height, height, 1)?;
                Ok(Dimensions::new(width, height))
            })
            .transpose()?,
        rotate: form.rotate.then_some(angle),
        blur: form
            .blur
            .then(|| non_negative("Blur radius", &form.blur_radius, blur_radius))
            .transpose()?,
        mirror: form.mirror,
    };

    Ok(ProcessRequest {
        input,
        output,
        params,
    })
}

/// Parse the fields used by "Create MP4".
pub fn parse_mp4(form: &FormValues) -> Result<Mp4Request, InputError> {
    let fps: u32 = parse_number("FPS", &form.fps)?;
    let fps = at_least("FPS", &form.fps, fps, 1)?;
    let input = existing_folder("Input folder", &form.input_folder)?;
    let output = optional_path(&form.mp4_path).ok_or(InputError::MissingOutputPath {
        field: "MP4 output path",
    })?;
    Ok(Mp4Request { input, output, fps })
}

/// Parse the fields used by "Create GIF".
///
/// Frames come from the output folder, where processed images land. That
/// folder must be set and exist; the input folder is never used here.
pub fn parse_gif(form: &FormValues) -> Result<GifRequest, InputError> {
    let delay_ms: f32 = parse_finite("GIF duration", &form.gif_duration)?;
    let delay_ms = non_negative("GIF duration", &form.gif_duration, delay_ms)?;
    let loop_count: u16 = parse_number("GIF loop count", &form.gif_loop)?;

    let source = existing_folder("Output folder", &form.output_folder)?;
    let output = optional_path(&form.gif_path).ok_or(InputError::MissingOutputPath {
        field: "GIF output path",
    })?;

    Ok(GifRequest {
        source,
        output,
        options: GifOptions {
            delay_ms,
            loop_count,
        },
    })
}

/// Expand `~` and trim; `None` for a blank field.
pub fn optional_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(shellexpand::tilde(trimmed).into_owned()))
    }
}

/// Require a non-empty field naming an existing directory.
pub fn existing_folder(field: &'static str, raw: &str) -> Result<PathBuf, InputError> {
    match optional_path(raw) {
        Some(path) if Path::new(&path).is_dir() => Ok(path),
        _ => Err(InputError::InvalidFolder {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, InputError> {
    parse_as(field, raw, "is not a valid whole number")
}

fn parse_as<T: FromStr>(field: &'static str, raw: &str, reason: &str) -> Result<T, InputError> {
    raw.trim()
        .parse()
        .map_err(|_| InputError::InvalidNumericInput {
            field,
            value: raw.to_string(),
            reason: reason.to_string(),
        })
}

fn parse_finite(field: &'static str, raw: &str) -> Result<f32, InputError> {
    let value: f32 = parse_as(field, raw, "is not a valid number")?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::InvalidNumericInput {
            field,
            value: raw.to_string(),
            reason: "must be a finite number".to_string(),
        })
    }
}

fn at_least(field: &'static str, raw: &str, value: u32, min: u32) -> Result<u32, InputError> {
    if value >= min {
        Ok(value)
    } else {
        Err(InputError::InvalidNumericInput {
            field,
            value: raw.to_string(),
            reason: format!("must be at least {min}"),
        })
    }
}

fn non_negative(field: &'static str, raw: &str, value: f32) -> Result<f32, InputError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(InputError::InvalidNumericInput {
            field,
            value: raw.to_string(),
            reason: "must not be negative".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_in(dir: &Path) -> FormValues {
        FormValues {
            input_folder: dir.to_string_lossy().into_owned(),
            ..FormValues::with_defaults(&FormDefaults::default())
        }
    }

    #[test]
    fn test_defaults_prefill_numeric_fields() {
        let form = FormValues::with_defaults(&FormDefaults::default());
        assert_eq!(form.num_colors, "256");
        assert_eq!(form.pixelate_factor, "1");
        assert_eq!(form.width, "512");
        assert_eq!(form.angle, "90");
        assert_eq!(form.fps, "24");
        assert_eq!(form.gif_loop, "0");
        assert!(!form.dither && !form.mirror);
    }

    #[test]
    fn test_parse_process_builds_params() {
        let dir = tempfile::tempdir().unwrap();
        let form = FormValues {
            dither: true,
            num_colors: "16".into(),
            resize: true,
            width: "64".into(),
            height: " 32 ".into(),
            mirror: true,
            ..form_in(dir.path())
        };

        let request = parse_process(&form).unwrap();
        assert_eq!(request.input, dir.path());
        assert_eq!(request.output, None);
        assert_eq!(request.params.dither, Some(16));
        assert_eq!(request.params.resize, Some(Dimensions::new(64, 32)));
        assert_eq!(request.params.pixelate, None);
        assert_eq!(request.params.rotate, None);
        assert!(request.params.mirror);
    }

    #[test]
    fn test_unticked_fields_are_still_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let form = FormValues {
            pixelate: false,
            pixelate_factor: "abc".into(),
            ..form_in(dir.path())
        };

        let err = parse_process(&form).unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidNumericInput { field: "Pixelate factor", .. }
        ));
    }

    #[test]
    fn test_numbers_checked_before_folder() {
        let form = FormValues {
            input_folder: String::new(),
            angle: "ninety".into(),
            ..FormValues::with_defaults(&FormDefaults::default())
        };
        let err = parse_process(&form).unwrap_err();
        assert!(matches!(err, InputError::InvalidNumericInput { field: "Angle", .. }));
    }

    #[test]
    fn test_missing_input_folder() {
        let form = FormValues::with_defaults(&FormDefaults::default());
        let err = parse_process(&form).unwrap_err();
        assert!(matches!(err, InputError::InvalidFolder { field: "Input folder", .. }));

        let form = FormValues {
            input_folder: "/definitely/not/here".into(),
            ..form
        };
        assert!(parse_process(&form).is_err());
    }

    #[test]
    fn test_range_checks_only_for_ticked_effects() {
        let dir = tempfile::tempdir().unwrap();
        let form = FormValues {
            pixelate_factor: "0".into(),
            ..form_in(dir.path())
        };
        assert!(parse_process(&form).is_ok());

        let form = FormValues {
            pixelate: true,
            ..form
        };
        let err = parse_process(&form).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_negative_blur_rejected_when_ticked() {
        let dir = tempfile::tempdir().unwrap();
        let form = FormValues {
            blur: true,
            blur_radius: "-2".into(),
            ..form_in(dir.path())
        };
        let err = parse_process(&form).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let form = FormValues {
            angle: "inf".into(),
            ..form_in(dir.path())
        };
        assert!(parse_process(&form).is_err());
    }

    #[test]
    fn test_parse_mp4() {
        let dir = tempfile::tempdir().unwrap();
        let form = FormValues {
            mp4_path: "movie.mp4".into(),
            fps: "30".into(),
            ..form_in(dir.path())
        };
        let request = parse_mp4(&form).unwrap();
        assert_eq!(request.fps, 30);
        assert_eq!(request.output, PathBuf::from("movie.mp4"));
    }

    #[test]
    fn test_parse_mp4_requires_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_mp4(&form_in(dir.path())).unwrap_err();
        assert_eq!(
            err,
            InputError::MissingOutputPath {
                field: "MP4 output path"
            }
        );
    }

    #[test]
    fn test_parse_mp4_rejects_zero_and_fractional_fps() {
        let dir = tempfile::tempdir().unwrap();
        for fps in ["0", "23.976", ""] {
            let form = FormValues {
                mp4_path: "movie.mp4".into(),
                fps: fps.into(),
                ..form_in(dir.path())
            };
            assert!(
                matches!(parse_mp4(&form), Err(InputError::InvalidNumericInput { .. })),
                "fps {fps:?}"
            );
        }
    }

    #[test]
    fn test_parse_gif_reads_from_output_folder() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let form = FormValues {
            output_folder: output.path().to_string_lossy().into_owned(),
            gif_path: "clip".into(),
            gif_duration: "40".into(),
            gif_loop: "2".into(),
            ..form_in(input.path())
        };

        let request = parse_gif(&form).unwrap();
        assert_eq!(request.source, output.path());
        assert_eq!(request.options.delay_ms, 40.0);
        assert_eq!(request.options.loop_count, 2);
    }

    #[test]
    fn test_parse_gif_requires_output_folder() {
        // A valid input folder does not stand in for a missing output folder
        let input = tempfile::tempdir().unwrap();
        let form = FormValues {
            gif_path: "clip.gif".into(),
            ..form_in(input.path())
        };
        let err = parse_gif(&form).unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidFolder { field: "Output folder", .. }
        ));

        let form = FormValues {
            output_folder: input.path().join("missing").to_string_lossy().into_owned(),
            ..form
        };
        assert!(matches!(
            parse_gif(&form).unwrap_err(),
            InputError::InvalidFolder { field: "Output folder", .. }
        ));
    }

    #[test]
    fn test_parse_gif_rejects_bad_loop() {
        let input = tempfile::tempdir().unwrap();
        let form = FormValues {
            gif_path: "clip.gif".into(),
            gif_loop: "-1".into(),
            ..form_in(input.path())
        };
        let err = parse_gif(&form).unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidNumericInput { field: "GIF loop count", .. }
        ));
    }

    #[test]
    fn test_optional_path() {
        assert_eq!(optional_path("   "), None);
        assert_eq!(optional_path(" out "), Some(PathBuf::from("out")));
    }

    #[test]
    fn test_optional_path_expands_tilde() {
        let expanded = optional_path("~/frames").unwrap();
        if let Some(home) = std::env::var_os("HOME") {
            assert_eq!(expanded, Path::new(&home).join("frames"));
        }
    }
}
