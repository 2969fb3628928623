//! Core data types: job parameters, effects, and batch results.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Target size for the resize effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `512x512`.
impl FromStr for Dimensions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| format!("invalid width {w:?}"))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid height {h:?}"))?;
        if width == 0 || height == 0 {
            return Err("width and height must be at least 1".to_string());
        }
        Ok(Self { width, height })
    }
}

/// A single enabled effect with its argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Quantize to this many colors with Riemersma dithering
    Dither(u32),
    /// Mosaic with blocks of this many pixels
    Pixelate(u32),
    /// Scale to exact dimensions
    Resize(Dimensions),
    /// Rotate clockwise by degrees, expanding the canvas
    Rotate(f32),
    /// Gaussian blur with this sigma
    Blur(f32),
    /// Flip left-right
    Mirror,
}

impl Effect {
    /// Short lowercase name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Dither(_) => "dither",
            Effect::Pixelate(_) => "pixelate",
            Effect::Resize(_) => "resize",
            Effect::Rotate(_) => "rotate",
            Effect::Blur(_) => "blur",
            Effect::Mirror => "mirror",
        }
    }
}

/// Which effects a batch applies, and their arguments.
///
/// A `None` field means the effect is disabled; its argument only exists
/// while it is enabled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobParams {
    /// Palette size
    pub dither: Option<u32>,
    /// Block size
    pub pixelate: Option<u32>,
    /// Exact output size
    pub resize: Option<Dimensions>,
    /// Degrees, clockwise
    pub rotate: Option<f32>,
    /// Gaussian sigma
    pub blur: Option<f32>,
    pub mirror: bool,
}

impl JobParams {
    /// Enabled effects in pipeline order.
    ///
    /// The order is fixed: dither, pixelate, resize, rotate, blur, mirror.
    /// Reordering changes the output (e.g. resize before or after rotate).
    pub fn effects(&self) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(6);
        if let Some(colors) = self.dither {
            effects.push(Effect::Dither(colors));
        }
        if let Some(factor) = self.pixelate {
            effects.push(Effect::Pixelate(factor));
        }
        if let Some(dims) = self.resize {
            effects.push(Effect::Resize(dims));
        }
        if let Some(angle) = self.rotate {
            effects.push(Effect::Rotate(angle));
        }
        if let Some(radius) = self.blur {
            effects.push(Effect::Blur(radius));
        }
        if self.mirror {
            effects.push(Effect::Mirror);
        }
        effects
    }

    /// True when no effect is enabled (images are only re-encoded).
    pub fn is_empty(&self) -> bool {
        self.effects().is_empty()
    }
}

/// Result of one "Process Images" run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// At least one image had at least one effect applied
    pub effects_applied: bool,

    /// Number of output files written
    pub files_written: usize,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_follow_pipeline_order() {
        let params = JobParams {
            dither: Some(16),
            pixelate: Some(4),
            resize: Some(Dimensions::new(64, 32)),
            rotate: Some(45.0),
            blur: Some(1.5),
            mirror: true,
        };
        let names: Vec<_> = params.effects().iter().map(Effect::name).collect();
        assert_eq!(
            names,
            ["dither", "pixelate", "resize", "rotate", "blur", "mirror"]
        );
    }

    #[test]
    fn test_empty_params() {
        assert!(JobParams::default().is_empty());
        let params = JobParams {
            blur: Some(0.0),
            ..Default::default()
        };
        assert!(!params.is_empty());
    }

    #[test]
    fn test_dimensions_parse() {
        assert_eq!(
            "512x256".parse::<Dimensions>().unwrap(),
            Dimensions::new(512, 256)
        );
        assert_eq!(
            " 10 X 20 ".parse::<Dimensions>().unwrap(),
            Dimensions::new(10, 20)
        );
        assert!("512".parse::<Dimensions>().is_err());
        assert!("0x10".parse::<Dimensions>().is_err());
        assert!("axb".parse::<Dimensions>().is_err());
    }

    #[test]
    fn test_dimensions_display() {
        assert_eq!(Dimensions::new(640, 480).to_string(), "640x480");
    }
}
