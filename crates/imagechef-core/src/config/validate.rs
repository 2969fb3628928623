//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.fps == 0 {
            return Err(ConfigError::ValidationError(
                "defaults.fps must be > 0".into(),
            ));
        }
        if self.defaults.pixelate_factor == 0 {
            return Err(ConfigError::ValidationError(
                "defaults.pixelate_factor must be > 0".into(),
            ));
        }
        for (name, list) in [
            ("formats.batch", &self.formats.batch),
            ("formats.video", &self.formats.video),
            ("formats.gif", &self.formats.gif),
        ] {
            if list.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must list at least one extension"
                )));
            }
        }
        if self.video.ffmpeg.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "video.ffmpeg must not be empty".into(),
            ));
        }
        if !(1..=31).contains(&self.video.quality) {
            return Err(ConfigError::ValidationError(
                "video.quality must be between 1 and 31".into(),
            ));
        }
        if !(1..=30).contains(&self.gif.quantizer_speed) {
            return Err(ConfigError::ValidationError(
                "gif.quantizer_speed must be between 1 and 30".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_fps() {
        let mut config = Config::default();
        config.defaults.fps = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("defaults.fps"));
    }

    #[test]
    fn test_validate_rejects_empty_extension_list() {
        let mut config = Config::default();
        config.formats.video.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("formats.video"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_quality() {
        let mut config = Config::default();
        config.video.quality = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("video.quality"));
    }

    #[test]
    fn test_validate_rejects_blank_ffmpeg() {
        let mut config = Config::default();
        config.video.ffmpeg = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("video.ffmpeg"));
    }
}
