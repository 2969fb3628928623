//! The `imagechef config` command: inspect, check and create the settings
//! file that seeds form defaults, extension lists, ffmpeg and GIF options.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use imagechef_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// List the file extensions each action picks up
    Formats,

    /// Print the config file path
    Path,

    /// Load and validate a config file without running anything
    Check {
        /// File to check (defaults to the standard config path)
        file: Option<PathBuf>,
    },

    /// Write a config file with the built-in defaults
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Formats => {
            let config = Config::load()?;
            for line in format_lines(&config) {
                println!("{line}");
            }
        }

        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }

        ConfigCommand::Check { file } => {
            let path = file.unwrap_or_else(Config::default_path);
            let config = check(&path)?;
            println!("{} is valid", path.display());
            println!("ffmpeg: {}", config.ffmpeg_path().display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();
            init_at(&path, force)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// One line per action with the extensions it accepts.
fn format_lines(config: &Config) -> Vec<String> {
    [
        ("Process Images", &config.formats.batch),
        ("Create MP4", &config.formats.video),
        ("Create GIF", &config.formats.gif),
    ]
    .into_iter()
    .map(|(action, exts)| format!("{:<16}{}", format!("{action}:"), exts.join(", ")))
    .collect()
}

fn check(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        anyhow::bail!(
            "No config file at: {}\nRun `imagechef config init` to create one.",
            path.display()
        );
    }
    Ok(Config::load_from(path)?)
}

/// Write the default config to `path`, refusing to replace a file unless
/// `force` is set.
fn init_at(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, Config::default().to_toml()?)?;

    tracing::info!("Config file created at: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(subcommand)]
        command: ConfigCommand,
    }

    #[test]
    fn test_parse_init_force() {
        let parsed = Harness::try_parse_from(["config", "init", "--force"]).unwrap();
        assert!(matches!(
            parsed.command,
            ConfigCommand::Init { force: true }
        ));
    }

    #[test]
    fn test_parse_check_with_file() {
        let parsed = Harness::try_parse_from(["config", "check", "my.toml"]).unwrap();
        match parsed.command {
            ConfigCommand::Check { file } => assert_eq!(file, Some(PathBuf::from("my.toml"))),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_format_lines_follow_config() {
        let mut config = Config::default();
        config.formats.gif = vec!["png".into(), "webp".into()];

        let lines = format_lines(&config);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Process Images:"));
        assert!(lines[0].contains("exr"));
        assert!(lines[1].starts_with("Create MP4:"));
        assert!(!lines[1].contains("tiff"));
        assert!(lines[2].ends_with("png, webp"));
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_at(&path, false).unwrap();
        let loaded = check(&path).unwrap();
        assert_eq!(loaded.defaults.fps, 24);
        assert_eq!(loaded.video.codec, "mpeg4");
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nfps = 5\n").unwrap();

        let err = init_at(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert!(std::fs::read_to_string(&path).unwrap().contains("fps = 5"));

        init_at(&path, true).unwrap();
        assert_eq!(check(&path).unwrap().defaults.fps, 24);
    }

    #[test]
    fn test_check_reports_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[video]\nquality = 99\n").unwrap();

        let err = check(&path).unwrap_err();
        assert!(format!("{err:#}").contains("video.quality"));
    }

    #[test]
    fn test_check_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = check(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("config init"));
    }
}
