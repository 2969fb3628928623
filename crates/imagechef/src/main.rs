//! ImageChef CLI - batch image effects, MP4 and GIF assembly.
//!
//! Run with no subcommand for the interactive form, or use the subcommands
//! directly from scripts.
//!
//! # Usage
//!
//! ```bash
//! # Interactive form
//! imagechef
//!
//! # Pixelate and mirror a folder into ./out
//! imagechef process ./frames -o ./out --pixelate 4 --mirror
//!
//! # Stitch frames into a video or a GIF
//! imagechef mp4 ./out -o movie.mp4 --fps 30
//! imagechef gif ./out -o clip --duration 80
//!
//! # View configuration
//! imagechef config show
//! ```

use std::io::IsTerminal;

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// ImageChef - batch image effects, MP4 and GIF assembly.
#[derive(Parser, Debug)]
#[command(name = "imagechef")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply effects to every image in a folder
    Process(cli::process::ProcessArgs),

    /// Assemble a folder of frames into an MP4
    Mp4(cli::mp4::Mp4Args),

    /// Assemble a folder of frames into an animated GIF
    Gif(cli::gif::GifArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match imagechef_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `imagechef config path`."
            );
            imagechef_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("ImageChef v{}", imagechef_core::VERSION);

    match cli.command {
        Some(Commands::Process(args)) => cli::process::execute(args, &config),
        Some(Commands::Mp4(args)) => cli::mp4::execute(args, &config),
        Some(Commands::Gif(args)) => cli::gif::execute(args, &config),
        Some(Commands::Config(args)) => cli::config::execute(args),
        None if std::io::stdin().is_terminal() => cli::interactive::run(config),
        None => {
            anyhow::bail!("No command given and stdin is not a terminal. See `imagechef --help`.")
        }
    }
}
