//! Command-line interface argument parsing for weatherlog.

use std::path::PathBuf;

use clap::Parser;

/// A full-screen terminal tracker for daily temperature records.
#[derive(Parser, Debug)]
#[command(name = "weatherlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the record file.
    /// Defaults to $WEATHERLOG_FILE, then the platform data directory.
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Disable startup and value animations (and their pauses)
    #[arg(long)]
    pub no_anim: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub animate: bool,
}

impl AppConfig {
    /// Build the runtime configuration from parsed arguments.
    pub fn from_cli(cli: Cli) -> Self {
        let data_file = cli.data_file.unwrap_or_else(default_data_file);
        AppConfig {
            data_file,
            animate: !cli.no_anim,
        }
    }
}

/// Record file fallback: `$WEATHERLOG_FILE` if set, otherwise
/// `<data dir>/weatherlog/weather_data.txt`, otherwise the current
/// directory.
fn default_data_file() -> PathBuf {
    if let Ok(path) = std::env::var("WEATHERLOG_FILE") {
        return PathBuf::from(path);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weatherlog")
        .join("weather_data.txt")
}
