//! weatherlog: a full-screen terminal tracker for daily temperature
//! records, persisted to a local flat file.

mod app;
mod cli;
mod data;
mod ui;

use anyhow::Result;
use cli::{AppConfig, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let config = AppConfig::from_cli(cli);
    app::run(config)
}
