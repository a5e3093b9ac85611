//! Podcastr - podcast episode pages fetched from a JSON API, normalized,
//! cached and rendered with stale-while-revalidate regeneration.

mod api;
mod cli;
mod config;
mod core;
mod episode;
mod logger;
mod page;
mod render;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(SiteConfig::load(cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(&config),
        Commands::Build { .. } => cli::build::build_site(&config),
        Commands::Fetch { slug, pretty } => cli::fetch::fetch_episode(&config, slug, *pretty),
    }
}
