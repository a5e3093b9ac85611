//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Podcastr episode page server
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: podcastr.toml)
    #[arg(short = 'C', long, global = true, default_value = "podcastr.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Override the episode API base URL
    #[arg(short = 'A', long = "api-url", global = true, value_hint = clap::ValueHint::Url)]
    pub api_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve episode pages, regenerating them in the background
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Export the statically listed episodes to the output directory
    #[command(visible_alias = "b")]
    Build {
        /// Output directory path (relative to project root)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,
    },

    /// Fetch one episode and print its normalized form as JSON
    #[command(visible_alias = "f")]
    Fetch {
        /// Episode slug
        slug: String,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_fetch(&self) -> bool {
        matches!(self.command, Commands::Fetch { .. })
    }
}
