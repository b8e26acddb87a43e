//! Flyover CLI - Command-line interface
//!
//! Runs the tile proxy / track upload server and offers one-shot tile and
//! track commands for scripting.

mod commands;
mod error;
mod runner;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{fetch, serve, track};
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "flyover")]
#[command(version = flyover::VERSION)]
#[command(about = "Map tile cache/proxy and GPX track ingestion for 3D flyovers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Config file (default: ~/.flyover/config.ini)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listen address, e.g. 0.0.0.0:5000
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Tile cache directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Upstream fetch timeout in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,
    },

    /// Fetch one tile through the cache
    Fetch {
        /// Provider name, e.g. openstreetmap
        provider: String,

        /// Zoom level
        z: u32,

        /// Tile column
        x: u32,

        /// Tile row
        y: u32,

        /// Also write the tile to this file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Config file (default: ~/.flyover/config.ini)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Tile cache directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Upstream fetch timeout in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,
    },

    /// Parse a GPX file and print the track as JSON
    Track {
        /// GPX file to parse
        file: PathBuf,

        /// Print a human-readable summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), CliError> = match cli.command {
        Commands::Serve {
            config,
            bind,
            cache_dir,
            timeout,
        } => serve::run(serve::ServeArgs {
            config,
            bind,
            cache_dir,
            timeout,
        }),
        Commands::Fetch {
            provider,
            z,
            x,
            y,
            output,
            config,
            cache_dir,
            timeout,
        } => fetch::run(fetch::FetchArgs {
            config,
            provider,
            z,
            x,
            y,
            output,
            cache_dir,
            timeout,
        }),
        Commands::Track { file, summary } => track::run(track::TrackArgs { file, summary }),
    };

    if let Err(e) = result {
        e.exit();
    }
}
