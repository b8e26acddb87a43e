//! Serve command - run the tile proxy and upload endpoint.

use std::net::SocketAddr;
use std::path::PathBuf;

use flyover::config::{format_size, ConfigFile};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the serve command.
pub struct ServeArgs {
    pub config: Option<PathBuf>,
    pub bind: Option<SocketAddr>,
    pub cache_dir: Option<PathBuf>,
    pub timeout: Option<u64>,
}

/// Run the serve command.
pub fn run(args: ServeArgs) -> Result<(), CliError> {
    let mut runner = CliRunner::new(args.config.as_deref())?;
    runner.log_startup("serve");
    apply_overrides(runner.config_mut(), &args);

    let config = runner.config();
    println!("Flyover v{}", flyover::VERSION);
    for line in startup_summary(config) {
        println!("  {}", line);
    }
    println!();
    println!("Press Ctrl+C to stop.");

    runner.block_on(flyover::server::run(config))?;
    Ok(())
}

/// CLI flags take precedence over config.ini.
fn apply_overrides(config: &mut ConfigFile, args: &ServeArgs) {
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(ref dir) = args.cache_dir {
        config.cache.directory = dir.clone();
    }
    if let Some(timeout) = args.timeout {
        config.download.timeout = timeout;
    }
}

fn startup_summary(config: &ConfigFile) -> Vec<String> {
    vec![
        format!("Listening on: http://{}", config.server.bind),
        format!("Tile cache:   {}", config.cache.directory.display()),
        format!("Upload limit: {}", format_size(config.server.max_upload_size)),
        format!("Providers:    {}", provider_list(config)),
    ]
}

fn provider_list(config: &ConfigFile) -> String {
    config
        .provider_registry()
        .names()
        .collect::<Vec<_>>()
        .join(", ")
}
