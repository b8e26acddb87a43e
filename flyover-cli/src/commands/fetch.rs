//! Fetch command - retrieve one tile through the disk cache.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use flyover::provider::TileFetcher;
use flyover::tile::{TileError, TileKey, TileProxy, TileResponse};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
pub struct FetchArgs {
    pub config: Option<PathBuf>,
    pub provider: String,
    pub z: u32,
    pub x: u32,
    pub y: u32,
    pub output: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub timeout: Option<u64>,
}

/// Outcome of one fetch, for reporting.
struct FetchReport {
    tile: TileResponse,
    /// The entry existed before the request.
    was_cached: bool,
    /// Entry path, if one exists after the request.
    cached_at: Option<PathBuf>,
    elapsed: Duration,
}

/// Run the fetch command.
pub fn run(args: FetchArgs) -> Result<(), CliError> {
    let mut runner = CliRunner::new(args.config.as_deref())?;
    runner.log_startup("fetch");

    let config = runner.config_mut();
    if let Some(ref dir) = args.cache_dir {
        config.cache.directory = dir.clone();
    }
    if let Some(timeout) = args.timeout {
        config.download.timeout = timeout;
    }

    let proxy = TileProxy::from_config(runner.config()).map_err(CliError::Client)?;
    println!(
        "Fetching tile {}/{}/{}/{}",
        args.provider, args.z, args.x, args.y
    );

    let report = runner.block_on(fetch_tile(&proxy, &args.provider, args.z, args.x, args.y))?;

    if report.was_cached {
        println!("  Already in cache");
    }
    println!(
        "  Source:  {} ({})",
        report.tile.source,
        format_elapsed(report.elapsed)
    );
    println!("  Size:    {} bytes", report.tile.data.len());
    match report.cached_at {
        Some(ref path) => println!("  Cached:  {}", path.display()),
        None => println!("  Cached:  no"),
    }

    if let Some(ref output) = args.output {
        std::fs::write(output, &report.tile.data).map_err(|e| CliError::FileWrite {
            path: output.display().to_string(),
            error: e,
        })?;
        println!("  Saved:   {}", output.display());
    }

    Ok(())
}

/// Fetch through the proxy, noting cache state before and after.
///
/// The provider is resolved first so an unknown name never reaches the disk.
async fn fetch_tile<F: TileFetcher>(
    proxy: &TileProxy<F>,
    provider: &str,
    z: u32,
    x: u32,
    y: u32,
) -> Result<FetchReport, CliError> {
    if !proxy.registry().contains(provider) {
        return Err(TileError::UnknownProvider(provider.to_string()).into());
    }
    let key = TileKey::new(provider, z, x, y);
    let was_cached = proxy.cache().contains(&key).await;

    let start = Instant::now();
    let tile = proxy.fetch_tile(provider, z, x, y).await?;
    let elapsed = start.elapsed();

    let cached_at = if proxy.cache().contains(&key).await {
        Some(proxy.cache().path_for(&key))
    } else {
        None
    };

    Ok(FetchReport {
        tile,
        was_cached,
        cached_at,
        elapsed,
    })
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_secs() >= 1 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}
