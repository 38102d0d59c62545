use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// stderrへのログ出力を初期化（`RUST_LOG` が優先）
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))
}
