use anyhow::Result;
use renderer::ViewerConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let mut config = ViewerConfig::default();
    if let Some(size) = cli.size {
        config.surface_size = size;
    }

    tracing::info!(
        width = config.surface_size.0,
        height = config.surface_size.1,
        "starting viewer"
    );
    renderer::run(&config)
}
