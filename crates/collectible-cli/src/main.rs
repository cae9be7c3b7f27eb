use clap::Parser;
use collectible_core::config::{self, CollectibleConfig};
use collectible_core::{logging, Lifetime};

mod cli;
mod interrupt;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Parse first so --help and usage errors touch nothing on disk.
    let cli = Cli::parse();

    // Config before logging: it carries the default log filter.
    let loaded = config::load_or_init();
    let filter = loaded
        .as_ref()
        .map(|l| l.config.log_filter.clone())
        .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.to_string());
    if logging::init_logging(&filter).is_err() {
        logging::init_logging_stderr(&filter);
    }
    let cfg = match loaded {
        Ok(l) => {
            if l.created {
                tracing::info!("created default config at {}", l.path.display());
            }
            l.config
        }
        Err(e) => {
            tracing::warn!("config unavailable, using defaults: {}", e);
            CollectibleConfig::default()
        }
    };

    // The host owns the lifetime; Ctrl-C closes it.
    let lifetime = Lifetime::new();
    let on_signal = lifetime.clone();
    tokio::spawn(async move {
        if interrupt::watch(on_signal, tokio::signal::ctrl_c, interrupt::GRACE_PERIOD).await {
            std::process::exit(interrupt::INTERRUPTED_EXIT_CODE);
        }
    });

    let result = tokio::task::spawn_blocking(move || cli.command.run(&cfg, lifetime))
        .await
        .map_err(anyhow::Error::from)
        .and_then(|r| r);
    if let Err(err) = result {
        eprintln!("collectible error: {:#}", err);
        std::process::exit(1);
    }
}
