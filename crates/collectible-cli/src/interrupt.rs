//! Ctrl-C handling for the host.
//!
//! The first interrupt cancels the app lifetime so commands that check it can
//! stop on their own. A second interrupt, or the grace period running out,
//! tells the caller to exit.

use collectible_core::Lifetime;
use std::future::Future;
use std::io;
use std::time::Duration;

pub const GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Exit status of a process ended by SIGINT.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Returns `true` when the process should exit, `false` if interrupts cannot be received.
pub async fn watch<F, Fut>(lifetime: Lifetime, mut next_interrupt: F, grace: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    if let Err(e) = next_interrupt().await {
        tracing::warn!("cannot listen for interrupts: {}", e);
        return false;
    }
    tracing::info!("interrupt received, cancelling");
    lifetime.cancel();

    tokio::select! {
        _ = next_interrupt() => tracing::info!("second interrupt, exiting"),
        _ = tokio::time::sleep(grace) => tracing::info!("grace period elapsed, exiting"),
    }
    true
}
