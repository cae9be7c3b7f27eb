//! Lifetime handle granted by the host.
//!
//! A `Lifetime` marks the window in which the application may do work. The
//! host keeps one clone and cancels it on shutdown (e.g. Ctrl-C); operations
//! that walk over many inputs call [`Lifetime::checkpoint`] between steps and
//! stop with [`Cancelled`] once the window has closed.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Error returned by [`Lifetime::checkpoint`] after the lifetime was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation cancelled: application lifetime ended")
    }
}

impl std::error::Error for Cancelled {}

/// Shared cancellation flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct Lifetime {
    cancelled: Arc<AtomicBool>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the lifetime. Idempotent; every clone sees the change.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::Relaxed) {
            tracing::debug!("lifetime cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Returns `Err(Cancelled)` once [`cancel`](Self::cancel) has been called on any clone.
    pub fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// True if both handles are clones of the same lifetime.
    pub fn same_as(&self, other: &Lifetime) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lifetime_is_live() {
        let lt = Lifetime::new();
        assert!(!lt.is_cancelled());
        assert_eq!(lt.checkpoint(), Ok(()));
    }

    #[test]
    fn cancel_is_seen_by_clones() {
        let lt = Lifetime::new();
        let clone = lt.clone();
        clone.cancel();
        assert!(lt.is_cancelled());
        assert_eq!(lt.checkpoint(), Err(Cancelled));
    }

    #[test]
    fn cancel_twice_stays_cancelled() {
        let lt = Lifetime::new();
        lt.cancel();
        lt.cancel();
        assert!(lt.is_cancelled());
    }

    #[test]
    fn cancel_from_another_thread() {
        let lt = Lifetime::new();
        let remote = lt.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(lt.is_cancelled());
    }

    #[test]
    fn same_as_distinguishes_lifetimes() {
        let a = Lifetime::new();
        let b = Lifetime::new();
        assert!(a.same_as(&a.clone()));
        assert!(!a.same_as(&b));
    }
}
