//! Mount tracking for views
//!
//! Requests are never cancelled. Instead every fetch takes a ticket, and a
//! response is applied only while its view is mounted and its ticket is the
//! newest one issued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Proof that a fetch was started at a given epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug)]
struct Inner {
    mounted: AtomicBool,
    epoch: AtomicU64,
}

/// Shared mounted flag and fetch epoch of one view instance
#[derive(Debug, Clone)]
pub struct ViewLifecycle {
    inner: Arc<Inner>,
}

impl Default for ViewLifecycle {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                mounted: AtomicBool::new(true),
                epoch: AtomicU64::new(0),
            }),
        }
    }
}

impl ViewLifecycle {
    /// A freshly mounted view
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the view is still mounted
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::Acquire)
    }

    /// Mark the view defunct; late responses will be dropped
    pub fn unmount(&self) {
        self.inner.mounted.store(false, Ordering::Release);
    }

    /// Start a fetch, superseding every earlier ticket
    pub fn next_ticket(&self) -> FetchTicket {
        FetchTicket(self.inner.epoch.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether a response for `ticket` may still be applied
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.is_mounted() && self.inner.epoch.load(Ordering::Acquire) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_ticket_wins() {
        let lifecycle = ViewLifecycle::new();
        let first = lifecycle.next_ticket();
        assert!(lifecycle.is_current(first));

        let second = lifecycle.next_ticket();
        assert!(!lifecycle.is_current(first));
        assert!(lifecycle.is_current(second));
    }

    #[test]
    fn test_unmount_invalidates_everything() {
        let lifecycle = ViewLifecycle::new();
        let ticket = lifecycle.next_ticket();
        let handle = lifecycle.clone();

        handle.unmount();

        assert!(!lifecycle.is_mounted());
        assert!(!lifecycle.is_current(ticket));
    }
}
