//! Per-item transient state
//!
//! Tracks which items have a mutation in flight so their action controls can
//! be disabled and labelled as busy. A key enters the set when its request
//! starts and leaves it when the request settles, whatever the outcome.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use crate::error::{DashboardError, DashboardResult};

/// Identity keys of items with a mutation in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSet<K: Eq + Hash> {
    keys: HashSet<K>,
}

impl<K: Eq + Hash> Default for PendingSet<K> {
    fn default() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> PendingSet<K> {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as pending; returns false if it already was
    pub fn begin(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    /// Clear `key`; returns false if it was not pending
    pub fn end(&mut self, key: &K) -> bool {
        self.keys.remove(key)
    }

    /// Whether `key` has a mutation in flight
    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Number of pending keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Runs per-item mutations and keeps the shared pending set honest
#[derive(Debug)]
pub struct ActionController<K: Eq + Hash> {
    pending: Arc<Mutex<PendingSet<K>>>,
}

impl<K: Eq + Hash> Clone for ActionController<K> {
    fn clone(&self) -> Self {
        Self {
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<K: Eq + Hash> Default for ActionController<K> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(PendingSet::new())),
        }
    }
}

impl<K> ActionController<K>
where
    K: Eq + Hash + Clone + std::fmt::Display,
{
    /// Create a controller with nothing pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` has a mutation in flight
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.lock().contains(key)
    }

    /// Number of mutations in flight
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Run `mutation` for `key`
    ///
    /// The key is pending for exactly as long as the mutation runs, including
    /// when the future is dropped before completing. A key that is already
    /// pending is refused rather than issuing a second request.
    pub async fn run<F, T>(&self, key: K, mutation: F) -> DashboardResult<T>
    where
        F: Future<Output = DashboardResult<T>>,
    {
        let _guard = PendingGuard::acquire(&self.pending, key.clone())
            .ok_or_else(|| DashboardError::ActionPending {
                key: key.to_string(),
            })?;
        mutation.await
    }
}

/// Removes its key from the pending set when dropped
struct PendingGuard<'a, K: Eq + Hash> {
    pending: &'a Mutex<PendingSet<K>>,
    key: Option<K>,
}

impl<'a, K: Eq + Hash + Clone> PendingGuard<'a, K> {
    fn acquire(pending: &'a Mutex<PendingSet<K>>, key: K) -> Option<Self> {
        if !pending.lock().begin(key.clone()) {
            return None;
        }
        Some(Self {
            pending,
            key: Some(key),
        })
    }
}

impl<K: Eq + Hash> Drop for PendingGuard<'_, K> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.pending.lock().end(&key);
        }
    }
}
