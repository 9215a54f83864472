//! Generic remote collection
//!
//! One instance backs one mounted view: it fetches the resource's list
//! endpoint, settles the [`ViewState`] and offers the in-place patches a view
//! may apply after a successful per-item action.

use bizdash_client::ApiClient;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error};

use crate::lifecycle::ViewLifecycle;
use crate::resource::Resource;
use crate::state::ViewState;

/// How one fetch settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection was replaced
    Loaded {
        /// Number of items received
        count: usize,
    },
    /// The fetch failed and the view shows `message` with a retry affordance
    Failed {
        /// User-facing message
        message: String,
    },
    /// The view was unmounted or a newer fetch started before this one settled
    Discarded,
}

/// A remote collection and its loading/error state
#[derive(Debug, Clone)]
pub struct RemoteCollection<T: Resource> {
    client: ApiClient,
    state: Arc<RwLock<ViewState<T>>>,
    lifecycle: ViewLifecycle,
}

impl<T: Resource> RemoteCollection<T> {
    /// Create a mounted, loading collection; call [`Self::refresh`] to fetch
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(ViewState::new())),
            lifecycle: ViewLifecycle::new(),
        }
    }

    /// Client the collection issues its requests through
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Mount tracking shared with the owning view
    pub const fn lifecycle(&self) -> &ViewLifecycle {
        &self.lifecycle
    }

    /// Whether the owning view is still mounted
    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_mounted()
    }

    /// Mark the owning view defunct
    pub fn unmount(&self) {
        debug!(resource = T::NAME, "view unmounted");
        self.lifecycle.unmount();
    }

    /// Fetch the collection, from any state
    pub async fn refresh(&self) -> FetchOutcome {
        if !self.lifecycle.is_mounted() {
            return FetchOutcome::Discarded;
        }
        let ticket = self.lifecycle.next_ticket();
        self.state.write().begin_load();
        debug!(resource = T::NAME, endpoint = T::ENDPOINT, "fetching collection");

        let result = self.client.get_collection::<T>(T::ENDPOINT, T::SHAPE).await;

        let mut state = self.state.write();
        if !self.lifecycle.is_current(ticket) {
            debug!(resource = T::NAME, "discarding response for a defunct or superseded fetch");
            return FetchOutcome::Discarded;
        }
        match result {
            Ok(items) => {
                let count = items.len();
                state.apply_success(items);
                debug!(resource = T::NAME, count, "collection loaded");
                FetchOutcome::Loaded { count }
            }
            Err(e) => {
                error!(resource = T::NAME, error = %e, "failed to load collection");
                state.apply_failure(T::LOAD_ERROR);
                FetchOutcome::Failed {
                    message: T::LOAD_ERROR.to_string(),
                }
            }
        }
    }

    /// Copy of the current view state
    pub fn snapshot(&self) -> ViewState<T> {
        self.state.read().clone()
    }

    /// Run `f` against the current view state without copying it
    pub fn with_state<R>(&self, f: impl FnOnce(&ViewState<T>) -> R) -> R {
        f(&self.state.read())
    }

    /// Items of the last successful fetch
    pub fn items(&self) -> Vec<T> {
        self.state.read().items().to_vec()
    }

    /// First item with identity `key`
    pub fn find(&self, key: &T::Key) -> Option<T> {
        self.state
            .read()
            .items()
            .iter()
            .find(|item| item.key() == *key)
            .cloned()
    }

    /// Remove every item with identity `key`; a defunct view is left alone
    pub fn remove_by_key(&self, key: &T::Key) -> usize {
        if !self.lifecycle.is_mounted() {
            return 0;
        }
        let removed = self.state.write().remove_where(|item| item.key() == *key);
        debug!(resource = T::NAME, %key, removed, "removed from collection");
        removed
    }

    /// Apply `update` to every item with identity `key`; a defunct view is left alone
    pub fn replace_by_key(&self, key: &T::Key, update: impl FnMut(&mut T)) -> usize {
        if !self.lifecycle.is_mounted() {
            return 0;
        }
        let replaced = self
            .state
            .write()
            .replace_where(|item| item.key() == *key, update);
        debug!(resource = T::NAME, %key, replaced, "patched collection");
        replaced
    }
}
