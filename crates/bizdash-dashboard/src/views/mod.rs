//! Per-resource views
//!
//! Each view is a cheap cloneable handle over one [`RemoteCollection`] plus
//! whatever transient state its page needs (pending set, edit dialog,
//! expanded row, selection).
//!
//! [`RemoteCollection`]: crate::collection::RemoteCollection

pub mod businesses;
pub mod products;
pub mod reports;
pub mod subscriptions;
pub mod users;

pub use businesses::BusinessesView;
pub use products::{ProductsView, StatusDraft};
pub use reports::ReportsView;
pub use subscriptions::{SubscriptionDraft, SubscriptionsView};
pub use users::UsersView;

use bizdash_core::AfterActionPolicy;
use tracing::debug;

use crate::collection::{FetchOutcome, RemoteCollection};
use crate::resource::Resource;

/// How a collection was brought back in line after a successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// Matching entries were removed or replaced in place
    Patched {
        /// Entries touched
        count: usize,
    },
    /// The collection was fetched again
    Refetched(FetchOutcome),
}

/// Apply `policy` after a per-item action succeeded
pub(crate) async fn reconcile<T: Resource>(
    collection: &RemoteCollection<T>,
    policy: AfterActionPolicy,
    patch: impl FnOnce(&RemoteCollection<T>) -> usize,
) -> Reconciled {
    match policy {
        AfterActionPolicy::Patch => {
            let count = patch(collection);
            debug!(resource = T::NAME, count, "patched after action");
            Reconciled::Patched { count }
        }
        AfterActionPolicy::Refetch => Reconciled::Refetched(collection.refresh().await),
    }
}
