//! Reported reviews
//!
//! Each card offers a single destructive action, deleting the reported
//! review. The card stays visible and its button shows a busy label while the
//! delete is in flight.

use bizdash_client::ApiClient;
use bizdash_core::AfterActionPolicy;
use bizdash_core::types::Report;
use tracing::{info, warn};

use super::{Reconciled, reconcile};
use crate::collection::{FetchOutcome, RemoteCollection};
use crate::error::DashboardResult;
use crate::pending::ActionController;

/// Reported reviews awaiting moderation
#[derive(Debug, Clone)]
pub struct ReportsView {
    collection: RemoteCollection<Report>,
    actions: ActionController<i64>,
    policy: AfterActionPolicy,
}

impl ReportsView {
    /// Create the view; nothing is fetched until [`Self::load`]
    pub fn new(client: ApiClient, policy: AfterActionPolicy) -> Self {
        Self {
            collection: RemoteCollection::new(client),
            actions: ActionController::new(),
            policy,
        }
    }

    /// Backing collection
    pub const fn collection(&self) -> &RemoteCollection<Report> {
        &self.collection
    }

    /// Fetch (or re-fetch) the reports
    pub async fn load(&self) -> FetchOutcome {
        self.collection.refresh().await
    }

    /// Whether review `review_id` is being deleted
    pub fn is_deleting(&self, review_id: i64) -> bool {
        self.actions.is_pending(&review_id)
    }

    /// Number of deletes in flight
    pub fn deleting_count(&self) -> usize {
        self.actions.pending_count()
    }

    /// Delete review `review_id`
    ///
    /// On success the report is removed in place or the list refetched, per
    /// the configured policy. On failure the report stays.
    ///
    /// # Errors
    ///
    /// Fails if the review is already being deleted or the DELETE fails.
    pub async fn delete_review(&self, review_id: i64) -> DashboardResult<Reconciled> {
        let client = self.collection.client().clone();
        let result = self
            .actions
            .run(review_id, async move {
                client.delete(&format!("/api/review/{review_id}")).await?;
                Ok(())
            })
            .await;

        if let Err(e) = result {
            warn!(review_id, error = %e, "failed to delete review");
            return Err(e);
        }
        info!(review_id, "review deleted");

        Ok(reconcile(&self.collection, self.policy, |collection| {
            collection.remove_by_key(&review_id)
        })
        .await)
    }
}
