//! Business moderation cards

use bizdash_client::ApiClient;
use bizdash_core::AfterActionPolicy;
use bizdash_core::types::{Business, ModerationStatus};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::{Reconciled, reconcile};
use crate::collection::{FetchOutcome, RemoteCollection};
use crate::error::{DashboardError, DashboardResult};
use crate::pending::ActionController;

const UPDATE_STATUS_PATH: &str = "/api/subscriptions/user/update-status";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusUpdate {
    business_id: i64,
    status: ModerationStatus,
}

/// Business cards with status actions and a detail dialog
#[derive(Debug, Clone)]
pub struct BusinessesView {
    collection: RemoteCollection<Business>,
    actions: ActionController<i64>,
    selected: Arc<Mutex<Option<i64>>>,
    policy: AfterActionPolicy,
}

impl BusinessesView {
    /// Create the view; nothing is fetched until [`Self::load`]
    pub fn new(client: ApiClient, policy: AfterActionPolicy) -> Self {
        Self {
            collection: RemoteCollection::new(client),
            actions: ActionController::new(),
            selected: Arc::new(Mutex::new(None)),
            policy,
        }
    }

    /// Backing collection
    pub const fn collection(&self) -> &RemoteCollection<Business> {
        &self.collection
    }

    /// Fetch (or re-fetch) the businesses
    pub async fn load(&self) -> FetchOutcome {
        self.collection.refresh().await
    }

    /// Whether business `id` has a status change in flight
    pub fn is_pending(&self, id: i64) -> bool {
        self.actions.is_pending(&id)
    }

    /// Change the status of business `id`
    ///
    /// While the request runs the business is pending. On success the card
    /// is patched in place or the list refetched, per the configured policy;
    /// on failure the card is left as it was.
    ///
    /// # Errors
    ///
    /// Fails if the business already has a change in flight or the PUT fails.
    pub async fn set_status(&self, id: i64, status: ModerationStatus) -> DashboardResult<Reconciled> {
        let client = self.collection.client().clone();
        let result = self
            .actions
            .run(id, async move {
                let body = StatusUpdate {
                    business_id: id,
                    status,
                };
                client.put_json(UPDATE_STATUS_PATH, &body).await?;
                Ok(())
            })
            .await;

        if let Err(e) = result {
            warn!(id, %status, error = %e, "failed to update business status");
            return Err(e);
        }
        info!(id, %status, "business status updated");

        Ok(reconcile(&self.collection, self.policy, |collection| {
            collection.replace_by_key(&id, |business| business.status = status)
        })
        .await)
    }

    /// Approve business `id`
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub async fn approve(&self, id: i64) -> DashboardResult<Reconciled> {
        self.set_status(id, ModerationStatus::Approved).await
    }

    /// Reject business `id`
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub async fn reject(&self, id: i64) -> DashboardResult<Reconciled> {
        self.set_status(id, ModerationStatus::Rejected).await
    }

    /// Show the detail dialog for business `id`
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NotFound`] if the business is not in the collection.
    pub fn select(&self, id: i64) -> DashboardResult<()> {
        if self.collection.find(&id).is_none() {
            return Err(DashboardError::NotFound {
                resource: "business",
                key: format!("id {id}"),
            });
        }
        *self.selected.lock() = Some(id);
        Ok(())
    }

    /// Close the detail dialog
    pub fn close_details(&self) {
        *self.selected.lock() = None;
    }

    /// The business shown in the detail dialog, as it currently is in the collection
    pub fn details(&self) -> Option<Business> {
        let id = (*self.selected.lock())?;
        self.collection.find(&id)
    }
}
