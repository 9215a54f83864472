//! Subscription plan editor

use bizdash_client::ApiClient;
use bizdash_core::types::SubscriptionPlan;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::collection::{FetchOutcome, RemoteCollection};
use crate::edit::{EditDialog, EditState};
use crate::error::{DashboardError, DashboardResult};

/// Editable fields of a plan; always submitted in full
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDraft {
    /// Plan name
    pub name: String,
    /// Weekly price
    #[serde(with = "rust_decimal::serde::float")]
    pub price_weekly: Decimal,
    /// Monthly price
    #[serde(with = "rust_decimal::serde::float")]
    pub price_monthly: Decimal,
    /// Yearly price
    #[serde(with = "rust_decimal::serde::float")]
    pub price_yearly: Decimal,
    /// Whether businesses can subscribe
    pub is_active: bool,
}

impl From<&SubscriptionPlan> for SubscriptionDraft {
    fn from(plan: &SubscriptionPlan) -> Self {
        Self {
            name: plan.name.clone(),
            price_weekly: plan.price_weekly,
            price_monthly: plan.price_monthly,
            price_yearly: plan.price_yearly,
            is_active: plan.is_active,
        }
    }
}

/// Subscription plans with an edit dialog
#[derive(Debug, Clone)]
pub struct SubscriptionsView {
    collection: RemoteCollection<SubscriptionPlan>,
    edit: EditDialog<i64, SubscriptionDraft>,
}

impl SubscriptionsView {
    /// Create the view; nothing is fetched until [`Self::load`]
    pub fn new(client: ApiClient) -> Self {
        Self {
            collection: RemoteCollection::new(client),
            edit: EditDialog::new(),
        }
    }

    /// Backing collection
    pub const fn collection(&self) -> &RemoteCollection<SubscriptionPlan> {
        &self.collection
    }

    /// Fetch (or re-fetch) the plans
    pub async fn load(&self) -> FetchOutcome {
        self.collection.refresh().await
    }

    /// Open the edit dialog for plan `id`, replacing any open draft
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NotFound`] if the plan is not in the collection.
    pub fn open_edit(&self, id: i64) -> DashboardResult<()> {
        let plan = self
            .collection
            .find(&id)
            .ok_or_else(|| DashboardError::NotFound {
                resource: "subscription",
                key: format!("id {id}"),
            })?;
        self.edit.open(id, SubscriptionDraft::from(&plan));
        Ok(())
    }

    /// Edit the open draft
    ///
    /// # Errors
    ///
    /// Fails when no dialog is open or a submission is in flight.
    pub fn update_draft(&self, edit: impl FnOnce(&mut SubscriptionDraft)) -> DashboardResult<()> {
        self.edit.update(edit)
    }

    /// Close the dialog, discarding the draft
    pub fn close_edit(&self) {
        self.edit.close();
    }

    /// Current dialog state
    pub fn edit_state(&self) -> EditState<i64, SubscriptionDraft> {
        self.edit.state()
    }

    /// Send the full draft and refetch on success
    ///
    /// # Errors
    ///
    /// Fails when no dialog is open, a submission is already running or the
    /// PUT fails; in the last case the dialog stays open with its draft.
    pub async fn submit(&self) -> DashboardResult<FetchOutcome> {
        let client = self.collection.client().clone();
        let result = self
            .edit
            .submit(|submission| async move {
                let path = format!(
                    "/api/subscriptions/update-single-subscription/{}",
                    submission.key
                );
                client.put_json(&path, &submission.draft).await?;
                info!(id = submission.key, name = %submission.draft.name, "subscription updated");
                Ok(())
            })
            .await;

        match result {
            Ok(settled) => {
                debug!(?settled, "subscription dialog settled");
                Ok(self.collection.refresh().await)
            }
            Err(e) => {
                warn!(error = %e, "failed to update subscription");
                Err(e)
            }
        }
    }
}
