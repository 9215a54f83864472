//! Product moderation view

use bizdash_client::ApiClient;
use bizdash_core::types::{ModerationStatus, Product};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::collection::{FetchOutcome, RemoteCollection};
use crate::edit::{EditDialog, EditState};
use crate::error::{DashboardError, DashboardResult};

/// Editable fields of the product status dialog; serialized as the PATCH body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDraft {
    /// Status to apply
    pub status: ModerationStatus,
}

/// Products table with expandable rows and a status dialog
#[derive(Debug, Clone)]
pub struct ProductsView {
    collection: RemoteCollection<Product>,
    edit: EditDialog<i64, StatusDraft>,
    expanded: Arc<Mutex<Option<String>>>,
}

impl ProductsView {
    /// Create the view; nothing is fetched until [`Self::load`]
    pub fn new(client: ApiClient) -> Self {
        Self {
            collection: RemoteCollection::new(client),
            edit: EditDialog::new(),
            expanded: Arc::new(Mutex::new(None)),
        }
    }

    /// Backing collection
    pub const fn collection(&self) -> &RemoteCollection<Product> {
        &self.collection
    }

    /// Fetch (or re-fetch) the products
    pub async fn load(&self) -> FetchOutcome {
        self.collection.refresh().await
    }

    /// Expand the row titled `title`, or collapse it if it already is
    ///
    /// Returns whether the row is expanded afterwards. At most one row is
    /// expanded at a time.
    pub fn toggle_expanded(&self, title: &str) -> bool {
        let mut expanded = self.expanded.lock();
        if expanded.as_deref() == Some(title) {
            *expanded = None;
            false
        } else {
            *expanded = Some(title.to_string());
            true
        }
    }

    /// Title of the expanded row
    pub fn expanded(&self) -> Option<String> {
        self.expanded.lock().clone()
    }

    /// Open the status dialog for product `id`, seeded with its current status
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NotFound`] if the product is not in the collection.
    pub fn open_status_edit(&self, id: i64) -> DashboardResult<()> {
        let product = self
            .collection
            .find(&id)
            .ok_or_else(|| DashboardError::NotFound {
                resource: "product",
                key: format!("id {id}"),
            })?;
        self.edit.open(
            id,
            StatusDraft {
                status: product.status,
            },
        );
        Ok(())
    }

    /// Pick a status in the open dialog
    ///
    /// # Errors
    ///
    /// Fails when no dialog is open or a submission is in flight.
    pub fn set_draft_status(&self, status: ModerationStatus) -> DashboardResult<()> {
        self.edit.update(|draft| draft.status = status)
    }

    /// Close the dialog, discarding the draft
    pub fn close_edit(&self) {
        self.edit.close();
    }

    /// Current dialog state
    pub fn edit_state(&self) -> EditState<i64, StatusDraft> {
        self.edit.state()
    }

    /// Send the draft status and refetch on success
    ///
    /// # Errors
    ///
    /// Fails when no dialog is open, a submission is already running or the
    /// PATCH fails; in the last case the dialog stays open with its draft.
    pub async fn submit_status(&self) -> DashboardResult<FetchOutcome> {
        let client = self.collection.client().clone();
        let result = self
            .edit
            .submit(|submission| async move {
                let path = format!("/api/products/{}/status", submission.key);
                client.patch_json(&path, &submission.draft).await?;
                info!(id = submission.key, status = %submission.draft.status, "product status updated");
                Ok(())
            })
            .await;

        match result {
            Ok(settled) => {
                debug!(?settled, "status dialog settled");
                Ok(self.collection.refresh().await)
            }
            Err(e) => {
                warn!(error = %e, "failed to update product status");
                Err(e)
            }
        }
    }
}
