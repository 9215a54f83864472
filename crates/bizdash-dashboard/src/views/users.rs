//! Read-only users table

use bizdash_client::ApiClient;
use bizdash_core::types::UserAccount;

use crate::collection::{FetchOutcome, RemoteCollection};

/// Registered user accounts
#[derive(Debug, Clone)]
pub struct UsersView {
    collection: RemoteCollection<UserAccount>,
}

impl UsersView {
    /// Create the view; nothing is fetched until [`Self::load`]
    pub fn new(client: ApiClient) -> Self {
        Self {
            collection: RemoteCollection::new(client),
        }
    }

    /// Backing collection
    pub const fn collection(&self) -> &RemoteCollection<UserAccount> {
        &self.collection
    }

    /// Fetch (or re-fetch) the accounts
    pub async fn load(&self) -> FetchOutcome {
        self.collection.refresh().await
    }
}
