//! Remote resources the dashboard knows how to list

use bizdash_client::CollectionShape;
use bizdash_core::types::{Business, Product, Report, SubscriptionPlan, UserAccount};
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A record type backed by a remote list endpoint
pub trait Resource: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Identity key used for per-item state
    type Key: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Singular name used in logs and errors
    const NAME: &'static str;
    /// Collection endpoint
    const ENDPOINT: &'static str;
    /// Response envelope of the collection endpoint
    const SHAPE: CollectionShape;
    /// Message shown when the collection cannot be loaded
    const LOAD_ERROR: &'static str;

    /// Identity key of this record
    fn key(&self) -> Self::Key;
}

impl Resource for Product {
    type Key = i64;

    const NAME: &'static str = "product";
    const ENDPOINT: &'static str = "/api/products";
    const SHAPE: CollectionShape = CollectionShape::Wrapped("products");
    const LOAD_ERROR: &'static str = "Failed to load products";

    fn key(&self) -> i64 {
        self.id
    }
}

impl Resource for UserAccount {
    type Key = i64;

    const NAME: &'static str = "user";
    const ENDPOINT: &'static str = "/api/all";
    const SHAPE: CollectionShape = CollectionShape::Bare;
    const LOAD_ERROR: &'static str = "Failed to load users";

    fn key(&self) -> i64 {
        self.id
    }
}

impl Resource for Business {
    type Key = i64;

    const NAME: &'static str = "business";
    const ENDPOINT: &'static str = "/api/subscriptions/user/get-all-businesses";
    const SHAPE: CollectionShape = CollectionShape::Bare;
    const LOAD_ERROR: &'static str = "Failed to load businesses";

    fn key(&self) -> i64 {
        self.id
    }
}

impl Resource for SubscriptionPlan {
    type Key = i64;

    const NAME: &'static str = "subscription";
    const ENDPOINT: &'static str = "/api/subscriptions/get-all";
    const SHAPE: CollectionShape = CollectionShape::Bare;
    const LOAD_ERROR: &'static str = "Failed to load subscriptions";

    fn key(&self) -> i64 {
        self.id
    }
}

/// Reports are keyed by the review they point at, since deletion acts on it
impl Resource for Report {
    type Key = i64;

    const NAME: &'static str = "report";
    const ENDPOINT: &'static str = "/api/reports";
    const SHAPE: CollectionShape = CollectionShape::Wrapped("reports");
    const LOAD_ERROR: &'static str = "Unable to load reports. Please try again later.";

    fn key(&self) -> i64 {
        self.review_id
    }
}
