//! Remote-collection views for the bizdash admin dashboard
//!
//! Every page owns a [`RemoteCollection`] that fetches its list endpoint on
//! mount, tracks loading and error state, and is patched or refetched after
//! per-item actions. A [`RouteGuard`] gates every page except sign-in on the
//! presence of a stored credential.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod app;
pub mod collection;
pub mod edit;
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod pending;
pub mod render;
pub mod resource;
pub mod routes;
pub mod state;
pub mod views;

pub use app::{Dashboard, NavigationOutcome, Page};
pub use collection::{FetchOutcome, RemoteCollection};
pub use edit::{EditDialog, EditFlow, EditState, Settled};
pub use error::{DashboardError, DashboardResult};
pub use guard::{GuardDecision, RouteGuard};
pub use lifecycle::{FetchTicket, ViewLifecycle};
pub use pending::{ActionController, PendingSet};
pub use resource::Resource;
pub use routes::{Navigator, Route};
pub use state::{RenderMode, ViewState};
pub use views::{
    BusinessesView, ProductsView, Reconciled, ReportsView, StatusDraft, SubscriptionDraft,
    SubscriptionsView, UsersView,
};
