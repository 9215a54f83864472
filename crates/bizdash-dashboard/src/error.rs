//! Error types for the dashboard

use bizdash_client::ClientError;
use thiserror::Error;

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Errors surfaced by views, navigation and the CLI
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A remote request failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Configuration, I/O or validation failure
    #[error(transparent)]
    Core(#[from] bizdash_core::Error),

    /// No page matches the requested path
    #[error("Unknown route: {path}")]
    UnknownRoute {
        /// Requested path
        path: String,
    },

    /// An action targeted a page that is not currently mounted
    #[error("Page '{page}' is not mounted")]
    PageNotMounted {
        /// Page that was expected
        page: &'static str,
    },

    /// An action referenced an item that is not in the collection
    #[error("No {resource} with {key} in the current collection")]
    NotFound {
        /// Resource name
        resource: &'static str,
        /// Identity key that was looked up
        key: String,
    },

    /// A draft operation ran while no edit dialog was open
    #[error("No edit dialog is open")]
    NoDraft,

    /// An edit was submitted while the previous submission is still running
    #[error("An edit submission is already in flight")]
    SubmitInFlight,

    /// The item already has a mutation in flight
    #[error("An action for {key} is already in flight")]
    ActionPending {
        /// Identity key of the busy item
        key: String,
    },
}

impl DashboardError {
    /// Whether the failure came from the remote API
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Client(_))
    }

    /// What the operator can do about a remote failure
    pub fn hint(&self) -> Option<&'static str> {
        let Self::Client(err) = self else {
            return None;
        };
        if err.is_unauthorized() {
            Some("The stored token was rejected; sign in again with `bizdash token set <TOKEN>`")
        } else if err.is_retryable() {
            Some("The server may be busy or unreachable; try again shortly")
        } else {
            None
        }
    }
}
