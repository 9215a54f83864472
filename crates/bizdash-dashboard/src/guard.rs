//! Token-presence route guard

use bizdash_client::CredentialStore;
use tracing::debug;

use crate::routes::Route;

/// Result of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested route
    Allow,
    /// Send the user elsewhere
    Redirect {
        /// Destination path
        to: String,
        /// Whether the redirect overwrites the current history entry
        replace: bool,
    },
}

/// Gates guarded routes on the presence of a stored credential
///
/// The store is consulted on every check, so signing in or out takes effect
/// on the next navigation.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    credentials: CredentialStore,
    sign_in_path: String,
}

impl RouteGuard {
    /// Create a guard redirecting to `sign_in_path`
    pub fn new(credentials: CredentialStore, sign_in_path: impl Into<String>) -> Self {
        Self {
            credentials,
            sign_in_path: sign_in_path.into(),
        }
    }

    /// Where unauthenticated navigation ends up
    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }

    /// Check navigation to `route`
    pub fn check(&self, route: Route) -> GuardDecision {
        if !route.is_guarded() || self.credentials.has_token() {
            return GuardDecision::Allow;
        }
        debug!(%route, to = %self.sign_in_path, "no credential, redirecting");
        GuardDecision::Redirect {
            to: self.sign_in_path.clone(),
            replace: true,
        }
    }
}
