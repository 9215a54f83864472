//! Routes and navigation history

use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Pages the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page
    Home,
    /// Registered users
    Users,
    /// Business moderation
    Businesses,
    /// Product moderation
    Products,
    /// Subscription plans
    Subscriptions,
    /// Reported reviews
    Reports,
    /// Sign-in page; the only unguarded route
    SignIn,
}

impl Route {
    /// Every route, in menu order
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::Users,
        Self::Businesses,
        Self::Products,
        Self::Subscriptions,
        Self::Reports,
        Self::SignIn,
    ];

    /// Canonical path
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/dashboard/home",
            Self::Users => "/dashboard/users",
            Self::Businesses => "/dashboard/business",
            Self::Products => "/dashboard/products",
            Self::Subscriptions => "/dashboard/subscriptions",
            Self::Reports => "/dashboard/reports",
            Self::SignIn => "/auth/sign-in",
        }
    }

    /// Menu label
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Users => "Users",
            Self::Businesses => "Business",
            Self::Products => "Products",
            Self::Subscriptions => "Subscriptions",
            Self::Reports => "Reports",
            Self::SignIn => "Sign in",
        }
    }

    /// Whether navigation to this route requires a credential
    pub const fn is_guarded(self) -> bool {
        !matches!(self, Self::SignIn)
    }

    /// Resolve a path, accepting short aliases without the `/dashboard` prefix
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim().trim_end_matches('/');
        let section = path.strip_prefix("/dashboard").unwrap_or(path);

        match section {
            "" | "/home" => Some(Self::Home),
            "/users" => Some(Self::Users),
            "/business" | "/businesses" => Some(Self::Businesses),
            "/products" => Some(Self::Products),
            "/subscriptions" => Some(Self::Subscriptions),
            "/reports" => Some(Self::Reports),
            "/auth/sign-in" | "/sign-in" => Some(Self::SignIn),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DashboardError::UnknownRoute {
            path: s.to_string(),
        })
    }
}

/// Browser-style history stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    history: Vec<String>,
}

impl Navigator {
    /// Empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Current location
    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// Add a history entry
    pub fn push(&mut self, path: impl Into<String>) {
        self.history.push(path.into());
    }

    /// Overwrite the current entry, or add one if the history is empty
    pub fn replace(&mut self, path: impl Into<String>) {
        let path = path.into();
        match self.history.last_mut() {
            Some(current) => *current = path,
            None => self.history.push(path),
        }
    }

    /// Go back one entry; the first entry cannot be left
    pub fn back(&mut self) -> Option<&str> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        self.current()
    }

    /// Number of history entries
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether nothing was visited yet
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Every entry, oldest first
    pub fn entries(&self) -> &[String] {
        &self.history
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("/dashboard/home", Route::Home)]
    #[case("/", Route::Home)]
    #[case("/dashboard", Route::Home)]
    #[case("/users", Route::Users)]
    #[case("/dashboard/users/", Route::Users)]
    #[case("/dashboard/business", Route::Businesses)]
    #[case("/businesses", Route::Businesses)]
    #[case("/dashboard/products?page=2", Route::Products)]
    #[case("/subscriptions", Route::Subscriptions)]
    #[case("/dashboard/reports#top", Route::Reports)]
    #[case("/auth/sign-in", Route::SignIn)]
    fn test_parse(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::parse(path), Some(expected));
    }

    #[test]
    fn test_unknown_route() {
        assert!(Route::parse("/dashboard/message").is_none());
        let err = "/nowhere".parse::<Route>().unwrap_err();
        assert!(matches!(err, DashboardError::UnknownRoute { ref path } if path == "/nowhere"));
    }

    #[test]
    fn test_canonical_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }

    #[test]
    fn test_only_sign_in_is_open() {
        let open: Vec<_> = Route::ALL.into_iter().filter(|r| !r.is_guarded()).collect();
        assert_eq!(open, vec![Route::SignIn]);
    }

    #[test]
    fn test_replace_then_back_skips_replaced_entry() {
        let mut nav = Navigator::new();
        nav.push("/dashboard/home");
        nav.push("/dashboard/users");
        nav.replace("/auth/sign-in");

        assert_eq!(nav.current(), Some("/auth/sign-in"));
        assert_eq!(nav.back(), Some("/dashboard/home"));
        assert_eq!(nav.back(), None);
        assert_eq!(nav.len(), 1);
    }

    #[test]
    fn test_replace_on_empty_history() {
        let mut nav = Navigator::new();
        nav.replace("/auth/sign-in");
        assert_eq!(nav.entries(), ["/auth/sign-in".to_string()]);
    }
}
