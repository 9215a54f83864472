//! Dashboard shell: guarded navigation and page mounting
//!
//! Every navigation re-runs the guard, unmounts the page being left (its
//! in-flight responses are discarded from then on) and mounts the new page,
//! which starts its own initial fetch in the background.

use bizdash_client::{ApiClient, CredentialStore};
use bizdash_core::{AfterActionPolicy, Config};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::collection::FetchOutcome;
use crate::error::{DashboardError, DashboardResult};
use crate::guard::{GuardDecision, RouteGuard};
use crate::routes::{Navigator, Route};
use crate::views::{BusinessesView, ProductsView, ReportsView, SubscriptionsView, UsersView};

/// The mounted page and its view
#[derive(Debug, Clone)]
pub enum Page {
    /// Landing page, no remote data
    Home,
    /// Sign-in page, no remote data
    SignIn,
    /// Users table
    Users(UsersView),
    /// Business cards
    Businesses(BusinessesView),
    /// Products table
    Products(ProductsView),
    /// Subscription plans
    Subscriptions(SubscriptionsView),
    /// Reported reviews
    Reports(ReportsView),
}

impl Page {
    fn create(route: Route, client: &ApiClient, policy: AfterActionPolicy) -> Self {
        let client = client.clone();
        match route {
            Route::Home => Self::Home,
            Route::SignIn => Self::SignIn,
            Route::Users => Self::Users(UsersView::new(client)),
            Route::Businesses => Self::Businesses(BusinessesView::new(client, policy)),
            Route::Products => Self::Products(ProductsView::new(client)),
            Route::Subscriptions => Self::Subscriptions(SubscriptionsView::new(client)),
            Route::Reports => Self::Reports(ReportsView::new(client, policy)),
        }
    }

    /// Route this page is shown for
    pub const fn route(&self) -> Route {
        match self {
            Self::Home => Route::Home,
            Self::SignIn => Route::SignIn,
            Self::Users(_) => Route::Users,
            Self::Businesses(_) => Route::Businesses,
            Self::Products(_) => Route::Products,
            Self::Subscriptions(_) => Route::Subscriptions,
            Self::Reports(_) => Route::Reports,
        }
    }

    /// Start the page's fetch, if it has a collection
    fn spawn_load(&self) -> Option<JoinHandle<FetchOutcome>> {
        match self.clone() {
            Self::Home | Self::SignIn => None,
            Self::Users(view) => Some(tokio::spawn(async move { view.load().await })),
            Self::Businesses(view) => Some(tokio::spawn(async move { view.load().await })),
            Self::Products(view) => Some(tokio::spawn(async move { view.load().await })),
            Self::Subscriptions(view) => Some(tokio::spawn(async move { view.load().await })),
            Self::Reports(view) => Some(tokio::spawn(async move { view.load().await })),
        }
    }

    fn unmount(&self) {
        match self {
            Self::Home | Self::SignIn => {}
            Self::Users(view) => view.collection().unmount(),
            Self::Businesses(view) => view.collection().unmount(),
            Self::Products(view) => view.collection().unmount(),
            Self::Subscriptions(view) => view.collection().unmount(),
            Self::Reports(view) => view.collection().unmount(),
        }
    }
}

/// Result of a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The requested route was mounted
    Rendered(Route),
    /// The guard sent the user to `to` instead of `from`
    Redirected {
        /// Route that was refused
        from: Route,
        /// Path actually shown
        to: String,
    },
}

/// Headless dashboard application
#[derive(Debug)]
pub struct Dashboard {
    client: ApiClient,
    guard: RouteGuard,
    navigator: Navigator,
    policy: AfterActionPolicy,
    page: Option<Page>,
    initial_load: Option<JoinHandle<FetchOutcome>>,
}

impl Dashboard {
    /// Create a dashboard issuing requests through `client`
    ///
    /// The guard shares the client's credential store.
    pub fn new(client: ApiClient, config: &Config) -> Self {
        let guard = RouteGuard::new(
            client.credentials().clone(),
            config.auth.sign_in_path.clone(),
        );
        Self {
            client,
            guard,
            navigator: Navigator::new(),
            policy: config.dashboard.after_action,
            page: None,
            initial_load: None,
        }
    }

    /// Build the client from `config` and create the dashboard
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(config: &Config, credentials: CredentialStore) -> DashboardResult<Self> {
        let client = ApiClient::from_config(&config.api, credentials)?;
        Ok(Self::new(client, config))
    }

    /// Shared credential store
    pub const fn credentials(&self) -> &CredentialStore {
        self.client.credentials()
    }

    /// Store a credential; guarded routes open from the next navigation on
    pub fn sign_in(&self, token: impl Into<String>) {
        self.credentials().set(token);
        info!("signed in");
    }

    /// Forget the credential; guarded routes close from the next navigation on
    pub fn sign_out(&self) {
        self.credentials().clear();
        info!("signed out");
    }

    /// Navigation history
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Currently mounted page
    pub const fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Route of the currently mounted page
    pub fn current_route(&self) -> Option<Route> {
        self.page.as_ref().map(Page::route)
    }

    /// Navigate to `path`, adding a history entry
    ///
    /// Must be called from within a Tokio runtime: the mounted page starts
    /// its initial fetch as a background task. Await it with [`Self::settle`].
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownRoute`] if no page matches `path`.
    pub fn navigate(&mut self, path: &str) -> DashboardResult<NavigationOutcome> {
        let route = self.resolve(path)?;
        self.navigator.push(route.path());
        Ok(self.enter(route))
    }

    /// Go back one history entry, re-running the guard
    ///
    /// Returns `None` when there is nowhere to go back to.
    pub fn back(&mut self) -> Option<NavigationOutcome> {
        let path = self.navigator.back()?.to_string();
        match self.resolve(&path) {
            Ok(route) => Some(self.enter(route)),
            Err(e) => {
                warn!(path, error = %e, "history entry no longer resolves");
                None
            }
        }
    }

    /// Wait for the mounted page's initial fetch
    ///
    /// Returns `None` if the page has no collection or the fetch was already
    /// awaited.
    pub async fn settle(&mut self) -> Option<FetchOutcome> {
        let handle = self.initial_load.take()?;
        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, "initial fetch task failed");
                None
            }
        }
    }

    fn resolve(&self, path: &str) -> DashboardResult<Route> {
        if path.trim_end_matches('/') == self.guard.sign_in_path().trim_end_matches('/') {
            return Ok(Route::SignIn);
        }
        path.parse()
    }

    fn enter(&mut self, route: Route) -> NavigationOutcome {
        match self.guard.check(route) {
            GuardDecision::Allow => {
                self.mount(route);
                NavigationOutcome::Rendered(route)
            }
            GuardDecision::Redirect { to, replace } => {
                if replace {
                    self.navigator.replace(to.clone());
                } else {
                    self.navigator.push(to.clone());
                }
                self.mount(Route::SignIn);
                NavigationOutcome::Redirected { from: route, to }
            }
        }
    }

    fn mount(&mut self, route: Route) {
        if let Some(previous) = self.page.take() {
            debug!(route = %previous.route(), "unmounting page");
            previous.unmount();
        }
        // Dropping the handle detaches the old fetch; its response is discarded.
        self.initial_load = None;

        let page = Page::create(route, &self.client, self.policy);
        self.initial_load = page.spawn_load();
        debug!(%route, "mounted page");
        self.page = Some(page);
    }

    /// The mounted users view
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::PageNotMounted`] if another page is showing.
    pub fn users(&self) -> DashboardResult<&UsersView> {
        match &self.page {
            Some(Page::Users(view)) => Ok(view),
            _ => Err(DashboardError::PageNotMounted { page: "users" }),
        }
    }

    /// The mounted businesses view
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::PageNotMounted`] if another page is showing.
    pub fn businesses(&self) -> DashboardResult<&BusinessesView> {
        match &self.page {
            Some(Page::Businesses(view)) => Ok(view),
            _ => Err(DashboardError::PageNotMounted { page: "business" }),
        }
    }

    /// The mounted products view
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::PageNotMounted`] if another page is showing.
    pub fn products(&self) -> DashboardResult<&ProductsView> {
        match &self.page {
            Some(Page::Products(view)) => Ok(view),
            _ => Err(DashboardError::PageNotMounted { page: "products" }),
        }
    }

    /// The mounted subscriptions view
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::PageNotMounted`] if another page is showing.
    pub fn subscriptions(&self) -> DashboardResult<&SubscriptionsView> {
        match &self.page {
            Some(Page::Subscriptions(view)) => Ok(view),
            _ => Err(DashboardError::PageNotMounted {
                page: "subscriptions",
            }),
        }
    }

    /// The mounted reports view
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::PageNotMounted`] if another page is showing.
    pub fn reports(&self) -> DashboardResult<&ReportsView> {
        match &self.page {
            Some(Page::Reports(view)) => Ok(view),
            _ => Err(DashboardError::PageNotMounted { page: "reports" }),
        }
    }
}
