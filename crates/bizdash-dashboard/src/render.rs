//! Plain-text rendering of pages

use bizdash_core::types::{
    Business, ModerationStatus, Product, Report, SubscriptionPlan, UserAccount,
};
use bizdash_core::utils::{format_short_date, format_timestamp, initial_of, truncate};
use std::fmt::Write as _;

use crate::app::Page;
use crate::collection::RemoteCollection;
use crate::edit::EditState;
use crate::resource::Resource;
use crate::routes::Route;
use crate::state::{RenderMode, ViewState};
use crate::views::{
    BusinessesView, ProductsView, ReportsView, StatusDraft, SubscriptionsView, UsersView,
};

const REPORTS_EMPTY: &str =
    "No Reports Found\nThere are currently no reported reviews that require attention.";

/// Box-drawn table with columns sized to their content
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<&'static str>,
    max_widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Create a table from `(header, max width)` pairs
    pub fn new(columns: &[(&'static str, usize)]) -> Self {
        Self {
            headers: columns.iter().map(|(header, _)| *header).collect(),
            max_widths: columns.iter().map(|(_, width)| *width).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render blank and extra cells are ignored
    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .zip(&self.max_widths)
            .enumerate()
            .map(|(col, (header, max))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or_default()
                    .clamp(header.chars().count(), (*max).max(header.chars().count()))
            })
            .collect()
    }

    fn rule(widths: &[usize], left: char, mid: char, right: char) -> String {
        let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}\n", inner.join(&mid.to_string()))
    }

    fn line<'a>(widths: &[usize], mut cells: impl Iterator<Item = &'a str>) -> String {
        let mut out = String::from("│");
        for width in widths {
            let cell = truncate(cells.next().unwrap_or_default(), *width);
            let _ = write!(out, " {cell:<width$} │");
        }
        out.push('\n');
        out
    }

    /// Render with a header row and a closing rule
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = Self::rule(&widths, '┌', '┬', '┐');
        out.push_str(&Self::line(&widths, self.headers.iter().copied()));
        out.push_str(&Self::rule(&widths, '├', '┼', '┤'));
        for row in &self.rows {
            out.push_str(&Self::line(&widths, row.iter().map(String::as_str)));
        }
        out.push_str(&Self::rule(&widths, '└', '┴', '┘'));
        out
    }
}

/// Render whichever of loading, error, empty or items is current
pub fn render_state<T>(
    state: &ViewState<T>,
    empty: &str,
    items: impl FnOnce(&[T]) -> String,
) -> String {
    match state.mode() {
        RenderMode::Loading => "Loading...\n".to_string(),
        RenderMode::Failed { message } => format!("{message}\n[Retry]\n"),
        RenderMode::Empty => format!("{empty}\n"),
        RenderMode::Ready(list) => items(list),
    }
}

fn render_collection<T: Resource>(
    collection: &RemoteCollection<T>,
    empty: &str,
    items: impl FnOnce(&[T]) -> String,
) -> String {
    collection.with_state(|state| render_state(state, empty, items))
}

/// Label of the delete button on a report card
pub const fn delete_label(deleting: bool) -> &'static str {
    if deleting { "Deleting..." } else { "Delete Review" }
}

/// Label of the status buttons on a business card
pub const fn status_action_label(updating: bool) -> &'static str {
    if updating {
        "Updating..."
    } else {
        "Approve | Reject | Set Pending"
    }
}

/// Users table
pub fn render_users(view: &UsersView) -> String {
    render_collection(view.collection(), "No users found", |users: &[UserAccount]| {
        let mut table = TextTable::new(&[("ID", 8), ("Name", 30), ("Email", 40), ("Joined", 19)]);
        for user in users {
            table.add_row(vec![
                user.id.to_string(),
                user.name.clone(),
                user.email.clone(),
                format_timestamp(user.created_at.as_ref()),
            ]);
        }
        format!("{}\nTotal: {} user(s)\n", table.render(), table.len())
    })
}

fn product_details(product: &Product, base_url: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {}", product.title);
    if let Some(description) = product.description.as_deref() {
        let _ = writeln!(out, "  {description}");
    }
    let _ = writeln!(
        out,
        "  Category: {} / {}",
        product.category.as_deref().unwrap_or("-"),
        product.sub_category.as_deref().unwrap_or("-")
    );
    if let Some(main) = product.main_image.as_deref() {
        let _ = writeln!(out, "  Main image: {}", bizdash_core::utils::resolve_media(base_url, main));
    }
    for image in product.other_image_paths() {
        let _ = writeln!(out, "  Image: {}", bizdash_core::utils::resolve_media(base_url, image));
    }
    out
}

/// Products table, with the expanded row's details below it
pub fn render_products(view: &ProductsView) -> String {
    let expanded = view.expanded();
    let base_url = view.collection().client().base_url().to_string();
    render_collection(view.collection(), "No products found", |products: &[Product]| {
        let mut table = TextTable::new(&[
            ("", 1),
            ("ID", 8),
            ("Title", 32),
            ("Category", 20),
            ("Status", 8),
        ]);
        for product in products {
            let marker = if expanded.as_deref() == Some(product.title.as_str()) { "▾" } else { "▸" };
            table.add_row(vec![
                marker.to_string(),
                product.id.to_string(),
                product.title.clone(),
                product.category.clone().unwrap_or_default(),
                product.status.to_string(),
            ]);
        }
        let mut out = table.render();
        if let Some(product) = products
            .iter()
            .find(|p| expanded.as_deref() == Some(p.title.as_str()))
        {
            out.push('\n');
            out.push_str(&product_details(product, &base_url));
        }
        if let Some(dialog) = status_dialog(&view.edit_state()) {
            out.push('\n');
            out.push_str(&dialog);
        }
        out
    })
}

/// Status picker of the product edit dialog, if one is open
pub fn status_dialog(state: &EditState<i64, StatusDraft>) -> Option<String> {
    let (key, draft, submitting) = match state {
        EditState::Closed => return None,
        EditState::Open { key, draft } => (key, draft, false),
        EditState::Submitting { key, draft } => (key, draft, true),
    };
    let choices: Vec<String> = ModerationStatus::SELECTABLE
        .iter()
        .map(|status| {
            let mark = if *status == draft.status { 'x' } else { ' ' };
            format!("({mark}) {status}")
        })
        .collect();
    let mut out = format!("Update status of product {key}: {}", choices.join("  "));
    if submitting {
        out.push_str("  Updating...");
    }
    Some(out)
}

/// Business cards as a table
pub fn render_businesses(view: &BusinessesView) -> String {
    render_collection(view.collection(), "No businesses found", |businesses: &[Business]| {
        let mut table = TextTable::new(&[
            ("ID", 8),
            ("Business", 30),
            ("Email", 30),
            ("Status", 8),
            ("Actions", 30),
        ]);
        for business in businesses {
            table.add_row(vec![
                business.id.to_string(),
                business.business_name.clone(),
                business.business_email.clone().unwrap_or_default(),
                business.status.to_string(),
                status_action_label(view.is_pending(business.id)).to_string(),
            ]);
        }
        table.render()
    })
}

/// Detail dialog of one business
pub fn render_business_details(business: &Business, base_url: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", business.business_name, business.status);
    let fields = [
        ("Website", business.business_website_url.as_deref()),
        ("Email", business.business_email.as_deref()),
        ("Phone", business.business_phone.as_deref()),
        ("About", business.business_description.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    let _ = writeln!(
        out,
        "Subscription: {} to {}",
        format_short_date(business.start_date.as_ref()),
        format_short_date(business.end_date.as_ref())
    );
    if let Some(image) = business.main_image.as_deref() {
        let _ = writeln!(out, "Image: {}", bizdash_core::utils::resolve_media(base_url, image));
    }
    out
}

/// Subscription plans table
pub fn render_subscriptions(view: &SubscriptionsView) -> String {
    render_collection(
        view.collection(),
        "No subscriptions found",
        |plans: &[SubscriptionPlan]| {
            let mut table = TextTable::new(&[
                ("ID", 8),
                ("Name", 24),
                ("Weekly", 10),
                ("Monthly", 10),
                ("Yearly", 10),
                ("Active", 6),
                ("Features", 40),
            ]);
            for plan in plans {
                table.add_row(vec![
                    plan.id.to_string(),
                    plan.name.clone(),
                    plan.price_weekly.to_string(),
                    plan.price_monthly.to_string(),
                    plan.price_yearly.to_string(),
                    if plan.is_active { "yes" } else { "no" }.to_string(),
                    plan.features.join(", "),
                ]);
            }
            table.render()
        },
    )
}

/// Report cards as a table
pub fn render_reports(view: &ReportsView) -> String {
    render_collection(view.collection(), REPORTS_EMPTY, |reports: &[Report]| {
        let mut table = TextTable::new(&[
            ("Review", 8),
            ("Title", 28),
            ("Reason", 32),
            ("Severity", 8),
            ("Reporter", 20),
            ("Filed", 12),
            ("Action", 13),
        ]);
        for report in reports {
            let reporter = if report.user.avatar.is_some() {
                report.user.name.clone()
            } else {
                let initial = initial_of(&report.user.name).unwrap_or_else(|| "?".to_string());
                format!("({initial}) {}", report.user.name)
            };
            table.add_row(vec![
                report.review_id.to_string(),
                report.review.title.clone(),
                report.reason.clone(),
                report.severity().to_string(),
                reporter,
                format_short_date(report.created_at.as_ref()),
                delete_label(view.is_deleting(report.review_id)).to_string(),
            ]);
        }
        table.render()
    })
}

/// Render whatever page is mounted
pub fn render_page(page: &Page) -> String {
    match page {
        Page::Home => {
            let mut out = String::from("Dashboard\n");
            for route in Route::ALL.into_iter().filter(|r| r.is_guarded()) {
                let _ = writeln!(out, "  {:<14} {}", route.title(), route.path());
            }
            out
        }
        Page::SignIn => "Sign in required. Store a token with `bizdash token set <TOKEN>`.\n".to_string(),
        Page::Users(view) => render_users(view),
        Page::Businesses(view) => render_businesses(view),
        Page::Products(view) => render_products(view),
        Page::Subscriptions(view) => render_subscriptions(view),
        Page::Reports(view) => render_reports(view),
    }
}
