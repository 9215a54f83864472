//! Remote record types rendered by the dashboard
//!
//! Records come from the marketplace API in camelCase and are decoded
//! leniently: every display field is optional or defaulted, because the
//! dashboard renders whatever the server sends and never validates shape.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Decode an explicit `null` the same way as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Moderation status shared by products and businesses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    /// Visible to customers
    Approved,
    /// Awaiting review
    #[default]
    Pending,
    /// Refused by an operator
    Rejected,
    /// Any status this dashboard does not know about
    #[serde(other)]
    Unknown,
}

impl ModerationStatus {
    /// Statuses an operator can pick from
    pub const SELECTABLE: [Self; 3] = [Self::Approved, Self::Pending, Self::Rejected];

    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModerationStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approved" => Ok(Self::Approved),
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            other => Err(crate::Error::validation(
                "status",
                format!("expected approved, pending or rejected, got '{other}'"),
            )),
        }
    }
}

/// A product listing awaiting or past moderation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server identifier
    pub id: i64,
    /// Listing title; also keys the expanded-row state
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Category name
    #[serde(default)]
    pub category: Option<String>,
    /// Sub-category name
    #[serde(default)]
    pub sub_category: Option<String>,
    /// Relative path of the main image
    #[serde(default)]
    pub main_image: Option<String>,
    /// Comma-separated relative paths of further images
    #[serde(default)]
    pub other_images: Option<String>,
    /// Moderation status
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ModerationStatus,
}

impl Product {
    /// Additional image paths, in listing order
    #[must_use]
    pub fn other_image_paths(&self) -> Vec<&str> {
        self.other_images
            .as_deref()
            .map(crate::utils::split_image_list)
            .unwrap_or_default()
    }
}

/// A registered customer account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Server identifier
    pub id: i64,
    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Contact email
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A business subscribed to a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    /// Server identifier
    pub id: i64,
    /// Trading name
    #[serde(default, deserialize_with = "null_as_default")]
    pub business_name: String,
    /// Public website
    #[serde(default)]
    pub business_website_url: Option<String>,
    /// Contact email
    #[serde(default)]
    pub business_email: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub business_phone: Option<String>,
    /// Long description shown in the detail dialog
    #[serde(default)]
    pub business_description: Option<String>,
    /// Relative path of the main image
    #[serde(default)]
    pub main_image: Option<String>,
    /// Moderation status
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ModerationStatus,
    /// Subscription start
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Subscription end
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// A subscription plan offered to businesses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    /// Server identifier
    pub id: i64,
    /// Plan name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Marketing description
    #[serde(default)]
    pub description: Option<String>,
    /// Bullet-point features
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    /// Weekly price
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_weekly: Decimal,
    /// Monthly price
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_monthly: Decimal,
    /// Yearly price
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_yearly: Decimal,
    /// Whether businesses can subscribe
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
}

/// The review a report points at
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Review headline
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Review body
    #[serde(default)]
    pub description: Option<String>,
    /// Relative path of the attached image
    #[serde(default)]
    pub image: Option<String>,
    /// Star rating
    #[serde(default)]
    pub rating: Option<Decimal>,
}

/// The user who filed a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporter {
    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Relative path of the avatar image
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A report filed against a review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Server identifier of the report
    pub id: i64,
    /// Identifier of the reported review; deleting acts on this key
    pub review_id: i64,
    /// Reason given by the reporter
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,
    /// Filing time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// The reported review
    #[serde(default, rename = "Review", deserialize_with = "null_as_default")]
    pub review: ReviewSummary,
    /// The reporting user
    #[serde(default, rename = "User", deserialize_with = "null_as_default")]
    pub user: Reporter,
}

impl Report {
    /// Severity of the report reason
    #[must_use]
    pub fn severity(&self) -> crate::utils::Severity {
        crate::utils::Severity::classify(&self.reason)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("approved", ModerationStatus::Approved)]
    #[case("pending", ModerationStatus::Pending)]
    #[case("rejected", ModerationStatus::Rejected)]
    #[case("archived", ModerationStatus::Unknown)]
    fn test_status_decoding(#[case] wire: &str, #[case] expected: ModerationStatus) {
        let status: ModerationStatus = serde_json::from_value(json!(wire)).unwrap();
        assert_eq!(status, expected);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            " Approved ".parse::<ModerationStatus>().unwrap(),
            ModerationStatus::Approved
        );
        assert!("unknown".parse::<ModerationStatus>().is_err());
        assert_eq!(ModerationStatus::Rejected.to_string(), "rejected");
    }

    #[test]
    fn test_product_decoding() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "title": "Walnut desk",
            "description": "Solid wood",
            "category": "Furniture",
            "subCategory": "Desks",
            "mainImage": "uploads/desk.jpg",
            "otherImages": "uploads/a.jpg, uploads/b.jpg,,uploads/c.jpg",
            "status": "pending"
        }))
        .unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.sub_category.as_deref(), Some("Desks"));
        assert_eq!(
            product.other_image_paths(),
            vec!["uploads/a.jpg", "uploads/b.jpg", "uploads/c.jpg"]
        );
    }

    #[test]
    fn test_product_decoding_is_lenient() {
        let product: Product = serde_json::from_value(json!({ "id": 1 })).unwrap();

        assert_eq!(product.title, "");
        assert_eq!(product.status, ModerationStatus::Pending);
        assert!(product.other_image_paths().is_empty());
    }

    #[test]
    fn test_null_display_fields_fall_back_to_defaults() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "title": null,
            "status": null,
            "otherImages": null
        }))
        .unwrap();
        assert_eq!(product.title, "");
        assert_eq!(product.status, ModerationStatus::Pending);

        let plan: SubscriptionPlan = serde_json::from_value(json!({
            "id": 2,
            "name": null,
            "features": null,
            "priceWeekly": null,
            "isActive": null
        }))
        .unwrap();
        assert!(plan.features.is_empty());
        assert_eq!(plan.price_weekly, Decimal::ZERO);
        assert!(!plan.is_active);

        let report: Report = serde_json::from_value(json!({
            "id": 3,
            "reviewId": 9,
            "reason": null,
            "Review": null,
            "User": { "name": null }
        }))
        .unwrap();
        assert_eq!(report.review, ReviewSummary::default());
        assert_eq!(report.user.name, "");
    }

    #[test]
    fn test_null_fields_do_not_fail_the_collection() {
        let products: Vec<Product> = serde_json::from_value(json!([
            { "id": 1, "title": "Desk", "status": "approved" },
            { "id": 2, "title": null, "status": null }
        ]))
        .unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Desk");
    }

    #[test]
    fn test_subscription_prices_accept_strings_and_numbers() {
        let plan: SubscriptionPlan = serde_json::from_value(json!({
            "id": 2,
            "name": "Gold",
            "features": ["Featured listing", "Analytics"],
            "priceWeekly": "4.99",
            "priceMonthly": 15,
            "priceYearly": 150.5,
            "isActive": true
        }))
        .unwrap();

        assert_eq!(plan.price_weekly, Decimal::new(499, 2));
        assert_eq!(plan.price_monthly, Decimal::from(15));
        assert_eq!(plan.price_yearly, Decimal::new(1505, 1));
        assert!(plan.is_active);
        assert_eq!(plan.features.len(), 2);
    }

    #[test]
    fn test_report_decoding_with_nested_records() {
        let report: Report = serde_json::from_value(json!({
            "id": 11,
            "reviewId": 42,
            "reason": "Harassment in comments",
            "createdAt": "2024-03-15T14:25:30Z",
            "Review": { "title": "Bad service", "rating": 1, "image": null },
            "User": { "name": "dana", "email": "dana@example.com" }
        }))
        .unwrap();

        assert_eq!(report.review_id, 42);
        assert_eq!(report.review.title, "Bad service");
        assert_eq!(report.review.rating, Some(Decimal::from(1)));
        assert_eq!(report.user.name, "dana");
        assert!(report.user.avatar.is_none());
        assert_eq!(report.severity(), crate::utils::Severity::High);
    }

    #[test]
    fn test_business_decoding() {
        let business: Business = serde_json::from_value(json!({
            "id": 3,
            "businessName": "Corner Bakery",
            "businessEmail": "hello@bakery.test",
            "mainImage": "/uploads/bakery.png",
            "status": "approved",
            "startDate": "2024-01-01T00:00:00Z",
            "endDate": null
        }))
        .unwrap();

        assert_eq!(business.business_name, "Corner Bakery");
        assert_eq!(business.status, ModerationStatus::Approved);
        assert!(business.start_date.is_some());
        assert!(business.end_date.is_none());
    }
}
