//! Vendor business logic - The community marketplace shared by all groups.
//!
//! Management members list vendors on behalf of their group. New listings wait
//! in `pending_review` until verified. Browsing filters by category and sorts
//! in memory.

use crate::{
    core::{
        group,
        member::{self, MemberRole},
        report,
    },
    entities::{Vendor, vendor},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{info, instrument};

/// Descriptions shorter than this are rejected.
pub const MIN_DESCRIPTION_LEN: usize = 50;

/// Longest phone number accepted, in digits.
const MAX_PHONE_DIGITS: usize = 16;

/// Kinds of service a vendor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorCategory {
    /// Mandap, flowers, lighting setups
    Decoration,
    /// Food and sweets
    Catering,
    /// Audio and stage lighting
    SoundLighting,
    /// Photo and video
    Photography,
    /// Vehicles and transport
    Transportation,
    /// Event security
    Security,
    /// Cleanup crews
    Cleaning,
    /// Pooja and festival supplies
    Supplies,
    /// Anything else
    Other,
}

impl VendorCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 9] = [
        Self::Decoration,
        Self::Catering,
        Self::SoundLighting,
        Self::Photography,
        Self::Transportation,
        Self::Security,
        Self::Cleaning,
        Self::Supplies,
        Self::Other,
    ];

    /// Stored form, e.g. `"sound_lighting"`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Decoration => "decoration",
            Self::Catering => "catering",
            Self::SoundLighting => "sound_lighting",
            Self::Photography => "photography",
            Self::Transportation => "transportation",
            Self::Security => "security",
            Self::Cleaning => "cleaning",
            Self::Supplies => "supplies",
            Self::Other => "other",
        }
    }

    /// Human-readable label, e.g. `"Sound & Lighting"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Decoration => "Decoration",
            Self::Catering => "Catering",
            Self::SoundLighting => "Sound & Lighting",
            Self::Photography => "Photography",
            Self::Transportation => "Transportation",
            Self::Security => "Security",
            Self::Cleaning => "Cleaning",
            Self::Supplies => "Supplies",
            Self::Other => "Other Services",
        }
    }
}

impl fmt::Display for VendorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VendorCategory {
    type Err = Error;

    /// Accepts the key or the label, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|cat| cat.key() == normalized || cat.label().to_lowercase() == normalized)
            .ok_or_else(|| Error::Validation {
                message: format!("unknown vendor category '{s}'"),
            })
    }
}

/// Review state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    /// Listed, not yet checked
    PendingReview,
    /// Checked and verified
    Verified,
}

impl VendorStatus {
    /// Stored form.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::Verified => "verified",
        }
    }
}

/// Orderings offered when browsing the marketplace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorSort {
    /// Highest rated first
    #[default]
    Rating,
    /// Cheapest starting price first
    PriceLow,
    /// Most expensive starting price first
    PriceHigh,
    /// Most reviewed first
    Reviews,
    /// Most recently listed first
    Newest,
}

impl VendorSort {
    /// Every ordering.
    pub const ALL: [Self; 5] = [
        Self::Rating,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Reviews,
        Self::Newest,
    ];

    /// Query-string form, e.g. `"price_low"`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
            Self::Reviews => "reviews",
            Self::Newest => "newest",
        }
    }
}

impl FromStr for VendorSort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|sort| sort.key() == normalized)
            .ok_or_else(|| Error::Validation {
                message: format!("unknown vendor sort '{s}'"),
            })
    }
}

/// A vendor listing as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewVendor {
    /// Business name
    pub name: String,
    /// Category key or label
    pub category: String,
    /// Services offered
    pub description: String,
    /// Contact phone; spaces, dashes and parentheses are ignored
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Where the vendor operates
    pub location: String,
    /// Lowest advertised price; must be positive
    pub starting_price: f64,
    /// Optional website
    #[serde(default)]
    pub website: Option<String>,
    /// Optional specialties
    #[serde(default)]
    pub specialties: Option<String>,
    /// Optional image URL
    #[serde(default)]
    pub image: Option<String>,
}

impl NewVendor {
    /// Checks every field and returns the parsed category.
    ///
    /// Fails with `Validation` naming the first bad field, or `InvalidAmount`
    /// for a starting price that is not a positive number.
    pub fn validate(&self) -> Result<VendorCategory> {
        if self.name.trim().is_empty() {
            return Err(invalid("Vendor name is required"));
        }

        let category: VendorCategory = self.category.parse()?;

        let description = self.description.trim();
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(invalid(&format!(
                "Description must be at least {MIN_DESCRIPTION_LEN} characters"
            )));
        }

        if !is_valid_phone(&self.phone) {
            return Err(invalid("Please enter a valid phone number"));
        }

        if !is_valid_email(self.email.trim()) {
            return Err(invalid("Please enter a valid email address"));
        }

        if self.location.trim().is_empty() {
            return Err(invalid("Location is required"));
        }

        if !self.starting_price.is_finite() || self.starting_price <= 0.0 {
            return Err(Error::InvalidAmount {
                amount: self.starting_price,
            });
        }

        Ok(category)
    }
}

fn invalid(message: &str) -> Error {
    Error::Validation {
        message: message.to_string(),
    }
}

/// An optional `+`, then 1 to 16 digits not starting with 0.
fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);

    !digits.is_empty()
        && digits.len() <= MAX_PHONE_DIGITS
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

/// `local@domain.tld` with no whitespace and a single `@`.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Lists a vendor in the marketplace on behalf of `group_id`.
///
/// `added_by` must be a management member of the group, otherwise the listing
/// is refused with `NotPermitted`. The vendor starts unverified in
/// `pending_review` with no rating.
#[instrument(skip(db, new_vendor), fields(vendor = %new_vendor.name))]
pub async fn add_vendor<C>(
    db: &C,
    group_id: i64,
    added_by: i64,
    new_vendor: NewVendor,
) -> Result<vendor::Model>
where
    C: ConnectionTrait,
{
    let category = new_vendor.validate()?;

    group::require_group(db, group_id).await?;
    let adder = member::require_member(db, group_id, added_by).await?;
    if adder.role.parse::<MemberRole>().ok() != Some(MemberRole::Management) {
        return Err(Error::NotPermitted {
            message: format!("Only management members can add vendors; {} cannot", adder.name),
        });
    }

    let vendor_model = vendor::ActiveModel {
        group_id: Set(group_id),
        added_by: Set(added_by),
        name: Set(new_vendor.name.trim().to_string()),
        category: Set(category.key().to_string()),
        description: Set(new_vendor.description.trim().to_string()),
        phone: Set(new_vendor.phone.trim().to_string()),
        email: Set(new_vendor.email.trim().to_string()),
        location: Set(new_vendor.location.trim().to_string()),
        starting_price: Set(new_vendor.starting_price),
        website: Set(optional(new_vendor.website)),
        specialties: Set(optional(new_vendor.specialties)),
        image: Set(optional(new_vendor.image)),
        rating: Set(0.0),
        review_count: Set(0),
        is_verified: Set(false),
        status: Set(VendorStatus::PendingReview.key().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = vendor_model.insert(db).await?;
    info!(
        group_id,
        vendor_id = result.id,
        category = category.key(),
        "Listed vendor '{}'",
        result.name
    );
    Ok(result)
}

/// Finds a vendor by ID.
pub async fn get_vendor_by_id<C>(db: &C, vendor_id: i64) -> Result<Option<vendor::Model>>
where
    C: ConnectionTrait,
{
    Vendor::find_by_id(vendor_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Browses the marketplace, optionally one category only, in `sort` order.
pub async fn list_vendors<C>(
    db: &C,
    category: Option<VendorCategory>,
    sort: VendorSort,
) -> Result<Vec<vendor::Model>>
where
    C: ConnectionTrait,
{
    let mut query = Vendor::find().order_by_asc(vendor::Column::Id);
    if let Some(category) = category {
        query = query.filter(vendor::Column::Category.eq(category.key()));
    }

    let mut vendors = query.all(db).await?;
    sort_vendors(&mut vendors, sort);
    Ok(vendors)
}

/// Marks a listing as verified.
#[instrument(skip(db))]
pub async fn verify_vendor<C>(db: &C, vendor_id: i64) -> Result<vendor::Model>
where
    C: ConnectionTrait,
{
    let existing = get_vendor_by_id(db, vendor_id)
        .await?
        .ok_or(Error::VendorNotFound { id: vendor_id })?;

    let mut active: vendor::ActiveModel = existing.into();
    active.is_verified = Set(true);
    active.status = Set(VendorStatus::Verified.key().to_string());
    let updated = active.update(db).await?;

    info!(vendor_id, "Verified vendor '{}'", updated.name);
    Ok(updated)
}

/// Orders vendors by `sort`. Ties keep listing order (lowest id first).
pub fn sort_vendors(vendors: &mut [vendor::Model], sort: VendorSort) {
    vendors.sort_by(|a, b| {
        let primary = match sort {
            VendorSort::Rating => b.rating.total_cmp(&a.rating),
            VendorSort::PriceLow => a.starting_price.total_cmp(&b.starting_price),
            VendorSort::PriceHigh => b.starting_price.total_cmp(&a.starting_price),
            VendorSort::Reviews => b.review_count.cmp(&a.review_count),
            VendorSort::Newest => b.created_at.cmp(&a.created_at),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}

/// One-line listing for chat, e.g.
/// `#2 | Spice Garden Catering | Catering | from $15.00 | ★ 4.9 (203) | pending review`.
#[must_use]
pub fn format_vendor_line(vendor: &vendor::Model) -> String {
    let category = vendor
        .category
        .parse::<VendorCategory>()
        .map_or_else(|_| vendor.category.clone(), |cat| cat.label().to_string());
    let rating = if vendor.review_count > 0 {
        format!("★ {:.1} ({})", vendor.rating, vendor.review_count)
    } else {
        "New".to_string()
    };
    let status = if vendor.is_verified {
        "verified"
    } else {
        "pending review"
    };

    format!(
        "#{} | {} | {} | from {} | {} | {}",
        vendor.id,
        vendor.name,
        category,
        report::format_amount(vendor.starting_price),
        rating,
        status
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_parse_vendor_categories() {
        assert_eq!(
            "sound_lighting".parse::<VendorCategory>().unwrap(),
            VendorCategory::SoundLighting
        );
        assert_eq!(
            "Sound & Lighting".parse::<VendorCategory>().unwrap(),
            VendorCategory::SoundLighting
        );
        assert_eq!(
            "other services".parse::<VendorCategory>().unwrap(),
            VendorCategory::Other
        );
        assert!(matches!(
            "fireworks".parse::<VendorCategory>(),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!("price_low".parse::<VendorSort>().unwrap(), VendorSort::PriceLow);
        assert_eq!(" Newest ".parse::<VendorSort>().unwrap(), VendorSort::Newest);
        assert_eq!(VendorSort::default(), VendorSort::Rating);
        assert!("distance".parse::<VendorSort>().is_err());
    }

    #[test]
    fn test_validate_accepts_listing() {
        assert_eq!(new_vendor().validate().unwrap(), VendorCategory::Catering);
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let cases: [fn(&mut NewVendor); 9] = [
            |v| v.name = "  ".to_string(),
            |v| v.category = String::new(),
            |v| v.description = "Great food".to_string(),
            |v| v.phone = String::new(),
            |v| v.phone = "0555 0202".to_string(),
            |v| v.phone = "+1-555-CALL".to_string(),
            |v| v.email = "orders@spicegarden".to_string(),
            |v| v.email = "orders spice@garden.com".to_string(),
            |v| v.location = String::new(),
        ];

        for break_field in cases {
            let mut vendor = new_vendor();
            break_field(&mut vendor);
            assert!(matches!(vendor.validate(), Err(Error::Validation { .. })));
        }
    }

    #[test]
    fn test_validate_starting_price() {
        for price in [0.0, -15.0, f64::NAN] {
            let mut vendor = new_vendor();
            vendor.starting_price = price;
            assert!(matches!(vendor.validate(), Err(Error::InvalidAmount { .. })));
        }
    }

    #[test]
    fn test_phone_and_email_rules() {
        assert!(is_valid_phone("+1 (555) 020-2"));
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("12345678901234567"));

        assert!(is_valid_email("info@elegantdecorations.com"));
        assert!(!is_valid_email("@decorations.com"));
        assert!(!is_valid_email("info@@decorations.com"));
        assert!(!is_valid_email("info@decorations."));
    }

    #[tokio::test]
    async fn test_add_vendor_validation_writes_nothing() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let mut vendor = new_vendor();
        vendor.starting_price = 0.0;

        let result = add_vendor(&db, 1, 1, vendor).await;

        assert!(matches!(result, Err(Error::InvalidAmount { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_vendor_pending_review() -> Result<()> {
        let (db, group) = setup_with_group().await?;
        let admin = create_test_manager(&db, group.id, "Rajesh Kumar").await?;

        let mut listing = new_vendor();
        listing.website = Some("  ".to_string());
        listing.specialties = Some(" Prasad, sweets ".to_string());
        let vendor = add_vendor(&db, group.id, admin.id, listing).await?;

        assert_eq!(vendor.category, "catering");
        assert_eq!(vendor.status, "pending_review");
        assert!(!vendor.is_verified);
        assert_eq!(vendor.rating, 0.0);
        assert_eq!(vendor.review_count, 0);
        assert!(vendor.website.is_none());
        assert_eq!(vendor.specialties.as_deref(), Some("Prasad, sweets"));
        assert_eq!(vendor.added_by, admin.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_vendor_requires_management() -> Result<()> {
        let (db, group) = setup_with_group().await?;
        let regular = create_test_member(&db, group.id, "Amit Patel").await?;

        let result = add_vendor(&db, group.id, regular.id, new_vendor()).await;
        assert!(matches!(result, Err(Error::NotPermitted { .. })));

        let missing = add_vendor(&db, group.id, 404, new_vendor()).await;
        assert!(matches!(missing, Err(Error::MemberNotFound { id: 404 })));

        let unknown_group = add_vendor(&db, 77, regular.id, new_vendor()).await;
        assert!(matches!(unknown_group, Err(Error::GroupNotFound { id: 77 })));

        assert!(list_vendors(&db, None, VendorSort::Rating).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_vendors_filters_and_sorts() -> Result<()> {
        let (db, group) = setup_with_group().await?;
        let admin = create_test_manager(&db, group.id, "Rajesh Kumar").await?;

        let mut caterer = new_vendor();
        caterer.starting_price = 15.0;
        add_vendor(&db, group.id, admin.id, caterer).await?;

        let mut decorator = new_vendor();
        decorator.name = "Elegant Decorations".to_string();
        decorator.category = "decoration".to_string();
        decorator.starting_price = 299.0;
        add_vendor(&db, group.id, admin.id, decorator).await?;

        let mut sweets = new_vendor();
        sweets.name = "Mithai Mahal".to_string();
        sweets.starting_price = 40.0;
        add_vendor(&db, group.id, admin.id, sweets).await?;

        let catering = list_vendors(&db, Some(VendorCategory::Catering), VendorSort::PriceHigh)
            .await?;
        let names: Vec<&str> = catering.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Mithai Mahal", "Spice Garden Catering"]);

        let cheapest = list_vendors(&db, None, VendorSort::PriceLow).await?;
        assert_eq!(cheapest.len(), 3);
        assert_eq!(cheapest[0].starting_price, 15.0);
        assert_eq!(cheapest[2].starting_price, 299.0);

        let none = list_vendors(&db, Some(VendorCategory::Security), VendorSort::Rating).await?;
        assert!(none.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_verify_vendor() -> Result<()> {
        let (db, group) = setup_with_group().await?;
        let admin = create_test_manager(&db, group.id, "Rajesh Kumar").await?;
        let listed = add_vendor(&db, group.id, admin.id, new_vendor()).await?;

        let verified = verify_vendor(&db, listed.id).await?;
        assert!(verified.is_verified);
        assert_eq!(verified.status, "verified");

        let missing = verify_vendor(&db, 404).await;
        assert!(matches!(missing, Err(Error::VendorNotFound { id: 404 })));
        Ok(())
    }

    #[test]
    fn test_sort_vendors() {
        let mut vendors = vec![
            vendor_model(1, 299.0, 4.8, 127),
            vendor_model(2, 15.0, 4.9, 203),
            vendor_model(3, 120.0, 4.8, 40),
        ];

        sort_vendors(&mut vendors, VendorSort::Rating);
        let ids: Vec<i64> = vendors.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        sort_vendors(&mut vendors, VendorSort::PriceLow);
        let ids: Vec<i64> = vendors.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        sort_vendors(&mut vendors, VendorSort::Reviews);
        let ids: Vec<i64> = vendors.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_format_vendor_line() {
        let mut vendor = vendor_model(2, 15.0, 4.9, 203);
        assert_eq!(
            format_vendor_line(&vendor),
            "#2 | Vendor 2 | Catering | from $15.00 | ★ 4.9 (203) | pending review"
        );

        vendor.review_count = 0;
        vendor.is_verified = true;
        assert_eq!(
            format_vendor_line(&vendor),
            "#2 | Vendor 2 | Catering | from $15.00 | New | verified"
        );
    }
}
