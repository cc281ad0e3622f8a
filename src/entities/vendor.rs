//! Vendor entity - A service provider listed in the community marketplace.
//!
//! Vendors are visible to every group. `group_id` and `added_by` record which
//! group and which member listed them.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vendor database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    /// Unique identifier for the vendor
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Group that listed the vendor
    pub group_id: i64,
    /// Member who listed the vendor
    pub added_by: i64,
    /// Business name
    pub name: String,
    /// Category key (see `VendorCategory`), e.g. `"sound_lighting"`
    pub category: String,
    /// Services offered, at least 50 characters
    pub description: String,
    /// Contact phone number as entered
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Where the vendor operates
    pub location: String,
    /// Lowest advertised price
    pub starting_price: f64,
    /// Optional website
    pub website: Option<String>,
    /// Optional free-form specialties
    pub specialties: Option<String>,
    /// Optional image URL
    pub image: Option<String>,
    /// Average review rating, 0 until reviewed
    pub rating: f64,
    /// Number of reviews behind `rating`
    pub review_count: i32,
    /// Whether the listing has been verified
    pub is_verified: bool,
    /// Review status key, `"pending_review"` or `"verified"`
    pub status: String,
    /// When the vendor was listed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Vendor and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each vendor was listed by one group
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id"
    )]
    Group,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
