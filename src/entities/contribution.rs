//! Contribution entity - One change to a member's contributed amount.
//!
//! Rows form the per-member time series of payments. `amount` is the delta
//! applied, so corrections downward are negative.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contribution database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contributions")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Group the contribution was made to
    pub group_id: i64,
    /// Member who contributed
    pub member_id: i64,
    /// Change applied to the member's contributed amount
    pub amount: f64,
    /// When the change was recorded
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between Contribution and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one group
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id"
    )]
    Group,
    /// Each record belongs to one member
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id"
    )]
    Member,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
