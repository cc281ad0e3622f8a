//! Group entity - A festival committee with a budget, members and expenses.
//!
//! `collected_amount` and `total_expenses` are running totals kept in step with
//! the member and expense rows by the service layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Festival group database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "festival_groups")]
pub struct Model {
    /// Unique identifier for the group
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Diwali Celebration 2024")
    #[sea_orm(unique)]
    pub name: String,
    /// Pledged budget for the festival
    pub total_budget: f64,
    /// Sum of all member contributions to date
    pub collected_amount: f64,
    /// Sum of all recorded expense amounts
    pub total_expenses: f64,
    /// When the group was created
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Cash on hand: collected minus spent (not budget headroom).
    #[must_use]
    pub fn remaining_balance(&self) -> f64 {
        self.collected_amount - self.total_expenses
    }
}

/// Defines relationships between Group and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One group has many members
    #[sea_orm(has_many = "super::member::Entity")]
    Members,
    /// One group has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One group has many contribution records
    #[sea_orm(has_many = "super::contribution::Entity")]
    Contributions,
    /// One group lists many marketplace vendors
    #[sea_orm(has_many = "super::vendor::Entity")]
    Vendors,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::contribution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contributions.def()
    }
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
