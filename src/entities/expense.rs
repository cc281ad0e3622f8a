//! Expense entity - A categorized payment made on behalf of a group.
//!
//! The assignee is stored as a member id; the display name is resolved when reading.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Group this expense is charged to
    pub group_id: i64,
    /// Category label (see `ExpenseCategory`), e.g. `"Pooja Items"`
    pub category: String,
    /// What the money was spent on
    pub description: String,
    /// Amount spent, always positive
    pub amount: f64,
    /// Member responsible for the expense
    pub member_id: i64,
    /// Date the expense was incurred
    pub date: Date,
    /// Optional receipt attachment reference (file name or URL)
    pub receipt: Option<String>,
    /// When the expense was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one group
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id"
    )]
    Group,
    /// Each expense is assigned to one member
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
