//! Member entity - A person on a group's roster.
//!
//! Each member has a role, the amount they are expected to contribute and the
//! amount they have contributed so far. Contribution status is derived, never stored.

use crate::core::contribution::{self, ContributionStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Group this member belongs to
    pub group_id: i64,
    /// Display name, unique within the group
    pub name: String,
    /// Role key (see `MemberRole`), e.g. `"treasurer"`
    pub role: String,
    /// Amount this member is expected to contribute
    pub expected_amount: f64,
    /// Amount contributed so far
    pub contributed_amount: f64,
}

impl Model {
    /// Contribution status through the single classification function.
    #[must_use]
    pub fn status(&self) -> ContributionStatus {
        contribution::classify(self.expected_amount, self.contributed_amount)
    }

    /// Amount still owed; never negative.
    #[must_use]
    pub fn outstanding(&self) -> f64 {
        (self.expected_amount - self.contributed_amount).max(0.0)
    }
}

/// Defines relationships between Member and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each member belongs to one group
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id"
    )]
    Group,
    /// Expenses assigned to this member
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// Contribution history of this member
    #[sea_orm(has_many = "super::contribution::Entity")]
    Contributions,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
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

impl ActiveModelBehavior for ActiveModel {}
