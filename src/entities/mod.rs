//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod contribution;
pub mod expense;
pub mod group;
pub mod member;
pub mod vendor;

// Re-export specific types to avoid conflicts
pub use contribution::{
    Column as ContributionColumn, Entity as Contribution, Model as ContributionModel,
};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use group::{Column as GroupColumn, Entity as Group, Model as GroupModel};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
pub use vendor::{Column as VendorColumn, Entity as Vendor, Model as VendorModel};
