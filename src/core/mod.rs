//! Core business logic - framework-agnostic budget reconciliation.
//!
//! The pure model (`category`, `contribution`, `milestone`, `ledger`) has no
//! database access. The service modules (`group`, `member`, `expense`, `vendor`) persist
//! through `SeaORM`, and `report` ties both together for the surfaces.

/// Expense categories and per-category grouping
pub mod category;
/// Contribution status classification and progress aggregation
pub mod contribution;
/// Expense persistence
pub mod expense;
/// Group persistence and seeding
pub mod group;
/// In-memory budget ledger
pub mod ledger;
/// Member roster persistence and contribution tracking
pub mod member;
/// Collection milestones and completion projection
pub mod milestone;
/// Reports, reconciliation and chat formatting
pub mod report;
/// Community vendor marketplace
pub mod vendor;
