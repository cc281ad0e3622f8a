//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Budget overview, milestones and budget changes
pub mod budget;

/// Expense recording and listing
pub mod expense;

/// General utility commands
pub mod general;

/// Roster and contribution commands
pub mod member;

/// Community marketplace commands
pub mod vendor;

// Export commands
pub use budget::*;
pub use expense::*;
pub use general::*;
pub use member::*;
pub use vendor::*;
