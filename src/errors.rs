//! Unified error type for the ledger, its persistence layer and both surfaces.

use thiserror::Error;

/// Every failure the crate can report.
///
/// Validation variants abort an operation before anything is written.
/// Not-found variants are reported without mutation. Nothing here is fatal
/// to the process; callers retry with corrected input.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// An expense failed validation (bad amount, unknown category, missing field, unknown assignee)
    #[error("Invalid expense: {reason}")]
    InvalidExpense {
        /// Why the expense was rejected
        reason: String,
    },

    /// A currency amount is negative, zero where it must be positive, or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Any other input that failed boundary validation
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// No group with this id
    #[error("Group not found: {id}")]
    GroupNotFound {
        /// Requested group id
        id: i64,
    },

    /// No member with this id in the group
    #[error("Member not found: {id}")]
    MemberNotFound {
        /// Requested member id
        id: i64,
    },

    /// No expense with this id in the group
    #[error("Expense not found: {id}")]
    ExpenseNotFound {
        /// Requested expense id
        id: i64,
    },

    /// No vendor with this id in the marketplace
    #[error("Vendor not found: {id}")]
    VendorNotFound {
        /// Requested vendor id
        id: i64,
    },

    /// The member's role does not allow the operation
    #[error("{message}")]
    NotPermitted {
        /// What was refused
        message: String,
    },

    /// The member still has expenses assigned and cannot be removed
    #[error("Member {id} still has expenses assigned")]
    MemberHasExpenses {
        /// Member id
        id: i64,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Error while formatting chat output
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Whether this error was caused by the caller's input rather than the system.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidExpense { .. } | Self::InvalidAmount { .. } | Self::Validation { .. }
        )
    }

    /// Whether this error reports a missing entity.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GroupNotFound { .. }
                | Self::MemberNotFound { .. }
                | Self::ExpenseNotFound { .. }
                | Self::VendorNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
