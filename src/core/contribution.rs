//! Contribution status and group-wide collection progress.
//!
//! `classify` is the one place a member's status is decided. Views that used to
//! say "pending" for a member who has paid nothing get `Overdue` here; the label
//! "pending" still parses to it.

use crate::{entities::member, errors::Error};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Where a member stands against their expected contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionStatus {
    /// Contributed at least the expected amount
    Paid,
    /// Contributed something, but less than expected
    Partial,
    /// Contributed nothing yet
    Overdue,
}

impl ContributionStatus {
    /// Lowercase label used in chat output and JSON.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Partial => "partial",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContributionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Ok(Self::Paid),
            "partial" => Ok(Self::Partial),
            "overdue" | "pending" => Ok(Self::Overdue),
            other => Err(Error::Validation {
                message: format!("unknown contribution status '{other}'"),
            }),
        }
    }
}

/// Classifies a contribution against its expectation.
///
/// Total over all inputs: anything that is neither paid nor partially paid
/// (including NaN contributions) is `Overdue`.
#[must_use]
pub fn classify(expected: f64, contributed: f64) -> ContributionStatus {
    if contributed >= expected {
        ContributionStatus::Paid
    } else if contributed > 0.0 {
        ContributionStatus::Partial
    } else {
        ContributionStatus::Overdue
    }
}

/// Aggregate collection progress over a member set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionProgress {
    /// Members with status `Paid`
    pub paid_count: usize,
    /// Members with status `Partial`
    pub partial_count: usize,
    /// Members with status `Overdue`
    pub overdue_count: usize,
    /// Size of the member set
    pub total_members: usize,
    /// `100 * paid_count / total_members`, or 0 with no members
    pub percentage_complete: f64,
}

/// Counts statuses across `members` and derives the completion percentage.
#[must_use]
pub fn aggregate_progress(members: &[member::Model]) -> ContributionProgress {
    let mut progress = ContributionProgress {
        paid_count: 0,
        partial_count: 0,
        overdue_count: 0,
        total_members: members.len(),
        percentage_complete: 0.0,
    };

    for m in members {
        match m.status() {
            ContributionStatus::Paid => progress.paid_count += 1,
            ContributionStatus::Partial => progress.partial_count += 1,
            ContributionStatus::Overdue => progress.overdue_count += 1,
        }
    }

    progress.percentage_complete = percentage(progress.paid_count, progress.total_members);
    progress
}

/// `100 * part / whole`, defined as 0 when `whole` is 0.
#[must_use]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    // Cast safety: member counts are far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    let ratio = part as f64 / whole as f64;
    ratio * 100.0
}
