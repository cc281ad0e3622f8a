//! Collection milestones and the completion-date estimate.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fixed completion thresholds, in percent, ascending.
pub const MILESTONE_THRESHOLDS: [u8; 4] = [25, 50, 75, 100];

/// One threshold and whether the current percentage has crossed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Threshold in percent
    pub threshold: u8,
    /// `percentage >= threshold`
    pub reached: bool,
}

/// Evaluates every threshold against `percentage`, in ascending order.
#[must_use]
pub fn evaluate(percentage: f64) -> Vec<Milestone> {
    MILESTONE_THRESHOLDS
        .iter()
        .map(|&threshold| Milestone {
            threshold,
            reached: percentage >= f64::from(threshold),
        })
        .collect()
}

/// Thresholds already crossed at `percentage`.
#[must_use]
pub fn reached(percentage: f64) -> Vec<u8> {
    evaluate(percentage)
        .into_iter()
        .filter(|m| m.reached)
        .map(|m| m.threshold)
        .collect()
}

/// The lowest threshold not yet crossed, if any.
#[must_use]
pub fn next_milestone(percentage: f64) -> Option<u8> {
    evaluate(percentage)
        .into_iter()
        .find(|m| !m.reached)
        .map(|m| m.threshold)
}

/// Rough estimate of when every member will have paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionEstimate {
    /// No member has paid yet (or there are no members), so there is nothing to extrapolate
    NotAvailable,
    /// Extrapolated finish
    Estimated {
        /// Days from `today` until the projected finish
        days: u64,
        /// `today + days`
        date: NaiveDate,
    },
}

/// Projects a completion date from the paid fraction.
///
/// This is an estimate, not a forecast. It treats the paid fraction
/// `paid / total` as if that share of the roster paid every week and computes
/// `ceil((total - paid) / (fraction * 7))` days. It ignores when payments
/// actually happened.
#[must_use]
pub fn project_completion(paid: usize, total: usize, today: NaiveDate) -> CompletionEstimate {
    if total == 0 || paid == 0 {
        return CompletionEstimate::NotAvailable;
    }

    let remaining = total.saturating_sub(paid);

    // Cast safety: member counts are far below 2^52; the result is a small positive day count.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let days = {
        let rate = paid as f64 / total as f64;
        (remaining as f64 / (rate * 7.0)).ceil() as u64
    };

    today
        .checked_add_days(Days::new(days))
        .map_or(CompletionEstimate::NotAvailable, |date| {
            CompletionEstimate::Estimated { days, date }
        })
}
