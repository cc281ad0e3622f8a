//! Expense categories and per-category grouping.
//!
//! The category set is fixed. Grouping always yields one entry per category,
//! including empty ones, so callers can iterate every category without gaps.

use crate::{
    entities::expense,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// The fixed set of expense categories a festival budget is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Flowers, lights, rangoli
    Decoration,
    /// Food offerings and sweets
    Prasad,
    /// Incense, lamps and ritual supplies
    #[serde(rename = "Pooja Items")]
    PoojaItems,
    /// Rentals, transport, seating
    Logistics,
    /// Performances, sound, stage
    #[serde(rename = "Cultural Events")]
    CulturalEvents,
    /// Anything else
    Miscellaneous,
}

impl ExpenseCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::Decoration,
        Self::Prasad,
        Self::PoojaItems,
        Self::Logistics,
        Self::CulturalEvents,
        Self::Miscellaneous,
    ];

    /// Human-readable label, also the stored form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Decoration => "Decoration",
            Self::Prasad => "Prasad",
            Self::PoojaItems => "Pooja Items",
            Self::Logistics => "Logistics",
            Self::CulturalEvents => "Cultural Events",
            Self::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = Error;

    /// Accepts the label ("Pooja Items") or its snake form ("pooja_items"), ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', " ");
        Self::ALL
            .into_iter()
            .find(|cat| cat.label().to_lowercase() == normalized)
            .ok_or_else(|| Error::InvalidExpense {
                reason: format!("unknown category '{s}'"),
            })
    }
}

/// Category an expense is filed under; a stored category that does not parse counts as `Miscellaneous`.
fn filed_under(exp: &expense::Model) -> ExpenseCategory {
    exp.category
        .parse()
        .unwrap_or(ExpenseCategory::Miscellaneous)
}

/// Groups expenses by category. Every category is present, possibly with an empty list.
///
/// Expenses whose stored category does not parse are filed under `Miscellaneous`
/// so the total count is preserved.
#[must_use]
pub fn group_by_category(
    expenses: &[expense::Model],
) -> BTreeMap<ExpenseCategory, Vec<expense::Model>> {
    let mut grouped: BTreeMap<ExpenseCategory, Vec<expense::Model>> = ExpenseCategory::ALL
        .into_iter()
        .map(|cat| (cat, Vec::new()))
        .collect();

    for exp in expenses {
        grouped.entry(filed_under(exp)).or_default().push(exp.clone());
    }

    grouped
}

/// Sum of the amounts of all expenses filed under `category` by `group_by_category`.
#[must_use]
pub fn total_for_category(expenses: &[expense::Model], category: ExpenseCategory) -> f64 {
    expenses
        .iter()
        .filter(|exp| filed_under(exp) == category)
        .map(|exp| exp.amount)
        .sum()
}

/// Per-category totals, one entry per category in display order.
#[must_use]
pub fn category_totals(expenses: &[expense::Model]) -> Vec<(ExpenseCategory, f64)> {
    group_by_category(expenses)
        .into_iter()
        .map(|(cat, items)| (cat, items.iter().map(|exp| exp.amount).sum()))
        .collect()
}
