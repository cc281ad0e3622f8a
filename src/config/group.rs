//! Group seed configuration loading from config.toml
//!
//! The file describes one festival group: its name and budget, the member
//! roster, any expenses already incurred and the marketplace vendors it lists. `core::group::seed_group` writes it
//! to the database on first start.

use crate::{
    core::vendor::NewVendor,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
pub struct GroupConfig {
    /// The group itself
    pub group: GroupSection,
    /// Initial roster
    #[serde(default)]
    pub members: Vec<MemberConfig>,
    /// Expenses incurred before the ledger was set up
    #[serde(default)]
    pub expenses: Vec<ExpenseConfig>,
    /// Marketplace vendors the group lists
    #[serde(default)]
    pub vendors: Vec<VendorConfig>,
}

/// The `[group]` table
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSection {
    /// Unique group name
    pub name: String,
    /// Pledged budget
    pub total_budget: f64,
}

/// One `[[members]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct MemberConfig {
    /// Display name, unique within the group
    pub name: String,
    /// Role key or label, e.g. `"prasad_preparation"`
    pub role: String,
    /// Defaults to an even share of the budget
    pub expected_amount: Option<f64>,
    /// Already contributed
    #[serde(default)]
    pub contributed_amount: f64,
}

/// One `[[expenses]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseConfig {
    /// Category label, e.g. `"Pooja Items"`
    pub category: String,
    /// What the money was spent on
    pub description: String,
    /// Amount spent
    pub amount: f64,
    /// Name of the responsible member
    pub assigned_to: String,
    /// Date incurred, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Optional receipt reference
    pub receipt: Option<String>,
}

/// One `[[vendors]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct VendorConfig {
    /// Name of the management member listing the vendor
    pub added_by: String,
    /// The listing itself
    #[serde(flatten)]
    pub listing: NewVendor,
}

/// Loads group configuration from a TOML file
///
/// # Errors
/// Returns `Error::Config` if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GroupConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    parse_config(&contents)
}

/// Loads group configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<GroupConfig> {
    load_config("config.toml")
}

fn parse_config(contents: &str) -> Result<GroupConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse group config: {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_group_config() {
        let toml_str = r#"
            [group]
            name = "Diwali Celebration 2024"
            total_budget = 5000.0

            [[members]]
            name = "Rajesh Kumar"
            role = "management"
            expected_amount = 417.0
            contributed_amount = 417.0

            [[members]]
            name = "Kavya Reddy"
            role = "Cultural Events"

            [[expenses]]
            category = "Decoration"
            description = "Marigold flowers and rangoli materials"
            amount = 250.0
            assigned_to = "Rajesh Kumar"
            date = "2024-08-25"
            receipt = "receipts/marigold.jpg"

            [[vendors]]
            added_by = "Rajesh Kumar"
            name = "Elegant Decorations"
            category = "decoration"
            description = "Traditional festival decorations with a modern touch, rangoli and lighting."
            phone = "+1-555-0201"
            email = "info@elegantdecorations.com"
            location = "Edison, NJ"
            starting_price = 299.0
        "#;

        let config = parse_config(toml_str).unwrap();

        assert_eq!(config.group.name, "Diwali Celebration 2024");
        assert_eq!(config.group.total_budget, 5000.0);
        assert_eq!(config.members.len(), 2);
        assert_eq!(config.members[0].expected_amount, Some(417.0));
        assert_eq!(config.members[1].expected_amount, None);
        assert_eq!(config.members[1].contributed_amount, 0.0);
        assert_eq!(config.expenses[0].date, NaiveDate::from_ymd_opt(2024, 8, 25).unwrap());
        assert_eq!(
            config.expenses[0].receipt.as_deref(),
            Some("receipts/marigold.jpg")
        );
        assert_eq!(config.vendors[0].added_by, "Rajesh Kumar");
        assert_eq!(config.vendors[0].listing.starting_price, 299.0);
        assert!(config.vendors[0].listing.website.is_none());
    }

    #[test]
    fn test_group_only_config() {
        let config = parse_config("[group]\nname = \"Holi\"\ntotal_budget = 800.0\n").unwrap();
        assert!(config.members.is_empty());
        assert!(config.expenses.is_empty());
        assert!(config.vendors.is_empty());
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = load_default_config().unwrap();
        assert_eq!(config.members.len(), 6);
        assert_eq!(config.expenses.len(), 6);
        assert_eq!(config.vendors.len(), 2);
    }

    #[test]
    fn test_invalid_config() {
        let result = parse_config("[group]\nname = \"Holi\"\n");
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
