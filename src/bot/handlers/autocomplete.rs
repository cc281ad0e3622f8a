//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions match the partial input case-insensitively anywhere in the
//! candidate and are capped at Discord's limit of 25.

use crate::{
    bot::BotData,
    core::{
        category::ExpenseCategory,
        member::{self, MemberRole},
        vendor::{VendorCategory, VendorSort},
    },
    errors::Error,
};

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

fn matching<I>(candidates: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let partial_lower = partial.to_lowercase();
    candidates
        .into_iter()
        .filter(|c| c.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests member names of the bot's group, alphabetically.
///
/// Returns nothing if the roster cannot be loaded.
pub async fn autocomplete_member_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let data = ctx.data();

    let Ok(members) = member::get_members_for_group(&data.database, data.group_id).await else {
        return Vec::new();
    };

    let mut names: Vec<String> = members.into_iter().map(|m| m.name).collect();
    names.sort();
    matching(names, partial)
}

/// Suggests expense category labels.
pub async fn autocomplete_category(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    category_suggestions(partial)
}

/// Suggests member role labels.
pub async fn autocomplete_role(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    role_suggestions(partial)
}

/// Suggests vendor category labels.
pub async fn autocomplete_vendor_category(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    vendor_category_suggestions(partial)
}

/// Suggests vendor sort orders.
pub async fn autocomplete_vendor_sort(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(VendorSort::ALL.iter().map(|s| s.key().to_string()), partial)
}

fn vendor_category_suggestions(partial: &str) -> Vec<String> {
    matching(
        VendorCategory::ALL.iter().map(|c| c.label().to_string()),
        partial,
    )
}

fn category_suggestions(partial: &str) -> Vec<String> {
    matching(
        ExpenseCategory::ALL.iter().map(|c| c.label().to_string()),
        partial,
    )
}

fn role_suggestions(partial: &str) -> Vec<String> {
    matching(MemberRole::ALL.iter().map(|r| r.label().to_string()), partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_suggestions() {
        assert_eq!(category_suggestions("pooja"), vec!["Pooja Items"]);
        assert_eq!(category_suggestions("").len(), ExpenseCategory::ALL.len());
        assert_eq!(
            category_suggestions("EVENT"),
            vec!["Cultural Events".to_string()]
        );
    }

    #[test]
    fn test_role_suggestions() {
        assert_eq!(
            role_suggestions("prasad"),
            vec!["Prasad Preparation".to_string()]
        );
        assert!(role_suggestions("xyz").is_empty());
    }

    #[test]
    fn test_vendor_category_suggestions() {
        assert_eq!(
            vendor_category_suggestions("sound"),
            vec!["Sound & Lighting".to_string()]
        );
        assert_eq!(
            vendor_category_suggestions("").len(),
            VendorCategory::ALL.len()
        );
    }

    #[test]
    fn test_suggestions_capped() {
        let many = (0..40).map(|i| format!("Member {i}"));
        assert_eq!(matching(many, "member").len(), MAX_SUGGESTIONS);
    }
}
