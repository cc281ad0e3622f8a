//! Marketplace Discord commands - `vendors`, `add_vendor` and `verify_vendor`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            member,
            vendor::{self, NewVendor, VendorCategory, VendorSort},
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Discord rejects messages longer than this
    const MESSAGE_LIMIT: usize = 1900;

    /// Browses the community marketplace.
    #[poise::command(slash_command, prefix_command)]
    pub async fn vendors(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show this category"]
        #[autocomplete = "autocomplete::autocomplete_vendor_category"]
        category: Option<String>,
        #[description = "Order: rating, price_low, price_high, reviews or newest"]
        #[autocomplete = "autocomplete::autocomplete_vendor_sort"]
        sort: Option<String>,
    ) -> Result<()> {
        let category = category
            .as_deref()
            .map(str::parse::<VendorCategory>)
            .transpose()?;
        let sort = sort
            .as_deref()
            .map(str::parse::<VendorSort>)
            .transpose()?
            .unwrap_or_default();

        let listed = vendor::list_vendors(&ctx.data().database, category, sort).await?;
        if listed.is_empty() {
            ctx.say("🏪 No vendors listed yet.").await?;
            return Ok(());
        }

        let mut message = String::new();
        writeln!(&mut message, "🏪 **Marketplace** ({} vendors)\n```", listed.len())?;
        let mut shown = 0;
        for listing in &listed {
            let line = vendor::format_vendor_line(listing);
            if message.len() + line.len() > MESSAGE_LIMIT {
                break;
            }
            writeln!(&mut message, "{line}")?;
            shown += 1;
        }
        message.push_str("```");
        if shown < listed.len() {
            write!(&mut message, "\n…and {} more", listed.len() - shown)?;
        }

        ctx.say(message).await?;
        Ok(())
    }

    /// Lists a vendor in the marketplace. Only management members may add vendors.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_vendor(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Management member listing the vendor"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        added_by: String,
        #[description = "Vendor name"] name: String,
        #[description = "Service category"]
        #[autocomplete = "autocomplete::autocomplete_vendor_category"]
        category: String,
        #[description = "Services offered (at least 50 characters)"] description: String,
        #[description = "Contact phone"] phone: String,
        #[description = "Contact email"] email: String,
        #[description = "Where the vendor operates"] location: String,
        #[description = "Starting price"] starting_price: f64,
        #[description = "Website"] website: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;

        let Some(adder) = member::get_member_by_name(db, data.group_id, &added_by).await? else {
            ctx.say(format!(
                "❌ '{added_by}' is not a member of this group. Use `/members` to see the roster."
            ))
            .await?;
            return Ok(());
        };

        let listing = NewVendor {
            name,
            category,
            description,
            phone,
            email,
            location,
            starting_price,
            website,
            specialties: None,
            image: None,
        };
        let created = vendor::add_vendor(db, data.group_id, adder.id, listing).await?;

        ctx.say(format!(
            "✅ Listed {} (Vendor ID: {}). It is pending review.",
            created.name, created.id
        ))
        .await?;
        Ok(())
    }

    /// Marks a vendor listing as verified.
    #[poise::command(slash_command, prefix_command)]
    pub async fn verify_vendor(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Vendor ID (see /vendors)"] vendor_id: i64,
    ) -> Result<()> {
        let verified = vendor::verify_vendor(&ctx.data().database, vendor_id).await?;
        ctx.say(format!("✅ {} is now verified", verified.name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
