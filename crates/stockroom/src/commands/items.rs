//! Item command handlers.

use std::fmt::Write;

use tabled::Tabled;

use stockroom_core::{Item, ItemId, ItemsApi, PAGE_SIZE, Pagination, format_price, validate};

use crate::cli::{GlobalOpts, ItemsArgs, ItemsCommand, ListArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            price: item.display_price(),
            updated: item
                .updated_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

fn detail(item: &Item) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:       {}", item.id);
    let _ = writeln!(out, "Name:     {}", item.name);
    let _ = writeln!(out, "Price:    {}", format_price(item.price));
    if let Some(created) = item.created_at {
        let _ = writeln!(out, "Created:  {}", created.to_rfc3339());
    }
    if let Some(updated) = item.updated_at {
        let _ = write!(out, "Updated:  {}", updated.to_rfc3339());
    }
    out.trim_end().to_owned()
}

/// Echo the server's copy of a saved item. Servers may accept a write
/// without sending the item back; that is still a success.
fn print_saved(item: Option<&Item>, global: &GlobalOpts, color: bool) -> Result<(), CliError> {
    match item {
        Some(item) => {
            let out = output::render_single(&global.output, item, detail, |i| i.id.to_string())?;
            output::print_output(&out, global.quiet);
        }
        None => output::print_hint(
            "The server did not send the saved item back.",
            color,
            global.quiet,
        ),
    }
    Ok(())
}

/// Offset for `--page N` / `--offset N`, defaulting to the first page.
fn list_offset(args: &ListArgs) -> Result<u64, CliError> {
    match (args.page, args.offset) {
        (Some(0), _) => Err(CliError::Validation {
            field: "page".into(),
            reason: "pages start at 1".into(),
        }),
        (Some(page), _) => Ok((page - 1).saturating_mul(u64::from(PAGE_SIZE))),
        (None, Some(offset)) => Ok(offset),
        (None, None) => Ok(0),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle<A: ItemsApi>(
    api: &A,
    args: ItemsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        ItemsCommand::List(list) => {
            let offset = list_offset(&list)?;
            let page =
                util::with_spinner("Loading items", global.quiet, api.list(offset, PAGE_SIZE))
                    .await?;

            let pagination = Pagination::new(offset, PAGE_SIZE, page.total);
            if page.items.is_empty() && matches!(global.output, OutputFormat::Table) {
                if page.total == 0 {
                    output::print_hint("No items found.", color, global.quiet);
                    output::print_hint("Create one to get started.", color, global.quiet);
                } else {
                    output::print_hint(
                        &format!(
                            "No items on page {}. Last page is {} ({} items).",
                            pagination.current_page(),
                            pagination.total_pages(),
                            page.total
                        ),
                        color,
                        global.quiet,
                    );
                }
                return Ok(());
            }

            let out = output::render_list(
                &global.output,
                &page.items,
                |i| ItemRow::from(i),
                |i| i.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);

            if pagination.is_visible() {
                output::print_hint(
                    &format!("{} ({} items)", pagination.label(), page.total),
                    color,
                    global.quiet,
                );
            }
            Ok(())
        }

        ItemsCommand::Get { id } => {
            let item = api
                .get(&ItemId::from(id.as_str()))
                .await
                .map_err(|e| CliError::from(e).for_item(&id))?;
            let out = output::render_single(&global.output, &item, detail, |i| i.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ItemsCommand::Create { name, price } => {
            let payload = validate(&name, &price)?;
            let created = util::with_spinner("Creating item", global.quiet, api.create(&payload))
                .await?;
            output::print_status("Item created", color, global.quiet);
            print_saved(created.as_ref(), global, color)
        }

        ItemsCommand::Update { id, name, price } => {
            let item_id = ItemId::from(id.as_str());

            // Fill omitted fields from the server's copy.
            let (name, price) = match (name, price) {
                (Some(name), Some(price)) => (name, price),
                (name, price) => {
                    let current = api
                        .get(&item_id)
                        .await
                        .map_err(|e| CliError::from(e).for_item(&id))?;
                    (
                        name.unwrap_or(current.name),
                        price.unwrap_or_else(|| current.price.to_string()),
                    )
                }
            };

            let payload = validate(&name, &price)?;
            let updated = util::with_spinner(
                "Updating item",
                global.quiet,
                api.update(&item_id, &payload),
            )
            .await
            .map_err(|e| CliError::from(e).for_item(&id))?;
            output::print_status("Item updated", color, global.quiet);
            print_saved(updated.as_ref(), global, color)
        }

        ItemsCommand::Delete { id } => {
            if !util::confirm(
                "Are you sure you want to delete this item?",
                "items delete",
                global.yes,
            )? {
                return Ok(());
            }
            api.delete(&ItemId::from(id.as_str()))
                .await
                .map_err(|e| CliError::from(e).for_item(&id))?;
            output::print_status("Item deleted", color, global.quiet);
            Ok(())
        }
    }
}
