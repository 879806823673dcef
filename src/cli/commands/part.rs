//! `moldmaster part` command - spare-part stock management

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::{format_short_id, load_store, open_workspace};
use crate::cli::{table, GlobalOpts};
use crate::core::{EntityId, Store};
use crate::entities::PartDraft;
use crate::storage::{JsonStorage, Storage};

#[derive(Subcommand, Debug)]
pub enum PartCommands {
    /// List spare parts and their stock levels
    List(ListArgs),

    /// Add a spare part
    New(NewArgs),

    /// Order a restock of 10 units for a part
    Order(OrderArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only parts at or below their reorder threshold
    #[arg(long)]
    pub low: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Display name (placeholder if omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// SKU (timestamp-derived if omitted)
    #[arg(long)]
    pub sku: Option<String>,

    /// Quantity on hand
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Reorder threshold
    #[arg(long)]
    pub min_quantity: Option<u32>,

    /// Storage location label
    #[arg(long)]
    pub location: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct OrderArgs {
    /// Part ID or exact SKU
    pub id: String,
}

pub fn run(cmd: PartCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PartCommands::List(args) => run_list(args, global),
        PartCommands::New(args) => run_new(args, global),
        PartCommands::Order(args) => run_order(args, global),
    }
}

/// Resolve an operator-supplied reference to a part id: a full entity id
/// or an exact SKU.
fn resolve_part(store: &Store, reference: &str) -> Result<EntityId> {
    if let Ok(id) = EntityId::parse(reference) {
        if store.find_part(&id).is_some() {
            return Ok(id);
        }
        return Err(miette!("No spare part with id {}", id));
    }

    store
        .parts()
        .iter()
        .find(|p| p.sku.eq_ignore_ascii_case(reference))
        .map(|p| p.id.clone())
        .ok_or_else(|| miette!("No spare part matches '{}'", reference))
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let store = load_store(&workspace);

    let parts: Vec<_> = store
        .parts()
        .iter()
        .filter(|p| !args.low || p.is_low_stock())
        .collect();

    let rows = parts
        .iter()
        .map(|p| {
            let stock = if p.is_low_stock() {
                format!("{} ⚠", p.quantity)
            } else {
                p.quantity.to_string()
            };
            vec![
                format_short_id(&p.id),
                p.name.clone(),
                p.sku.clone(),
                stock,
                p.min_quantity.to_string(),
                p.location.clone(),
            ]
        })
        .collect();

    println!(
        "{}",
        table::render(&["ID", "Name", "SKU", "Qty", "Min", "Location"], rows)
    );
    if !global.quiet {
        println!("{} part(s)", parts.len());
    }
    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let mut store = load_store(&workspace);

    let part = store.add_part(PartDraft {
        name: args.name,
        sku: args.sku,
        quantity: args.quantity,
        min_quantity: args.min_quantity,
        location: args.location,
    });
    let name = part.name.clone();
    let id = part.id.clone();

    JsonStorage::new(&workspace)
        .save_parts(store.parts())
        .into_diagnostic()?;

    println!(
        "{} Created part {} ({})",
        style("✓").green(),
        style(&name).cyan(),
        id
    );
    Ok(())
}

fn run_order(args: OrderArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let mut store = load_store(&workspace);
    let id = resolve_part(&store, &args.id)?;

    let new_quantity = store.order_part(&id).map_err(|e| miette!("{}", e))?;

    JsonStorage::new(&workspace)
        .save_parts(store.parts())
        .into_diagnostic()?;

    println!(
        "{} Симулирана поръчка: Добавени са 10 единици към наличността.",
        style("✓").green()
    );
    if !global.quiet {
        println!("   Наличност: {}", new_quantity);
    }
    Ok(())
}
