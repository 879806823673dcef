//! `moldmaster status` command - the dashboard

use console::style;
use miette::Result;

use crate::cli::helpers::{load_store, open_workspace};
use crate::cli::{table, GlobalOpts};

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let store = load_store(&workspace);
    let stats = store.stats();

    match store.current_user() {
        Some(user) => println!(
            "Logged in as {} ({})",
            style(&user.email).cyan(),
            user.role
        ),
        None => println!("{}", style("Not logged in.").dim()),
    }
    println!();

    println!("{}", style("Molds").bold());
    println!("  Total:     {}", stats.total_molds);
    println!("  Active:    {}", style(stats.active_molds).green());
    println!("  In repair: {}", style(stats.in_repair_molds).yellow());

    let low = store.low_stock_parts();
    println!();
    if low.is_empty() {
        println!("{}", style("All spare parts above reorder thresholds.").green());
    } else {
        println!(
            "{}",
            style(format!("{} part(s) low on stock:", low.len())).yellow()
        );
        let rows = low
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.sku.clone(),
                    p.quantity.to_string(),
                    p.min_quantity.to_string(),
                    p.location.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            table::render(&["Name", "SKU", "Qty", "Min", "Location"], rows)
        );
    }

    Ok(())
}
