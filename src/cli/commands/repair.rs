//! `moldmaster repair` command - repair log management

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::commands::mold::resolve_mold;
use crate::cli::helpers::{load_store, open_workspace, truncate_str};
use crate::cli::{table, GlobalOpts};
use crate::core::Config;
use crate::entities::RepairDraft;
use crate::storage::{JsonStorage, Storage};

#[derive(Subcommand, Debug)]
pub enum RepairCommands {
    /// Log a repair against a mold (returns it to Active)
    Log(LogArgs),

    /// List repairs across all molds, newest first
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Mold ID, serial number or unique name fragment
    pub mold: String,

    /// What was done
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Technician name (defaults to the session user, then a generic label)
    #[arg(long, short = 't')]
    pub technician: Option<String>,

    /// Replaced parts as one comma-separated list
    #[arg(long, short = 'p', default_value = "")]
    pub parts: String,

    /// Time spent, in hours
    #[arg(long)]
    pub hours: Option<f64>,

    /// Repair cost
    #[arg(long)]
    pub cost: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Limit to one mold (ID, serial number or name fragment)
    #[arg(long, short = 'm')]
    pub mold: Option<String>,
}

pub fn run(cmd: RepairCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        RepairCommands::Log(args) => run_log(args, global),
        RepairCommands::List(args) => run_list(args, global),
    }
}

fn run_log(args: LogArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = Config::load(Some(&workspace));
    let mut store = load_store(&workspace);

    let id = resolve_mold(&store, &args.mold)?;
    store.select_mold(&id).map_err(|e| miette!("{}", e))?;

    let repair = store
        .log_repair(RepairDraft {
            description: args.description,
            technician: args.technician.or(config.technician),
            parts: args.parts,
            duration_hours: args.hours,
            cost: args.cost,
        })
        .map_err(|e| miette!("{}", e))?;

    let mold_name = repair.mold_name.clone();
    let technician = repair.technician.clone();

    JsonStorage::new(&workspace)
        .save_molds(store.molds())
        .into_diagnostic()?;

    println!(
        "{} Logged repair on {} by {}; mold returned to service.",
        style("✓").green(),
        style(&mold_name).cyan(),
        technician
    );
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let store = load_store(&workspace);

    let mold_filter = match &args.mold {
        Some(reference) => Some(resolve_mold(&store, reference)?),
        None => None,
    };

    let repairs: Vec<_> = store
        .all_repairs()
        .into_iter()
        .filter(|r| mold_filter.as_ref().map_or(true, |id| &r.mold_id == id))
        .collect();

    let rows = repairs
        .iter()
        .map(|r| {
            vec![
                r.date.to_string(),
                r.mold_name.clone(),
                r.technician.clone(),
                truncate_str(&r.description, 36),
                r.parts_replaced.join(", "),
                format!("{}h", r.duration_hours),
            ]
        })
        .collect();

    println!(
        "{}",
        table::render(
            &["Date", "Mold", "Technician", "Description", "Parts", "Duration"],
            rows
        )
    );
    if !global.quiet {
        println!("{} repair(s)", repairs.len());
    }
    Ok(())
}
