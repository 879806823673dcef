//! `moldmaster mold` command - mold inventory management

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::{format_short_id, load_store, open_workspace, truncate_str};
use crate::cli::{table, GlobalOpts};
use crate::core::{Config, EntityId, Store};
use crate::entities::{Mold, MoldDraft, ToolStatus};
use crate::services::{AnalysisProvider, GeminiClient};
use crate::storage::{JsonStorage, Storage};

#[derive(Subcommand, Debug)]
pub enum MoldCommands {
    /// List molds, optionally filtered by a search query
    List(ListArgs),

    /// Add a mold to the inventory
    New(NewArgs),

    /// Show a mold's details and repair history
    Show(ShowArgs),

    /// Change a mold's operational status
    SetStatus(SetStatusArgs),

    /// Request an AI condition analysis for a mold
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive substring match on name or serial number
    #[arg(long, short = 's', default_value = "")]
    pub search: String,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Display name (placeholder if omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Serial number (timestamp-derived if omitted)
    #[arg(long)]
    pub serial: Option<String>,

    /// Manufacturer name
    #[arg(long)]
    pub manufacturer: Option<String>,

    /// Cumulative shot count
    #[arg(long)]
    pub shots: Option<u64>,

    /// Number of cavities
    #[arg(long)]
    pub cavities: Option<u32>,

    /// Image URL or path
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Mold ID, serial number or unique name fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct SetStatusArgs {
    /// Mold ID, serial number or unique name fragment
    pub id: String,

    /// New status
    pub status: ToolStatus,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Mold ID, serial number or unique name fragment
    pub id: String,
}

pub fn run(cmd: MoldCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MoldCommands::List(args) => run_list(args, global),
        MoldCommands::New(args) => run_new(args, global),
        MoldCommands::Show(args) => run_show(args, global),
        MoldCommands::SetStatus(args) => run_set_status(args, global),
        MoldCommands::Analyze(args) => run_analyze(args, global),
    }
}

/// Resolve an operator-supplied reference to a mold id: a full entity id,
/// an exact serial number, or a name fragment matching exactly one mold.
pub fn resolve_mold(store: &Store, reference: &str) -> Result<EntityId> {
    if let Ok(id) = EntityId::parse(reference) {
        if store.find_mold(&id).is_some() {
            return Ok(id);
        }
        return Err(miette!("No mold with id {}", id));
    }

    if let Some(mold) = store
        .molds()
        .iter()
        .find(|m| m.serial_number.eq_ignore_ascii_case(reference))
    {
        return Ok(mold.id.clone());
    }

    let query = reference.to_lowercase();
    let matches: Vec<&Mold> = store
        .molds()
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&query))
        .collect();

    match matches.as_slice() {
        [mold] => Ok(mold.id.clone()),
        [] => Err(miette!("No mold matches '{}'", reference)),
        _ => Err(miette!(
            "'{}' is ambiguous: matches {} molds. Use the id or serial number.",
            reference,
            matches.len()
        )),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let mut store = load_store(&workspace);
    store.set_search(args.search.as_str());

    let molds = store.filtered_molds();
    let rows = molds
        .iter()
        .map(|m| {
            vec![
                format_short_id(&m.id),
                truncate_str(&m.name, 28),
                m.serial_number.clone(),
                m.status.label().to_string(),
                m.total_shots.to_string(),
                m.cavities.to_string(),
                m.repair_history.len().to_string(),
            ]
        })
        .collect();

    println!(
        "{}",
        table::render(
            &["ID", "Name", "Serial", "Status", "Shots", "Cavities", "Repairs"],
            rows
        )
    );
    if !global.quiet {
        println!("{} mold(s)", molds.len());
    }
    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let mut store = load_store(&workspace);

    let mold = store.add_mold(MoldDraft {
        name: args.name,
        serial_number: args.serial,
        manufacturer: args.manufacturer,
        total_shots: args.shots,
        cavities: args.cavities,
        image: args.image,
    });
    let id = mold.id.clone();
    let name = mold.name.clone();

    JsonStorage::new(&workspace)
        .save_molds(store.molds())
        .into_diagnostic()?;

    println!(
        "{} Created mold {} ({})",
        style("✓").green(),
        style(&name).cyan(),
        id
    );
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let store = load_store(&workspace);
    let id = resolve_mold(&store, &args.id)?;
    let mold = store
        .find_mold(&id)
        .ok_or_else(|| miette!("No mold with id {}", id))?;

    println!("{}", style(&mold.name).bold());
    println!("  ID:           {}", mold.id);
    println!("  Serial:       {}", mold.serial_number);
    println!("  Manufacturer: {}", mold.manufacturer);
    println!("  Status:       {}", mold.status.label());
    println!("  Shots:        {}", mold.total_shots);
    println!("  Cavities:     {}", mold.cavities);
    println!("  Shots/cavity: {}", mold.shots_per_cavity());
    if let Some(image) = &mold.image {
        println!("  Image:        {}", image);
    }

    if mold.repair_history.is_empty() {
        println!("  Repairs:      none");
        return Ok(());
    }

    println!();
    let rows = mold
        .repair_history
        .iter()
        .map(|r| {
            vec![
                r.date.to_string(),
                r.technician.clone(),
                truncate_str(&r.description, 40),
                r.parts_replaced.join(", "),
                format!("{}h", r.duration_hours),
            ]
        })
        .collect();
    println!(
        "{}",
        table::render(&["Date", "Technician", "Description", "Parts", "Duration"], rows)
    );
    Ok(())
}

fn run_set_status(args: SetStatusArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let mut store = load_store(&workspace);
    let id = resolve_mold(&store, &args.id)?;

    store
        .set_mold_status(&id, args.status)
        .map_err(|e| miette!("{}", e))?;

    JsonStorage::new(&workspace)
        .save_molds(store.molds())
        .into_diagnostic()?;

    println!(
        "{} Mold {} is now {}",
        style("✓").green(),
        format_short_id(&id),
        style(args.status.label()).cyan()
    );
    Ok(())
}

fn run_analyze(args: AnalyzeArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = Config::load(Some(&workspace));
    let store = load_store(&workspace);
    let id = resolve_mold(&store, &args.id)?;
    let mold = store
        .find_mold(&id)
        .ok_or_else(|| miette!("No mold with id {}", id))?;

    let api_key = config.gemini_api_key.clone().ok_or_else(|| {
        miette!("No Gemini API key configured. Set GEMINI_API_KEY or gemini_api_key in config.yaml.")
    })?;

    if !global.quiet {
        println!(
            "{} Анализ на {}...",
            style("⋯").yellow(),
            style(&mold.name).cyan()
        );
    }

    let client = GeminiClient::new(api_key, config.gemini_model());
    println!("{}", client.analyze(mold));
    Ok(())
}
