//! `moldmaster user` command - authorized-user roster management

use clap::Subcommand;
use console::style;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::{format_short_id, load_store, open_workspace};
use crate::cli::{table, GlobalOpts};
use crate::core::{EntityId, Store};
use crate::entities::Role;
use crate::storage::{JsonStorage, Storage};

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List the roster
    List(ListArgs),

    /// Add a roster entry
    Add(AddArgs),

    /// Remove a roster entry by id or email
    Remove(RemoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Login email
    pub email: String,

    /// Advisory role
    #[arg(long, short = 'r', default_value = "user")]
    pub role: Role,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// User ID or login email
    pub user: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: UserCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        UserCommands::List(args) => run_list(args, global),
        UserCommands::Add(args) => run_add(args, global),
        UserCommands::Remove(args) => run_remove(args, global),
    }
}

fn run_list(_args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let store = load_store(&workspace);

    let rows = store
        .users()
        .iter()
        .map(|u| {
            vec![
                format_short_id(&u.id),
                u.email.clone(),
                u.role.to_string(),
                u.added_at.to_string(),
            ]
        })
        .collect();

    println!("{}", table::render(&["ID", "Email", "Role", "Added"], rows));
    if !global.quiet {
        println!("{} user(s)", store.users().len());
    }
    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let mut store = load_store(&workspace);

    let user = store
        .add_user(&args.email, args.role)
        .map_err(|e| miette!("{}", e))?;
    let email = user.email.clone();
    let id = user.id.clone();

    JsonStorage::new(&workspace)
        .save_users(store.users())
        .into_diagnostic()?;

    println!(
        "{} Added {} ({}) to the roster ({})",
        style("✓").green(),
        style(&email).cyan(),
        args.role,
        id
    );
    Ok(())
}

/// Resolve a roster reference: a full `USER-` id, or a login email
/// (case-insensitive).
fn resolve_user(store: &Store, reference: &str) -> Result<EntityId> {
    if let Ok(id) = EntityId::parse(reference) {
        if store.users().iter().any(|u| u.id == id) {
            return Ok(id);
        }
        return Err(miette!("No user with id {}", id));
    }

    store
        .users()
        .iter()
        .find(|u| u.matches_email(reference))
        .map(|u| u.id.clone())
        .ok_or_else(|| miette!("No user matches '{}'", reference))
}

fn run_remove(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let mut store = load_store(&workspace);

    let id = resolve_user(&store, &args.user)?;
    let email = store
        .users()
        .iter()
        .find(|u| u.id == id)
        .map(|u| u.email.clone())
        .ok_or_else(|| miette!("No user with id {}", id))?;

    // Confirm if not --yes
    if !args.yes {
        print!("Сигурни ли сте, че искате да премахнете {}? [y/N] ", email);
        std::io::Write::flush(&mut std::io::stdout()).into_diagnostic()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).into_diagnostic()?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let removed = store.remove_user(&id).map_err(|e| miette!("{}", e))?;

    JsonStorage::new(&workspace)
        .save_users(store.users())
        .into_diagnostic()?;

    println!(
        "{} Removed {} from the roster",
        style("✓").green(),
        style(&removed.email).cyan()
    );
    Ok(())
}
