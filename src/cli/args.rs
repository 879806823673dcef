//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    init::InitArgs,
    login::{LoginArgs, LogoutArgs},
    mold::MoldCommands,
    part::PartCommands,
    repair::RepairCommands,
    status::StatusArgs,
    user::UserCommands,
};

#[derive(Parser)]
#[command(name = "moldmaster")]
#[command(author, version, about = "MoldMaster - injection-mold maintenance tracking")]
#[command(
    long_about = "Maintenance tracking for injection-mold tooling: mold inventory, repair logs, spare-part stock and the authorized-user roster, kept as JSON files in a local workspace."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Workspace root (default: auto-detect by finding .moldmaster/)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new MoldMaster workspace
    Init(InitArgs),

    /// Log in with a roster email and the shared passphrase
    Login(LoginArgs),

    /// End the current session
    Logout(LogoutArgs),

    /// Dashboard: mold counts and low-stock parts
    Status(StatusArgs),

    /// Mold inventory management
    #[command(subcommand)]
    Mold(MoldCommands),

    /// Repair log management
    #[command(subcommand)]
    Repair(RepairCommands),

    /// Spare-part stock management
    #[command(subcommand)]
    Part(PartCommands),

    /// Authorized-user roster management
    #[command(subcommand)]
    User(UserCommands),
}
