//! `moldmaster init` command

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::core::Workspace;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    pub path: Option<PathBuf>,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = match args.path {
        Some(path) => {
            std::fs::create_dir_all(&path).into_diagnostic()?;
            path
        }
        None => std::env::current_dir().into_diagnostic()?,
    };

    let workspace = Workspace::init(&path).into_diagnostic()?;

    println!(
        "{} Initialized MoldMaster workspace at {}",
        style("✓").green(),
        style(workspace.root().display()).cyan()
    );
    println!(
        "   {}",
        style("Inventory seeds on first use; log in with 'moldmaster login <email>'.").dim()
    );

    Ok(())
}
