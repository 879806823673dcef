//! `moldmaster login` / `moldmaster logout` commands

use console::style;
use dialoguer::Password;
use miette::{miette, IntoDiagnostic, Result};

use crate::cli::helpers::{load_store, open_workspace};
use crate::cli::GlobalOpts;
use crate::core::{Config, Session};

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Roster email
    pub email: String,

    /// Shared passphrase (prompted when omitted)
    #[arg(long)]
    pub passphrase: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct LogoutArgs {}

pub fn run_login(args: LoginArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let config = Config::load(Some(&workspace));
    let mut store = load_store(&workspace);

    let passphrase = match args.passphrase {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Парола")
            .interact()
            .into_diagnostic()?,
    };

    let user = store
        .authenticate(&args.email, &passphrase, config.passphrase())
        .map_err(|e| miette!("{}", e))?;

    Session::new(user.email.as_str())
        .save(&workspace)
        .into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Вход в системата: {} ({})",
            style("✓").green(),
            style(&user.email).cyan(),
            user.role
        );
    }
    Ok(())
}

pub fn run_logout(_args: LogoutArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    Session::clear(&workspace).into_diagnostic()?;

    if !global.quiet {
        println!("{} Излязохте от системата.", style("✓").green());
    }
    Ok(())
}
