use clap::Parser;
use miette::Result;
use moldmaster::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => moldmaster::cli::commands::init::run(args),
        Commands::Login(args) => moldmaster::cli::commands::login::run_login(args, &global),
        Commands::Logout(args) => moldmaster::cli::commands::login::run_logout(args, &global),
        Commands::Status(args) => moldmaster::cli::commands::status::run(args, &global),
        Commands::Mold(cmd) => moldmaster::cli::commands::mold::run(cmd, &global),
        Commands::Repair(cmd) => moldmaster::cli::commands::repair::run(cmd, &global),
        Commands::Part(cmd) => moldmaster::cli::commands::part::run(cmd, &global),
        Commands::User(cmd) => moldmaster::cli::commands::user::run(cmd, &global),
    }
}
