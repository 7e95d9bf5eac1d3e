use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use passkeep::cli::commands;
use passkeep::cli::output;
use passkeep::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("PASSKEEP_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("passkeep=debug")
        } else {
            EnvFilter::new("passkeep=warn")
        }
    });

    // Logs go to stderr so `get --show` output stays pipeable.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Login => commands::login::execute(&cli),
        Commands::Logout => commands::logout::execute(&cli),
        Commands::Add {
            ref name,
            ref user,
            ref secret,
        } => commands::add::execute(&cli, name, user.as_deref(), secret.as_deref()),
        Commands::Get {
            ref identifier,
            show,
        } => commands::get::execute(&cli, identifier, show),
        Commands::List {
            ref pattern,
            fuzzy,
            ref field,
        } => commands::list::execute(&cli, pattern.as_deref(), fuzzy, field),
        Commands::Rm {
            ref identifier,
            force,
        } => commands::rm::execute(&cli, identifier, force),
        Commands::Edit { ref identifier } => commands::edit::execute(&cli, identifier),
        Commands::Master => commands::master::execute(&cli),
        Commands::Version => commands::version::execute(),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
