// Pathcov: Coverage-Driven Test Path Generation
//
// Loads a control-flow graph, lists the requirement paths of a coverage
// criterion and prints the test paths that cover them.

use anyhow::Result;
use clap::Parser;

use pathcov::cli::{self, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run_command(cli)?;

    Ok(())
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Validate(args) => cli::cmds::validate(args, &cli)?,
        Commands::Requirements(args) => cli::cmds::requirements(args, &cli)?,
        Commands::Cover(args) => cli::cmds::cover(args, &cli)?,
        Commands::Criteria(args) => cli::cmds::criteria(args, &cli)?,
    }
    Ok(())
}
