// Primepath: prime-path coverage engine for control-flow graphs
//
// Loads or extracts a CFG, enumerates its maximal simple paths, filters
// contained sub-paths, and prints the resulting prime-path list.

use anyhow::Result;
use clap::Parser;

use primepath::cli::{cmds, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    run_command(cli)?;

    Ok(())
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command.clone() {
        Commands::Paths(args) => cmds::paths(args, &cli)?,
        Commands::Cfg(args) => cmds::cfg(args, &cli)?,
        Commands::Extract(args) => cmds::extract(args, &cli)?,
    }
    Ok(())
}
