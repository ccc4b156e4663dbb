//! deepzip CLI - recursive, containment-checked ZIP extraction.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(&cli);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.quiet && !cli.json && progress::CliProgress::should_show();

    match &cli.command {
        cli::Commands::Extract(args) => commands::extract::execute(args, &*formatter, show_progress),
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
        cli::Commands::Probe(args) => commands::probe::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}

/// `RUST_LOG` wins over the verbosity flags.
fn init_logging(cli: &cli::Cli) {
    let default_level = if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
