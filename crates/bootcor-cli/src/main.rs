//! bootcor CLI - bootstrap correlation analysis for tabular data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let parser = cli.parser_config();

    let result = match cli.command {
        Commands::Correlate { file, x, y } => {
            commands::correlate::run(file, x, y, parser, cli.verbose)
        }

        Commands::Bootstrap {
            file,
            pairs,
            n_sim,
            seed,
            alpha,
            threshold,
            output,
            json,
        } => commands::bootstrap::run(
            commands::bootstrap::Options {
                file,
                pairs,
                n_sim,
                seed,
                alpha,
                threshold,
                output,
                json,
            },
            parser,
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
