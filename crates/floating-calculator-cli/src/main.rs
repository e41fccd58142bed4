//! floatcalc: drive the floating calculator widget from the command line

use clap::Parser;
use floatcalc::{handlers, logging, Cli, CliResult, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet, cli.log_json);

    let config = handlers::load_config(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Commands::Keys(args) => handlers::run_keys(&config, args, &mut stdout),
        Commands::Drag(args) => handlers::run_drag(&config, args, &mut stdout),
        Commands::Config(args) => handlers::run_config(&config, args, &mut stdout),
    }
}
