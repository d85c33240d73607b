// mp4fps-cli/src/main.rs
//
// Entry point for the mp4fps command-line tool.
//
// Responsibilities include:
// - Parsing user-provided arguments.
// - Setting up logging.
// - Dispatching to the command implementations.
// - Mapping errors to exit codes.

use clap::Parser;
use mp4fps_cli::{Cli, Commands, logging, output, run_inspect, run_patch, run_probe};
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match &cli.command {
        Commands::Patch(args) => run_patch(args).map(|_| ()),
        Commands::Probe(args) => run_probe(args).map(|_| ()),
        Commands::Inspect(args) => run_inspect(args).map(|_| ()),
    };

    if let Err(e) = result {
        log::debug!("Command failed: {e:?}");
        output::print_error(&e);
        process::exit(e.exit_code());
    }
}
