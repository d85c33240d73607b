//! Implementation of the 'inspect' subcommand.

use std::fs;

use crate::cli::InspectArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::output::print_headers;

use mp4fps_core::{HeaderInfo, inspect_container};

/// Lists header occurrences without modifying the file.
pub fn run_inspect(args: &InspectArgs) -> CliResult<Vec<HeaderInfo>> {
    let bytes = fs::read(&args.input)
        .cli_with_context(|| format!("Failed to read '{}'", args.input.display()))?;
    let headers = inspect_container(&bytes);

    if args.json {
        let json = serde_json::to_string_pretty(&headers)
            .cli_context("Failed to serialize headers")?;
        println!("{json}");
    } else {
        print_headers(&headers);
    }
    Ok(headers)
}
