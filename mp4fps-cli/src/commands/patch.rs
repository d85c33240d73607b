//! Implementation of the 'patch' subcommand.
//!
//! Parses the free-form frame rate, builds the rewrite configuration from the
//! arguments and delegates to `mp4fps_core::rewrite_file`.

use crate::cli::PatchArgs;
use crate::commands::fps_probe;
use crate::error::{CliErrorContext, CliResult};
use crate::output;

use mp4fps_core::{
    FpsProbe, RewriteConfig, RewriteConfigBuilder, RewriteResult, StaticProbe, VersionPolicy,
    parse_fps_text, rewrite_file,
};

use log::debug;

/// Maps CLI arguments onto a RewriteConfig.
pub fn build_config(args: &PatchArgs) -> RewriteConfig {
    let policy = if args.skip_v1 {
        VersionPolicy::SkipVersion1
    } else {
        VersionPolicy::Ignore
    };
    RewriteConfigBuilder::new()
        .ffprobe_path(args.ffprobe.clone())
        .results_dir(args.results_dir.clone())
        .remove_input(args.remove_input)
        .version_policy(policy)
        .build()
}

/// Runs the patch command and prints its result.
pub fn run_patch(args: &PatchArgs) -> CliResult<RewriteResult> {
    let desired_fps = parse_fps_text(&args.fps)?;
    let config = build_config(args);
    debug!("Patch configuration: {config:?}");

    let probe: Box<dyn FpsProbe> = match args.original_fps {
        Some(fps) => Box::new(StaticProbe::new(fps)),
        None => fps_probe(args.probe_backend, &config.ffprobe_path),
    };

    let result = rewrite_file(
        &config,
        probe.as_ref(),
        &args.input,
        desired_fps,
        args.output.as_deref(),
    )?;

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .cli_context("Failed to serialize rewrite result")?;
        println!("{json}");
    } else {
        output::print_rewrite_result(&result);
    }
    Ok(result)
}
