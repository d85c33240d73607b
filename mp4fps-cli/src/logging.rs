// ============================================================================
// mp4fps-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger initialisation for the CLI
//
// Log records go to stderr so `--json` output on stdout stays parseable.
// RUST_LOG overrides the level chosen from --verbose:
// - RUST_LOG=info (default): one line per rewrite
// - RUST_LOG=debug: every header occurrence
// - RUST_LOG=trace: everything

use std::io::Write;

use console::style;
use env_logger::Env;
use log::Level;

/// Level used when RUST_LOG is unset.
pub fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Initializes env_logger. Safe to call once per process.
pub fn init(verbose: bool) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level(verbose)))
        .format(|buf, record| {
            let level = match record.level() {
                Level::Error => style("ERROR").red().bold(),
                Level::Warn => style("WARN ").yellow(),
                Level::Info => style("INFO ").green(),
                Level::Debug => style("DEBUG").blue(),
                Level::Trace => style("TRACE").magenta(),
            };
            writeln!(buf, "{} {} {}", buf.timestamp(), level, record.args())
        })
        .init();

    log::debug!("Logger initialized (verbose: {verbose})");
}
