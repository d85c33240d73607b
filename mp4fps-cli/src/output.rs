//! Terminal output helpers for human-readable results.

use std::fmt::Display;

use console::style;
use mp4fps_core::{CoreError, HeaderInfo, RewriteResult, format_bytes};

/// Print a heading with colored styling and clear separation
pub fn print_heading(text: &str) {
    let line = style("=".repeat(50)).blue().bright();
    println!("{line}");
    println!("{}", style(format!(" {text} ")).bold().white().bright());
    println!("{line}");
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{}: {}", style(label).cyan().bright(), value);
}

pub fn print_success(message: &str) {
    println!("{} {}", style("[OK]").green(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", style("[WARN]").yellow(), message);
}

/// Prints an error to stderr with its machine status.
pub fn print_error(err: &CoreError) {
    eprintln!(
        "{} {} ({:?})",
        style("Error:").red().bold(),
        err,
        err.kind()
    );
}

pub fn print_rewrite_result(result: &RewriteResult) {
    print_heading("mp4fps patch");
    print_info("Input", result.input_path.display());
    print_info("Output", result.output_path.display());
    print_info("Size", format_bytes(result.file_size));
    for report in &result.reports {
        print_info(&format!("{} headers", report.tag), report.matched);
    }
    for skip in result.skipped() {
        print_warning(&format!(
            "Skipped '{}' at offset {} ({:?})",
            skip.tag, skip.offset, skip.reason
        ));
    }
    if result.input_removed {
        print_info("Input removed", "yes");
    }
    print_success(&result.info());
}

pub fn print_headers(headers: &[HeaderInfo]) {
    print_heading("Header occurrences");
    if headers.is_empty() {
        print_warning("No mvhd/mdhd headers found");
        return;
    }
    for header in headers {
        let fmt_opt = |v: Option<u32>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
        let seconds = header
            .duration_secs()
            .map_or_else(|| "-".to_string(), |s| format!("{s:.3}s"));
        println!(
            "  {} @ {:>10}  v{}  timescale {:>10}  duration {:>10}  ({seconds}){}",
            style(&header.tag).bold(),
            header.offset,
            header.version.map_or_else(|| "?".to_string(), |v| v.to_string()),
            fmt_opt(header.timescale),
            fmt_opt(header.duration),
            if header.is_patchable() { "" } else { "  [skipped by patch]" },
        );
    }
}
