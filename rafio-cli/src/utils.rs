//! Utility functions for the CLI.

use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use rafio_core::Entry;

/// Create a streaming progress spinner with standard styling.
///
/// The archive is read in one forward pass, so the number of entries is not
/// known up front; a spinner with a live entry count is used instead of a
/// bounded bar.
pub fn create_spinner(enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {pos} {msg}")
            .expect("progress spinner template is valid"),
    );
    pb
}

/// Check if an entry name matches the filter patterns.
/// - If include patterns are specified, the name must match at least one
/// - If exclude patterns are specified, the name must not match any
pub fn matches_filters(name: &str, include: &[String], exclude: &[String]) -> bool {
    // Check exclude patterns first
    for pattern_str in exclude {
        if let Ok(pattern) = Pattern::new(pattern_str) {
            if pattern.matches(name) {
                return false;
            }
        }
    }

    // If no include patterns, include everything (that wasn't excluded)
    if include.is_empty() {
        return true;
    }

    // Check include patterns
    for pattern_str in include {
        if let Ok(pattern) = Pattern::new(pattern_str) {
            if pattern.matches(name) {
                return true;
            }
        }
    }

    false
}

/// Print entries in a formatted table.
pub fn print_entries(entries: &[Entry], verbose: bool) {
    if verbose {
        println!(
            "{:>5} {:>6} {:>6} {:>11} {:>10}  Name",
            "Mode", "UID", "GID", "MTime", "Size",
        );
        println!("{}", "-".repeat(60));

        for entry in entries {
            println!(
                "{}{:04o} {:>6} {:>6} {:>11} {:>10}  {}",
                entry.entry_type().indicator(),
                entry.permissions(),
                entry.uid,
                entry.gid,
                entry.mtime,
                entry.size,
                entry.name
            );
        }

        println!("{}", "-".repeat(60));
    } else {
        for entry in entries {
            println!("{}", entry);
        }
        println!();
    }

    let total: u64 = entries.iter().map(|e| e.size).sum();
    println!("{} entries, {} payload bytes", entries.len(), total);
}

/// Print per-entry stream offset accounting.
pub fn print_offsets(entries: &[Entry]) {
    println!(
        "{:>10} {:>8} {:>10} {:>10}  Name",
        "Offset", "Header", "Payload", "Total",
    );
    println!("{}", "-".repeat(60));

    for entry in entries {
        println!(
            "{:>10} {:>8} {:>10} {:>10}  {}",
            entry.offset, entry.consumed, entry.size, entry.total_size, entry.name
        );
    }
}
