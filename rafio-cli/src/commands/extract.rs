//! Extract command implementation.

use crate::utils::{create_spinner, matches_filters};
use filetime::FileTime;
use rafio_archive::AfioReader;
use rafio_core::EntryType;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Options for extracting archive contents.
pub struct ExtractOptions<'a> {
    pub output: &'a Path,
    pub files: &'a [String],
    pub include: &'a [String],
    pub exclude: &'a [String],
    pub verbose: bool,
    pub progress: bool,
}

pub fn cmd_extract(
    archive: &PathBuf,
    options: &ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(archive)?;
    let mut reader = AfioReader::new(BufReader::new(file));

    println!(
        "Extracting {} to {}",
        archive.display(),
        options.output.display()
    );

    // Helper to check if an entry should be extracted
    let should_extract = |name: &str| -> bool {
        // If specific entries are requested, check those first
        if !options.files.is_empty()
            && !options
                .files
                .iter()
                .any(|f| name == f || name.starts_with(&format!("{}/", f)))
        {
            return false;
        }
        // Apply include/exclude filters
        matches_filters(name, options.include, options.exclude)
    };

    let pb = create_spinner(options.progress);
    pb.set_message("entries");

    let mut extracted = 0usize;
    while let Some(entry) = reader.next_entry()? {
        pb.inc(1);

        if !should_extract(&entry.name) {
            // Payload is discarded by the reader on the next advance.
            continue;
        }

        // Unsafe paths are extracted under a neutralized name.
        let safe_name = match entry.validate_path() {
            Ok(()) => entry.name.clone(),
            Err(_) => {
                let sanitized = entry.sanitized_name();
                pb.println(format!(
                    "  Renamed unsafe path: {} -> {}",
                    entry.name, sanitized
                ));
                sanitized
            }
        };
        if safe_name.is_empty() {
            pb.println(format!("  Skipped: {} (empty path)", entry.name));
            continue;
        }

        match entry.entry_type() {
            EntryType::Directory => {
                let dir_path = options.output.join(&safe_name);
                std::fs::create_dir_all(&dir_path)?;
                if options.verbose {
                    pb.println(format!("  Created: {}/", safe_name));
                }
            }
            EntryType::File => {
                let file_path = options.output.join(&safe_name);
                if let Some(parent) = file_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }

                let mut out = File::create(&file_path)?;
                // The reader's Read impl is bounded to the current entry.
                let written = io::copy(&mut reader, &mut out)?;

                filetime::set_file_mtime(
                    &file_path,
                    FileTime::from_unix_time(entry.mtime as i64, 0),
                )?;

                if options.verbose {
                    pb.println(format!("  Extracted: {} ({} bytes)", safe_name, written));
                }
                extracted += 1;
            }
            other => {
                if options.verbose {
                    pb.println(format!("  Skipped: {} ({:?} entry)", entry.name, other));
                }
            }
        }
    }
    pb.finish_with_message("entries read");

    println!("Extracted {} files", extracted);
    Ok(())
}
