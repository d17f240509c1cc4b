//! List command implementation.

use crate::utils::{matches_filters, print_entries, print_offsets};
use rafio_archive::AfioReader;
use rafio_core::Entry;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// JSON serializable entry data for archive listings.
#[derive(Debug, Serialize, Deserialize)]
struct EntryJson {
    name: String,
    size: u64,
    mode: u32,
    uid: u32,
    gid: u32,
    mtime: u64,
    offset: u64,
    header_bytes: u64,
    total_bytes: u64,
    is_dir: bool,
}

impl EntryJson {
    fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            size: entry.size,
            mode: entry.mode,
            uid: entry.uid,
            gid: entry.gid,
            mtime: entry.mtime,
            offset: entry.offset,
            header_bytes: entry.consumed,
            total_bytes: entry.total_size,
            is_dir: entry.is_dir(),
        }
    }
}

/// JSON output for archive listing.
#[derive(Debug, Serialize, Deserialize)]
struct ArchiveListJson {
    archive: String,
    format: String,
    entries: Vec<EntryJson>,
}

/// Options for listing archive contents.
pub struct ListOptions<'a> {
    pub verbose: bool,
    pub json: bool,
    pub offsets: bool,
    pub include: &'a [String],
    pub exclude: &'a [String],
}

pub fn cmd_list(
    archive: &PathBuf,
    options: &ListOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(archive)?;
    let mut reader = AfioReader::new(BufReader::new(file));

    // One forward pass; payloads are skipped by the reader itself.
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry()? {
        if matches_filters(&entry.name, options.include, options.exclude) {
            entries.push(entry);
        }
    }

    if options.json {
        return cmd_list_json(archive, &entries);
    }

    println!("Archive: {} (afio)", archive.display());
    println!();

    if options.offsets {
        print_offsets(&entries);
    } else {
        print_entries(&entries, options.verbose);
    }

    Ok(())
}

/// Output archive listing as JSON.
fn cmd_list_json(archive: &Path, entries: &[Entry]) -> Result<(), Box<dyn std::error::Error>> {
    let output = ArchiveListJson {
        archive: archive.display().to_string(),
        format: "afio".to_string(),
        entries: entries.iter().map(EntryJson::from_entry).collect(),
    };

    let json_output = serde_json::to_string_pretty(&output)?;
    println!("{}", json_output);

    Ok(())
}
