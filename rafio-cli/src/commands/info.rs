//! Info command implementation.

use rafio_archive::AfioReader;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

pub fn cmd_info(archive: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(archive)?;
    let file = File::open(archive)?;
    let mut reader = AfioReader::new(BufReader::new(file));

    let mut files = 0usize;
    let mut directories = 0usize;
    let mut others = 0usize;
    let mut payload_total = 0u64;
    let mut header_total = 0u64;

    while let Some(entry) = reader.next_entry()? {
        if entry.is_file() {
            files += 1;
        } else if entry.is_dir() {
            directories += 1;
        } else {
            others += 1;
        }
        payload_total += entry.size;
        header_total += entry.consumed;
    }

    println!("Archive Information");
    println!("===================");
    println!("File: {}", archive.display());
    println!("Format: afio (ASCII magic 070707)");
    println!("Size: {} bytes", metadata.len());
    println!();
    println!("Contents:");
    println!("  Files: {}", files);
    println!("  Directories: {}", directories);
    if others > 0 {
        println!("  Other entries: {}", others);
    }
    println!("  Payload bytes: {}", payload_total);
    println!("  Header overhead: {} bytes", header_total);
    println!("  Entries span: {} bytes", reader.position());
    if metadata.len() > reader.position() {
        println!(
            "  Trailing bytes past last entry: {}",
            metadata.len() - reader.position()
        );
    }

    Ok(())
}
