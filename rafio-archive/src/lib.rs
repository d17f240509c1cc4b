//! # rafio Archive
//!
//! Streaming afio container support for rafio.
//!
//! This crate reads the legacy afio/cpio ASCII-header archive format
//! (magic `070707`) as a forward-only sequence of entries. No seeking, no
//! whole-archive buffering: each entry's header is decoded as it is
//! reached, and its payload is exposed as a bounded byte stream that the
//! caller may read, partially read, or ignore entirely.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rafio_archive::AfioReader;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = File::open("work.afz").unwrap();
//! let mut reader = AfioReader::new(BufReader::new(file));
//! while let Some(entry) = reader.next_entry().unwrap() {
//!     println!("{} at offset {}", entry.name, entry.offset);
//! }
//! ```
//!
//! Only the `070707` ASCII variant is recognized. The extended (`070717`)
//! and large (`070727`) header variants fail closed with
//! [`rafio_core::RafioError::UnrecognizedFormat`] rather than risking a
//! best-effort misparse.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod afio;

// Re-exports
pub use afio::AfioReader;
pub use afio::header::{HEADER_LEN, MAGIC};
