//! afio archive reading.
//!
//! This module provides streaming access to afio/cpio ASCII-header archives
//! (magic `070707`). Entries are visited strictly in order over any
//! forward-only byte source; the archive never needs to fit in memory and
//! the source is never seeked.
//!
//! The reader owns the byte source for its lifetime and is the sole mutator
//! of stream position. Unread payload of the previous entry is discarded
//! automatically when the caller asks for the next one.
//!
//! ```rust,no_run
//! use rafio_archive::AfioReader;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = File::open("backup.afio").unwrap();
//! let mut reader = AfioReader::new(BufReader::new(file));
//! while let Some(entry) = reader.next_entry().unwrap() {
//!     println!("{:>10} {}", entry.size, entry.name);
//! }
//! ```

pub mod header;

use rafio_core::Entry;
use rafio_core::error::{RafioError, Result};
use std::io::{self, Read};

/// Scratch buffer size for discarding unread payload.
const SKIP_BUF_LEN: usize = 8192;

/// Reader lifecycle. Both terminal states are final: a reader that has seen
/// the end of the archive or any error cannot be advanced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Exhausted,
    Failed,
}

/// Streaming reader over an afio archive.
///
/// The reader yields one [`Entry`] per call to [`next_entry`] and exposes
/// the current entry's payload as a bounded byte stream, either through
/// [`read_payload`] or through the [`Read`] implementation. Payload the
/// caller never consumed is skipped transparently on the next advance, so
/// offset accounting stays exact whether or not payloads are read.
///
/// [`next_entry`]: AfioReader::next_entry
/// [`read_payload`]: AfioReader::read_payload
#[derive(Debug)]
pub struct AfioReader<R: Read> {
    reader: R,
    /// Unread payload bytes of the current entry.
    remaining: u64,
    /// Absolute bytes consumed from the source since stream start.
    position: u64,
    state: State,
}

impl<R: Read> AfioReader<R> {
    /// Create a reader owning the given byte source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            remaining: 0,
            position: 0,
            state: State::Scanning,
        }
    }

    /// Advance to the next entry.
    ///
    /// Any unread payload of the previous entry is consumed and discarded
    /// first, whether or not the caller started reading it. Returns
    /// `Ok(None)` exactly once, at the clean end of the archive; after that
    /// (or after any error) the reader is finished and further calls return
    /// [`RafioError::ReaderFinished`].
    ///
    /// Decode failures ([`RafioError::UnrecognizedFormat`],
    /// [`RafioError::MalformedField`], [`RafioError::UnexpectedEof`]) and
    /// payload truncation propagate unchanged.
    pub fn next_entry(&mut self) -> Result<Option<Entry>> {
        match self.state {
            State::Scanning => {}
            State::Exhausted | State::Failed => return Err(RafioError::ReaderFinished),
        }

        if self.remaining > 0 {
            self.skip_payload()?;
        }

        let start = self.position;
        match header::read_entry(&mut self.reader, start) {
            Ok(Some(entry)) => {
                self.remaining = entry.size;
                self.position += entry.consumed;
                Ok(Some(entry))
            }
            Ok(None) => {
                self.state = State::Exhausted;
                Ok(None)
            }
            Err(e) => {
                self.state = State::Failed;
                Err(e)
            }
        }
    }

    /// Read payload bytes of the current entry into `buf`.
    ///
    /// Returns `Ok(0)` once the entry's payload is exhausted; call
    /// [`next_entry`](AfioReader::next_entry) to continue. Reads are capped
    /// to the entry's declared size so the source is never consumed past the
    /// payload boundary. A short read is not an error and mirrors the
    /// underlying source's own partial-read contract.
    ///
    /// The source ending while declared payload bytes remain is
    /// [`RafioError::TruncatedPayload`].
    pub fn read_payload(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.state == State::Failed {
            return Err(RafioError::ReaderFinished);
        }
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let cap = self.remaining.min(buf.len() as u64) as usize;
        let got = loop {
            match self.reader.read(&mut buf[..cap]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.state = State::Failed;
                    return Err(e.into());
                }
            }
        };
        if got == 0 {
            self.state = State::Failed;
            return Err(RafioError::truncated_payload(self.remaining, self.position));
        }

        self.remaining -= got as u64;
        self.position += got as u64;
        Ok(got)
    }

    /// Consume and discard the current entry's unread payload.
    ///
    /// Returns the number of bytes skipped (0 when the payload was already
    /// fully read). The source ending before the declared payload is
    /// exhausted is [`RafioError::TruncatedPayload`]: an entry promising
    /// more bytes than the stream contains is corruption, not a normal end.
    pub fn skip_payload(&mut self) -> Result<u64> {
        if self.state == State::Failed {
            return Err(RafioError::ReaderFinished);
        }

        let mut buf = [0u8; SKIP_BUF_LEN];
        let mut skipped = 0u64;
        while self.remaining > 0 {
            let cap = self.remaining.min(buf.len() as u64) as usize;
            let got = match self.reader.read(&mut buf[..cap]) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.state = State::Failed;
                    return Err(e.into());
                }
            };
            if got == 0 {
                self.state = State::Failed;
                return Err(RafioError::truncated_payload(self.remaining, self.position));
            }
            self.remaining -= got as u64;
            self.position += got as u64;
            skipped += got as u64;
        }
        Ok(skipped)
    }

    /// Absolute bytes consumed from the source since stream start.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Unread payload bytes of the current entry.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Check whether the reader has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.state != State::Scanning
    }

    /// Get a reference to the underlying byte source.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Get a mutable reference to the underlying byte source.
    ///
    /// Reading from the source directly desynchronizes the reader's offset
    /// accounting.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consume the reader and return the underlying byte source.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// The current entry's payload as a standard byte stream.
///
/// `read` returns `Ok(0)` at the end of the entry (not the archive), which
/// makes `io::copy` extract exactly one entry's payload.
impl<R: Read> Read for AfioReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_payload(buf).map_err(|e| match e {
            RafioError::Io(io_err) => io_err,
            other => io::Error::other(other),
        })
    }
}
