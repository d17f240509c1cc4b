//! afio header decoding.
//!
//! The on-wire record format is a 6-byte ASCII magic (`070707`), a 70-byte
//! fixed block of octal ASCII numerals, a name field whose length (including
//! one trailing terminator byte) is declared inside the block, and the raw
//! payload with no padding between records.

use rafio_core::Entry;
use rafio_core::error::{RafioError, Result};
use std::io::{self, Read};

/// Magic bytes identifying the supported ASCII header variant.
pub const MAGIC: [u8; 6] = *b"070707";

/// Length of the fixed header block that follows the magic.
pub const HEADER_LEN: usize = 70;

/// A fixed-width octal ASCII field within the header block.
///
/// Keeping the byte ranges here, next to the decode routine, is what keeps
/// the layout testable independently of any stream state.
struct Field {
    name: &'static str,
    start: usize,
    end: usize,
}

const MODE: Field = Field { name: "mode", start: 12, end: 18 };
const UID: Field = Field { name: "uid", start: 18, end: 24 };
const GID: Field = Field { name: "gid", start: 24, end: 30 };
const MTIME: Field = Field { name: "mtime", start: 42, end: 52 };
const NAMELEN: Field = Field { name: "namelen", start: 53, end: 59 };
const SIZE: Field = Field { name: "size", start: 59, end: 70 };

// Ranges [0..12], [30..42] and byte 52 hold dev/inode/nlink/rdev digits
// that this reader does not surface.

impl Field {
    /// Decode this field from the fixed block.
    ///
    /// Fields are zero- or space-padded octal numerals. Any character other
    /// than an octal digit or padding space is a malformed field, as is a
    /// field with no digits at all.
    fn decode(&self, block: &[u8; HEADER_LEN], offset: u64) -> Result<u64> {
        let digits = block[self.start..self.end].trim_ascii();
        if digits.is_empty() {
            return Err(RafioError::malformed_field(self.name, offset));
        }
        let mut value: u64 = 0;
        for &b in digits {
            if !b.is_ascii_digit() || b > b'7' {
                return Err(RafioError::malformed_field(self.name, offset));
            }
            value = value * 8 + u64::from(b - b'0');
        }
        Ok(value)
    }
}

/// Read one entry header from `rd`.
///
/// `offset` is the absolute stream position at which the magic probe starts;
/// it is stamped into the produced [`Entry`] and into any error. A source
/// that is already exhausted (zero bytes at the magic probe) returns
/// `Ok(None)`: the clean end of the archive.
///
/// When the magic does not match [`MAGIC`] nothing beyond the 6-byte probe
/// has been consumed.
pub fn read_entry<R: Read>(rd: &mut R, offset: u64) -> Result<Option<Entry>> {
    let mut magic = [0u8; 6];
    let got = read_full(rd, &mut magic)?;
    if got == 0 {
        return Ok(None);
    }
    if got < magic.len() {
        return Err(RafioError::unexpected_eof((magic.len() - got) as u64, offset));
    }
    if magic != MAGIC {
        return Err(RafioError::unrecognized_format(magic));
    }

    let mut block = [0u8; HEADER_LEN];
    let got = read_full(rd, &mut block)?;
    if got < HEADER_LEN {
        return Err(RafioError::unexpected_eof((HEADER_LEN - got) as u64, offset));
    }

    let mode = MODE.decode(&block, offset)?;
    let uid = UID.decode(&block, offset)?;
    let gid = GID.decode(&block, offset)?;
    let mtime = MTIME.decode(&block, offset)?;
    let namelen = NAMELEN.decode(&block, offset)?;
    let size = SIZE.decode(&block, offset)?;

    // The name field includes its terminator, so zero cannot frame a name.
    if namelen == 0 {
        return Err(RafioError::malformed_field(NAMELEN.name, offset));
    }

    let mut name = vec![0u8; namelen as usize];
    let got = read_full(rd, &mut name)?;
    if (got as u64) < namelen {
        return Err(RafioError::unexpected_eof(namelen - got as u64, offset));
    }
    // Exactly one trailing terminator byte, discarded without validating
    // its value.
    name.pop();
    let name = String::from_utf8_lossy(&name).into_owned();

    let consumed = (MAGIC.len() + HEADER_LEN) as u64 + namelen;
    Ok(Some(Entry {
        mode: mode as u32,
        uid: uid as u32,
        gid: gid as u32,
        mtime,
        size,
        name,
        offset,
        consumed,
        total_size: consumed + size,
    }))
}

/// Fill `buf` from `rd`, stopping early only at end of stream.
///
/// Returns the number of bytes actually read, which is less than the buffer
/// length only when the stream ended.
fn read_full<R: Read>(rd: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match rd.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Write a zero-padded octal numeral into a fixed-width field.
    fn write_octal(field: &mut [u8], value: u64) {
        let s = format!("{:0width$o}", value, width = field.len());
        field.copy_from_slice(s.as_bytes());
    }

    /// Build the 70-byte fixed block for the given field values.
    fn build_block(mode: u32, uid: u32, gid: u32, mtime: u64, namelen: u64, size: u64) -> [u8; HEADER_LEN] {
        let mut block = [b'0'; HEADER_LEN];
        write_octal(&mut block[12..18], u64::from(mode));
        write_octal(&mut block[18..24], u64::from(uid));
        write_octal(&mut block[24..30], u64::from(gid));
        write_octal(&mut block[42..52], mtime);
        write_octal(&mut block[53..59], namelen);
        write_octal(&mut block[59..70], size);
        block
    }

    /// Encode a complete record: magic, block, name + terminator, payload.
    fn encode_record(mode: u32, name: &str, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&MAGIC);
        let block = build_block(
            mode,
            501,
            100,
            1_000_000_000,
            name.len() as u64 + 1,
            payload.len() as u64,
        );
        out.extend_from_slice(&block);
        out.extend_from_slice(name.as_bytes());
        out.push(0);
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn test_field_decode() {
        let block = build_block(0o100644, 501, 100, 1_000_000_000, 3, 5);
        assert_eq!(MODE.decode(&block, 0).unwrap(), 0o100644);
        assert_eq!(UID.decode(&block, 0).unwrap(), 501);
        assert_eq!(GID.decode(&block, 0).unwrap(), 100);
        assert_eq!(MTIME.decode(&block, 0).unwrap(), 1_000_000_000);
        assert_eq!(NAMELEN.decode(&block, 0).unwrap(), 3);
        assert_eq!(SIZE.decode(&block, 0).unwrap(), 5);
    }

    #[test]
    fn test_field_decode_space_padded() {
        let mut block = build_block(0o644, 0, 0, 0, 3, 5);
        block[12..18].copy_from_slice(b"   644");
        assert_eq!(MODE.decode(&block, 0).unwrap(), 0o644);
    }

    #[test]
    fn test_field_decode_rejects_non_octal() {
        let mut block = build_block(0o644, 0, 0, 0, 3, 5);
        block[59..70].copy_from_slice(b"00000000x05");
        let err = SIZE.decode(&block, 42).unwrap_err();
        match err {
            RafioError::MalformedField { field, offset } => {
                assert_eq!(field, "size");
                assert_eq!(offset, 42);
            }
            other => panic!("unexpected error: {other}"),
        }
        // 8 and 9 are ASCII digits but not octal ones.
        block[59..70].copy_from_slice(b"00000000089");
        assert!(SIZE.decode(&block, 0).is_err());
    }

    #[test]
    fn test_field_decode_rejects_blank() {
        let mut block = build_block(0o644, 0, 0, 0, 3, 5);
        block[18..24].copy_from_slice(b"      ");
        assert!(matches!(
            UID.decode(&block, 0),
            Err(RafioError::MalformedField { field: "uid", .. })
        ));
    }

    #[test]
    fn test_octal_roundtrip() {
        // Fixed-width encode of a decoded field reproduces the original bytes.
        for value in [0u64, 1, 0o644, 0o7777, 0o123456] {
            let mut field = [0u8; 6];
            write_octal(&mut field, value);
            let mut block = [b'0'; HEADER_LEN];
            block[12..18].copy_from_slice(&field);
            assert_eq!(MODE.decode(&block, 0).unwrap(), value);
            let mut reencoded = [0u8; 6];
            write_octal(&mut reencoded, value);
            assert_eq!(reencoded, field);
        }
    }

    #[test]
    fn test_read_entry() {
        let bytes = encode_record(0o100644, "hi", b"HELLO");
        let mut cur = Cursor::new(bytes);
        let entry = read_entry(&mut cur, 0).unwrap().expect("one entry");
        assert_eq!(entry.mode, 0o100644);
        assert_eq!(entry.uid, 501);
        assert_eq!(entry.gid, 100);
        assert_eq!(entry.mtime, 1_000_000_000);
        assert_eq!(entry.name, "hi");
        assert_eq!(entry.size, 5);
        assert_eq!(entry.offset, 0);
        assert_eq!(entry.consumed, 6 + 70 + 3);
        assert_eq!(entry.total_size, entry.consumed + entry.size);
        // Payload is untouched by the header read.
        assert_eq!(cur.position(), entry.consumed);
    }

    #[test]
    fn test_read_entry_clean_eof() {
        let mut cur = Cursor::new(Vec::new());
        assert!(read_entry(&mut cur, 0).unwrap().is_none());
    }

    #[test]
    fn test_read_entry_partial_magic() {
        let mut cur = Cursor::new(b"0707".to_vec());
        assert!(matches!(
            read_entry(&mut cur, 0),
            Err(RafioError::UnexpectedEof { expected: 2, offset: 0 })
        ));
    }

    #[test]
    fn test_read_entry_unrecognized_magic() {
        // The extended variant fails closed, with nothing consumed past
        // the probe.
        let mut bytes = encode_record(0o100644, "hi", b"HELLO");
        bytes[..6].copy_from_slice(b"070717");
        let mut cur = Cursor::new(bytes);
        let err = read_entry(&mut cur, 0).unwrap_err();
        assert!(matches!(
            err,
            RafioError::UnrecognizedFormat { found } if &found == b"070717"
        ));
        assert_eq!(cur.position(), 6);
    }

    #[test]
    fn test_read_entry_truncated_block() {
        let bytes = encode_record(0o100644, "hi", b"HELLO");
        let mut cur = Cursor::new(bytes[..40].to_vec());
        assert!(matches!(
            read_entry(&mut cur, 0),
            Err(RafioError::UnexpectedEof { expected: 36, offset: 0 })
        ));
    }

    #[test]
    fn test_read_entry_truncated_name() {
        let bytes = encode_record(0o100644, "long/path/name.txt", b"");
        let mut cur = Cursor::new(bytes[..6 + 70 + 4].to_vec());
        assert!(matches!(
            read_entry(&mut cur, 0),
            Err(RafioError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_read_entry_zero_namelen() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&build_block(0o100644, 0, 0, 0, 0, 0));
        let mut cur = Cursor::new(bytes);
        assert!(matches!(
            read_entry(&mut cur, 0),
            Err(RafioError::MalformedField { field: "namelen", .. })
        ));
    }

    #[test]
    fn test_read_entry_nonzero_terminator() {
        // The terminator byte is discarded whatever its value.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&build_block(0o100644, 0, 0, 0, 3, 0));
        bytes.extend_from_slice(b"hi0");
        let mut cur = Cursor::new(bytes);
        let entry = read_entry(&mut cur, 0).unwrap().expect("one entry");
        assert_eq!(entry.name, "hi");
    }

    #[test]
    fn test_read_entry_offset_stamped() {
        let bytes = encode_record(0o100644, "hi", b"");
        let mut cur = Cursor::new(bytes);
        let entry = read_entry(&mut cur, 1234).unwrap().expect("one entry");
        assert_eq!(entry.offset, 1234);
    }
}
