//! Text partition tables
//!
//! Two flavours of the same line-based format are embedded in SafeLoader images. The image
//! partition table describes where each partition lives inside the image payload:
//!
//! ```text
//! fwup-ptn partition-table base 0x00800 size 0x00800\t\r\n
//! fwup-ptn os-image base 0x01000 size 0x113b45\t\r\n
//! ```
//!
//! while the partition-table partition carries the flash layout of the device:
//!
//! ```text
//! partition fs-uboot base 0x00000 size 0x20000\n
//! ```
//!
//! Both tables are terminated by a zero byte and live in a region of `TABLE_SIZE` bytes.

use log::trace;

use super::{FlashPartition, MAX_PARTITIONS};
use crate::Error;

/// Partition names are stored in 32 byte buffers by the bootloader
const MAX_NAME_LEN: usize = 31;

/// Magic header at the start of the partition-table partition
pub const FLASH_TABLE_MAGIC: [u8; 4] = [0x00, 0x04, 0x00, 0x00];

/// The flavour of a text partition table
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TableKind {
    /// The `fwup-ptn` table at the start of the image payload
    Image,
    /// The `partition` table inside the partition-table partition
    Flash,
}

impl TableKind {
    /// Returns the keyword every line of the table starts with
    pub fn keyword(self) -> &'static str {
        match self {
            TableKind::Image => "fwup-ptn",
            TableKind::Flash => "partition",
        }
    }

    fn terminator(self) -> &'static str {
        match self {
            TableKind::Image => "\t\r\n",
            TableKind::Flash => "\n",
        }
    }
}

/// Formats `entries` as table lines without any framing
pub fn encode_lines(kind: TableKind, entries: &[FlashPartition]) -> Vec<u8> {
    let mut buf = Vec::new();

    for entry in entries {
        let line = format!(
            "{} {} base 0x{:05x} size 0x{:05x}{}",
            kind.keyword(),
            entry.name,
            entry.base,
            entry.size,
            kind.terminator()
        );

        buf.extend_from_slice(line.as_bytes());
    }

    buf
}

/// Builds a table region of `region_size` bytes: `prefix`, the table lines, a terminating zero
/// byte and `0xff` padding for the rest of the region.
pub fn encode_region(
    kind: TableKind,
    prefix: &[u8],
    entries: &[FlashPartition],
    region_size: usize,
) -> Result<Vec<u8>, Error> {
    let lines = encode_lines(kind, entries);

    // There has to be room for the terminating zero byte
    if prefix.len() + lines.len() >= region_size {
        return Err(Error::TableOverflow {
            kind: kind.keyword(),
            limit: region_size,
        });
    }

    let mut region = Vec::with_capacity(region_size);

    region.extend_from_slice(prefix);
    region.extend_from_slice(&lines);
    region.push(0);
    region.resize(region_size, 0xff);

    Ok(region)
}

/// Builds the contents of the partition-table partition from the device flash layout
pub fn encode_flash_table(entries: &[FlashPartition], region_size: usize) -> Result<Vec<u8>, Error> {
    encode_region(TableKind::Flash, &FLASH_TABLE_MAGIC, entries, region_size)
}

/// Builds the image partition table that precedes the image payload
pub fn encode_image_table(entries: &[FlashPartition], region_size: usize) -> Result<Vec<u8>, Error> {
    encode_region(TableKind::Image, &[], entries, region_size)
}

/// Parses the leading hexadecimal number of `token`, with an optional `0x` prefix
///
/// Anything following the digits is ignored, just like `strtoul` would.
fn parse_hex(token: &[u8]) -> Result<u32, Error> {
    let digits = token
        .strip_prefix(b"0x")
        .or_else(|| token.strip_prefix(b"0X"))
        .unwrap_or(token);
    let len = digits.iter().take_while(|b| b.is_ascii_hexdigit()).count();

    std::str::from_utf8(&digits[..len])
        .ok()
        .and_then(|s| u32::from_str_radix(s, 16).ok())
        .ok_or_else(|| Error::InvalidNumber(String::from_utf8_lossy(token).into_owned()))
}

/// Decodes the table of the given `kind` at the start of `buf`
///
/// At most `TABLE_SIZE` bytes are considered and the last of them is treated as a terminator.
/// Parsing stops at the first line that doesn't start with the table keyword. If the very first
/// line doesn't, `Error::MissingTableHeader` is returned.
pub fn decode(kind: TableKind, buf: &[u8]) -> Result<Vec<FlashPartition>, Error> {
    let keyword = kind.keyword().as_bytes();
    let limit = buf.len().min(super::TABLE_SIZE - 1);
    let buf = &buf[..limit];

    if !buf.starts_with(keyword) {
        return Err(Error::MissingTableHeader(kind.keyword()));
    }

    let mut entries = Vec::new();
    let mut pos = 0;

    while pos + keyword.len() < buf.len() && buf[pos..].starts_with(keyword) {
        let line_len = match buf[pos..].iter().position(|&b| b == b'\n') {
            Some(len) => len,
            // Every line ends with a newline, so this is the end of a truncated table
            None => break,
        };
        let line = &buf[pos..pos + line_len];

        // keyword, name, "base", base, "size" and the size value running up to the terminator
        let fields: Vec<&[u8]> = line.splitn(6, |&b| b == b' ').collect();

        if fields.len() < 6 {
            return Err(Error::MalformedTable(pos));
        }

        let name = &fields[1][..fields[1].len().min(MAX_NAME_LEN)];
        let base = parse_hex(fields[3])?;
        let size = parse_hex(fields[5])?;

        if entries.len() == MAX_PARTITIONS {
            return Err(Error::TableFull(MAX_PARTITIONS));
        }

        let entry = FlashPartition::new(String::from_utf8_lossy(name), base, size);

        trace!("Parsed {} entry {:?}", kind.keyword(), entry);

        entries.push(entry);
        pos += line_len + 1;
    }

    Ok(entries)
}
