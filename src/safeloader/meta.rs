//! Meta partitions
//!
//! The soft-version, support-list and extra-para partitions share a common framing: an 8 byte
//! header holding the big endian payload length followed by four zero bytes, the payload itself
//! and, depending on the device, a single trailing pad byte.

use std::convert::TryFrom;
use std::io::{Cursor, Read};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use log::debug;

use super::ImagePartition;
use crate::Error;

/// Size of the length header in front of every meta partition payload
pub const META_HEADER_SIZE: usize = 8;

/// What to append after the payload of a meta partition
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Trailer {
    /// Append a single byte with the given value
    Pad(u8),
    /// Don't append anything
    None,
}

/// How the soft-version partition of a device is generated
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SoftVersion {
    /// A literal text, stored including its terminating zero byte
    Text(&'static str),
    /// A binary record with the given major, minor and patch version and the build date
    Numeric(u8, u8, u8),
}

/// Wraps `payload` in a meta partition header and appends the `trailer`
pub fn make_meta(payload: &[u8], trailer: Trailer) -> Vec<u8> {
    let mut buf = Vec::with_capacity(META_HEADER_SIZE + payload.len() + 1);

    buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(&[0u8; 4]);
    buf.extend_from_slice(payload);

    if let Trailer::Pad(value) = trailer {
        buf.push(value);
    }

    buf
}

/// Returns the payload of the meta partition `data`, or `None` if it's too short to carry a
/// header
///
/// A length that runs past the end of `data` is clamped to what's available.
pub fn meta_payload(data: &[u8]) -> Option<&[u8]> {
    if data.len() < META_HEADER_SIZE {
        return None;
    }

    let len = BigEndian::read_u32(&data[0..4]) as usize;
    let end = (META_HEADER_SIZE + len).min(data.len());

    Some(&data[META_HEADER_SIZE..end])
}

/// Generates a binary-coded decimal representation of an integer in the range [0, 99]
pub fn bcd(value: u8) -> u8 {
    0x10 * (value / 10) + value % 10
}

/// The binary soft-version record
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SoftVersionRecord {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    /// BCD encoded year (hundreds and the rest), month and day
    pub date: [u8; 4],
    pub revision: u32,
    /// Compatibility level - a level of 0 is not stored at all, for older bootloaders
    pub compat_level: u32,
}

impl SoftVersionRecord {
    /// Length of the record when it includes the compatibility level
    pub const LEN: usize = 16;
    /// Length of the record up to and including the revision
    pub const LEN_WITHOUT_COMPAT_LEVEL: usize = 12;

    pub fn new(version: (u8, u8, u8), date: NaiveDate, revision: u32, compat_level: u32) -> Self {
        let year = date.year() as u32;

        SoftVersionRecord {
            major: version.0,
            minor: version.1,
            patch: version.2,
            date: [
                bcd((year / 100 % 100) as u8),
                bcd((year % 100) as u8),
                bcd(date.month() as u8),
                bcd(date.day() as u8),
            ],
            revision,
            compat_level,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::LEN);

        buf.push(0xff);
        buf.extend_from_slice(&[self.major, self.minor, self.patch]);
        buf.extend_from_slice(&self.date);
        buf.extend_from_slice(&self.revision.to_be_bytes());

        if self.compat_level != 0 {
            buf.extend_from_slice(&self.compat_level.to_be_bytes());
        }

        buf
    }

    /// Parses a record from `buf`, returning `None` if it ends before the revision
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::LEN_WITHOUT_COMPAT_LEVEL {
            return None;
        }

        let mut cursor = Cursor::new(buf);

        // Skip the pad byte
        cursor.set_position(1);

        let major = cursor.read_u8().ok()?;
        let minor = cursor.read_u8().ok()?;
        let patch = cursor.read_u8().ok()?;

        let mut date = [0u8; 4];
        cursor.read_exact(&mut date).ok()?;

        let revision = cursor.read_u32::<BigEndian>().ok()?;
        let compat_level = cursor.read_u32::<BigEndian>().unwrap_or(0);

        Some(SoftVersionRecord {
            major,
            minor,
            patch,
            date,
            revision,
            compat_level,
        })
    }

    /// Formats the BCD date as `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        format!(
            "{:02x}{:02x}-{:02x}-{:02x}",
            self.date[0], self.date[1], self.date[2], self.date[3]
        )
    }
}

/// Resolves the build date, honouring a `SOURCE_DATE_EPOCH` style override
///
/// An empty override counts as unset.
pub fn build_date(source_date_epoch: Option<&str>) -> Result<NaiveDate, Error> {
    match source_date_epoch.filter(|s| !s.is_empty()) {
        Some(value) => {
            let invalid = || Error::InvalidSourceDateEpoch(value.to_owned());
            let secs: u64 = value.parse().map_err(|_| invalid())?;
            let time = i64::try_from(secs)
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .ok_or_else(invalid)?;

            debug!("Using build date {} from SOURCE_DATE_EPOCH", time.date_naive());

            Ok(time.date_naive())
        }
        None => Ok(Utc::now().date_naive()),
    }
}

/// Generates the soft-version partition
pub fn make_soft_version(
    name: &str,
    version: SoftVersion,
    compat_level: u32,
    revision: u32,
    date: NaiveDate,
    trailer: Trailer,
) -> ImagePartition {
    let payload = match version {
        SoftVersion::Text(text) => {
            let mut payload = text.as_bytes().to_vec();
            payload.push(0);
            payload
        }
        SoftVersion::Numeric(major, minor, patch) => {
            SoftVersionRecord::new((major, minor, patch), date, revision, compat_level).to_bytes()
        }
    };

    ImagePartition::new(name, make_meta(&payload, trailer))
}

/// Generates the support-list partition
pub fn make_support_list(name: &str, support_list: &str, trailer: Trailer) -> ImagePartition {
    ImagePartition::new(name, make_meta(support_list.as_bytes(), trailer))
}

/// Generates the extra-para partition
pub fn make_extra_para(name: &str, flags: [u8; 2], trailer: Trailer) -> ImagePartition {
    ImagePartition::new(name, make_meta(&flags, trailer))
}
