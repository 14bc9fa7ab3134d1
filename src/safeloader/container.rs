use std::fmt;
use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use log::{debug, warn};

use super::checksum::SaltedDigest;
use super::ptable::{self, TableKind};
use super::{
    FlashPartition, HEADER_SIZE, MD5_SALT, PAYLOAD_OFFSET, PREAMBLE_SIZE, QNEW_PAYLOAD_OFFSET,
    TABLE_SIZE,
};
use crate::Error;

const HEADER_ID_QNEW: &[u8] = b"?NEW";
const HEADER_ID_CLOUD: &[u8] = b"fw-type:Cloud";

/// Number of header bytes inspected when detecting the image variant
const DETECT_LEN: usize = 64;

/// Chunk size used when streaming partitions in and out of images
const CHUNK_SIZE: usize = 4096;

/// The header layout of a SafeLoader image
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Variant {
    /// Standard preamble followed by an opaque header of 0x1000 bytes
    Default,
    /// Standard preamble followed by a length prefixed vendor string, padded with 0xff
    Vendor,
    /// Standard preamble followed by the `fw-type:Cloud` string and unknown data
    Cloud,
    /// Reversed preamble followed by a 0x3c byte block starting with `?NEW` and the standard
    /// header
    QNew,
}

impl Variant {
    /// Detects the variant from the bytes that follow the preamble
    pub fn detect(header: &[u8]) -> Variant {
        if header.starts_with(HEADER_ID_QNEW) {
            Variant::QNew
        } else if header.starts_with(HEADER_ID_CLOUD) {
            Variant::Cloud
        } else if header.len() >= 4 && BigEndian::read_u32(header) as usize <= HEADER_SIZE {
            Variant::Vendor
        } else {
            Variant::Default
        }
    }

    /// Returns the offset of the payload, which starts with the image partition table
    pub fn payload_offset(self) -> usize {
        match self {
            Variant::Default | Variant::Vendor | Variant::Cloud => PAYLOAD_OFFSET,
            Variant::QNew => QNEW_PAYLOAD_OFFSET,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Default => "default",
            Variant::Vendor => "vendor",
            Variant::Cloud => "cloud",
            Variant::QNew => "qnew",
        };

        f.write_str(name)
    }
}

/// Reads up to `TABLE_SIZE` bytes at `offset` and decodes them as a table of the given `kind`
pub(crate) fn read_table<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    kind: TableKind,
) -> Result<Vec<FlashPartition>, Error> {
    let mut buf = Vec::with_capacity(TABLE_SIZE);

    // The table region may be cut short by the end of the image
    reader.seek(SeekFrom::Start(offset))?;
    reader.by_ref().take(TABLE_SIZE as u64).read_to_end(&mut buf)?;

    ptable::decode(kind, &buf)
}

/// Copies the bytes of `entry` from the payload at `payload_offset` in `reader` to `writer`
pub fn copy_partition<R: Read + Seek, W: Write>(
    reader: &mut R,
    payload_offset: usize,
    entry: &FlashPartition,
    writer: &mut W,
) -> Result<(), Error> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut remaining = entry.size as usize;

    reader.seek(SeekFrom::Start(payload_offset as u64 + entry.base as u64))?;

    while remaining > 0 {
        let len = remaining.min(CHUNK_SIZE);

        reader.read_exact(&mut buf[..len])?;
        writer.write_all(&buf[..len])?;

        remaining -= len;
    }

    Ok(())
}

/// The parsed layout of an existing image
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ImageInfo {
    pub variant: Variant,
    pub payload_offset: usize,
    /// The image partition table, with bases relative to `payload_offset`
    pub entries: Vec<FlashPartition>,
}

impl ImageInfo {
    /// Detects the image variant and reads the image partition table
    ///
    /// An image without a partition table yields an empty table.
    pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<ImageInfo, Error> {
        let mut header = [0u8; DETECT_LEN];

        reader.seek(SeekFrom::Start(PREAMBLE_SIZE as u64))?;
        reader.read_exact(&mut header)?;

        let variant = Variant::detect(&header);
        let payload_offset = variant.payload_offset();

        debug!("Detected {} image, payload at {:#x}", variant, payload_offset);

        let entries = match read_table(reader, payload_offset as u64, TableKind::Image) {
            Ok(entries) => entries,
            Err(Error::MissingTableHeader(kind)) => {
                warn!("No {} partition table found at {:#x}", kind, payload_offset);
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        Ok(ImageInfo {
            variant,
            payload_offset,
            entries,
        })
    }

    /// Finds the image partition named `name`
    pub fn find(&self, name: &str) -> Option<&FlashPartition> {
        super::find_partition(&self.entries, name)
    }

    /// Reads the contents of `entry` into memory
    pub fn read_partition<R: Read + Seek>(
        &self,
        reader: &mut R,
        entry: &FlashPartition,
    ) -> Result<Vec<u8>, Error> {
        let mut data = Vec::with_capacity(entry.size as usize);

        copy_partition(reader, self.payload_offset, entry, &mut data)?;

        Ok(data)
    }

    /// Reads the flash layout stored in the partition-table partition
    pub fn read_flash_table<R: Read + Seek>(
        &self,
        reader: &mut R,
        entry: &FlashPartition,
    ) -> Result<Vec<FlashPartition>, Error> {
        let offset = self.payload_offset as u64
            + entry.base as u64
            + ptable::FLASH_TABLE_MAGIC.len() as u64;

        read_table(reader, offset, TableKind::Flash)
    }

    /// Reads the vendor string of a `Variant::Vendor` image
    pub fn read_vendor<R: Read + Seek>(&self, reader: &mut R) -> Result<Vec<u8>, Error> {
        reader.seek(SeekFrom::Start(PREAMBLE_SIZE as u64))?;

        let len = (reader.read_u32::<BigEndian>()? as usize).min(HEADER_SIZE - 4);
        let mut vendor = vec![0u8; len];

        reader.read_exact(&mut vendor)?;

        // The string may be zero terminated before the stored length
        if let Some(end) = vendor.iter().position(|&b| b == 0) {
            vendor.truncate(end);
        }

        Ok(vendor)
    }

    /// Checks the stored image size and checksum against the contents of `reader`
    ///
    /// Returns `None` for QNEW images, whose preamble layout differs.
    pub fn verify<R: Read + Seek>(&self, reader: &mut R) -> Result<Option<Verification>, Error> {
        if self.variant == Variant::QNew {
            return Ok(None);
        }

        let actual_size = reader.seek(SeekFrom::End(0))?;

        reader.seek(SeekFrom::Start(0))?;

        let stored_size = reader.read_u32::<BigEndian>()?;
        let mut stored_checksum = [0u8; 16];
        reader.read_exact(&mut stored_checksum)?;

        let mut digest = SaltedDigest::new(&MD5_SALT);
        let mut buf = [0u8; CHUNK_SIZE];

        loop {
            let len = reader.read(&mut buf)?;

            if len == 0 {
                break;
            }

            digest.update(&buf[..len]);
        }

        Ok(Some(Verification {
            size_matches: stored_size as u64 == actual_size,
            checksum_matches: digest.finish() == stored_checksum,
        }))
    }
}

/// The result of checking an image preamble
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Verification {
    pub size_matches: bool,
    pub checksum_matches: bool,
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn header_with(prefix: &[u8]) -> Vec<u8> {
        let mut header = vec![0xffu8; DETECT_LEN];
        header[..prefix.len()].copy_from_slice(prefix);
        header
    }

    #[test]
    fn it_should_detect_qnew_images() {
        let variant = Variant::detect(&header_with(b"?NEW"));

        assert_eq!(variant, Variant::QNew);
        assert_eq!(variant.payload_offset(), 0x1050);
    }

    #[test]
    fn it_should_detect_cloud_images() {
        let variant = Variant::detect(&header_with(b"fw-type:Cloud"));

        assert_eq!(variant, Variant::Cloud);
        assert_eq!(variant.payload_offset(), 0x1014);
    }

    #[test]
    fn it_should_detect_vendor_images() {
        assert_eq!(Variant::detect(&header_with(&[0, 0, 0x10, 0x00])), Variant::Vendor);
        assert_eq!(Variant::detect(&header_with(&[0, 0, 0, 0])), Variant::Vendor);
        assert_eq!(Variant::Vendor.payload_offset(), 0x1014);
    }

    #[test]
    fn it_should_fall_back_to_default_images() {
        assert_eq!(Variant::detect(&header_with(&[0, 0, 0x10, 0x01])), Variant::Default);
        assert_eq!(Variant::detect(&header_with(&[])), Variant::Default);
        assert_eq!(Variant::Default.payload_offset(), 0x1014);
    }

    #[test]
    fn it_should_copy_partitions_in_chunks() {
        let data: Vec<u8> = (0..10_000u32).map(|i| i as u8).collect();
        let entry = FlashPartition::new("blob", 100, 9000);
        let mut out = Vec::new();

        copy_partition(&mut Cursor::new(&data), 0, &entry, &mut out).unwrap();

        assert_eq!(&out[..], &data[100..9100]);
    }

    #[test]
    fn it_should_fail_on_truncated_partitions() {
        let data = vec![0u8; 100];
        let entry = FlashPartition::new("blob", 50, 100);

        assert!(matches!(
            copy_partition(&mut Cursor::new(&data), 0, &entry, &mut Vec::new()),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn it_should_tolerate_images_without_a_table() {
        let image = vec![0xffu8; PAYLOAD_OFFSET + TABLE_SIZE];
        let info = ImageInfo::from_reader(&mut Cursor::new(&image)).unwrap();

        assert_eq!(info.variant, Variant::Default);
        assert!(info.entries.is_empty());
    }
}
