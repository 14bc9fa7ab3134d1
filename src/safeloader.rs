//! TP-Link SafeLoader image format

mod builder;
mod checksum;
mod container;
pub mod meta;
pub mod ptable;

pub use builder::{pad_jffs2, split_firmware, ImageBuilder};
pub use checksum::{digest, MD5_SALT};
pub use container::{copy_partition, ImageInfo, Variant, Verification};

/// Size of the preamble holding the image size and the MD5 checksum
pub const PREAMBLE_SIZE: usize = 0x14;
/// Size of the vendor/header block following the preamble
pub const HEADER_SIZE: usize = 0x1000;
/// Offset of the payload in DEFAULT, VENDOR and CLOUD images
pub const PAYLOAD_OFFSET: usize = PREAMBLE_SIZE + HEADER_SIZE;

/// Size of the additional header block in front of the standard header of QNEW images
pub const QNEW_HEADER_SIZE: usize = 0x3C;
pub const QNEW_PAYLOAD_OFFSET: usize = PREAMBLE_SIZE + QNEW_HEADER_SIZE + HEADER_SIZE;

/// Fixed size of a partition table region
pub const TABLE_SIZE: usize = 0x800;

/// Maximum number of entries in a partition table
pub const MAX_PARTITIONS: usize = 32;

/// Erase block size used for aligning the file system
pub const ERASE_BLOCK_SIZE: usize = 0x10000;

/// JFFS2 end-of-filesystem marker
pub const JFFS2_EOF_MARK: [u8; 4] = [0xde, 0xad, 0xc0, 0xde];

/// A slot in a partition table - either the physical flash layout or the layout of the payload
/// inside an image.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FlashPartition {
    pub name: String,
    pub base: u32,
    pub size: u32,
}

impl FlashPartition {
    pub fn new<S: Into<String>>(name: S, base: u32, size: u32) -> FlashPartition {
        FlashPartition {
            name: name.into(),
            base,
            size,
        }
    }
}

/// The contents of a logical partition of an image.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ImagePartition {
    pub name: String,
    pub data: Vec<u8>,
}

impl ImagePartition {
    pub fn new<S: Into<String>>(name: S, data: Vec<u8>) -> ImagePartition {
        ImagePartition {
            name: name.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Finds the partition named `name` in `partitions`
pub fn find_partition<'a>(partitions: &'a [FlashPartition], name: &str) -> Option<&'a FlashPartition> {
    partitions.iter().find(|p| p.name == name)
}

/// Rounds `value` up to the next multiple of `align`, which must be a power of two
pub(crate) fn align_up(value: usize, align: usize) -> usize {
    (value + align - 1) & !(align - 1)
}
