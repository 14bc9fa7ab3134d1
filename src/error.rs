use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {}", _0)]
    Io(#[from] io::Error),

    #[error("Unsupported board {:?}", _0)]
    UnknownBoard(String),

    #[error("Invalid SOURCE_DATE_EPOCH value {:?}", _0)]
    InvalidSourceDateEpoch(String),

    #[error("Invalid revision {:?} - expected r<number>", _0)]
    InvalidRevision(String),

    #[error("Could not find a {} partition table header", _0)]
    MissingTableHeader(&'static str),

    #[error("Malformed partition table entry at offset {:#x}", _0)]
    MalformedTable(usize),

    #[error("Invalid hexadecimal value {:?} in partition table", _0)]
    InvalidNumber(String),

    #[error("Could not find {} partition ({})", _0, _1)]
    MissingPartition(String, &'static str),

    #[error("No flash partition named {} in the device layout", _0)]
    MissingFlashPartition(String),

    #[error("Sysupgrade partition {} does not precede {}", first, last)]
    InvalidSysupgradeRange { first: String, last: String },

    #[error("No free flash partition entry available (limit is {})", _0)]
    TableFull(usize),

    #[error("{} partition table overflows its {:#x} byte region", kind, limit)]
    TableOverflow { kind: &'static str, limit: usize },

    #[error("{} partition too big (more than {} bytes)", name, limit)]
    PartitionTooLarge { name: String, limit: u32 },

    #[error("Kernel of {} bytes overflowed firmware partition of {} bytes", size, limit)]
    KernelTooLarge { size: usize, limit: u32 },

    #[error("Partition name {:?} is not a plain file name", _0)]
    InvalidPartitionName(String),

    #[error("Given output path {} is not a directory", _0.display())]
    NotADirectory(PathBuf),
}
