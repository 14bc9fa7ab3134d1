//! Device layouts

mod table;

use crate::safeloader::meta::{SoftVersion, Trailer};
use crate::safeloader::{FlashPartition, MAX_PARTITIONS};
use crate::Error;

pub use table::BOARDS;

/// Names of the partitions that make up an image
///
/// Some devices keep two copies of the firmware and expect the partitions to carry a suffix.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PartitionNames {
    pub partition_table: &'static str,
    pub soft_version: &'static str,
    pub os_image: &'static str,
    pub support_list: &'static str,
    pub file_system: &'static str,
    pub extra_para: &'static str,
}

impl PartitionNames {
    pub const DEFAULT: PartitionNames = PartitionNames {
        partition_table: "partition-table",
        soft_version: "soft-version",
        os_image: "os-image",
        support_list: "support-list",
        file_system: "file-system",
        extra_para: "extra-para",
    };
}

/// A static board description as it appears in the board table
#[derive(Debug)]
pub struct Board {
    pub id: &'static str,
    /// Vendor string written to the header of factory images
    pub vendor: Option<&'static str>,
    pub support_list: &'static str,
    pub trailer: Trailer,
    pub soft_version: SoftVersion,
    pub compat_level: u32,
    /// Flash layout as (name, base, size)
    pub partitions: &'static [(&'static str, u32, u32)],
    pub first_sysupgrade_partition: &'static str,
    pub last_sysupgrade_partition: &'static str,
    pub partition_names: PartitionNames,
}

/// Devices that need an extra-para partition to accept the firmware, and its contents
const EXTRA_PARA_QUIRKS: &[(&[&str], [u8; 2])] = &[
    (
        &[
            "ARCHER-A6-V3",
            "ARCHER-A7-V5",
            "ARCHER-A9-V6",
            "ARCHER-AX23-V1",
            "ARCHER-C2-V3",
            "ARCHER-C7-V4",
            "ARCHER-C7-V5",
            "ARCHER-C25-V1",
            "ARCHER-C59-V2",
            "ARCHER-C60-V2",
            "ARCHER-C60-V3",
            "ARCHER-C6U-V1",
            "ARCHER-C6-V3",
            "DECO-M4R-V4",
            "MR70X",
            "TLWR1043NV5",
        ],
        [0x01, 0x00],
    ),
    (&["ARCHER-C6-V2", "TL-WA1201-V2"], [0x00, 0x01]),
    (&["ARCHER-C6-V2-US", "EAP245-V3"], [0x01, 0x01]),
];

/// Returns the extra-para contents required by the device `id`, if any
pub fn extra_para_for(id: &str) -> Option<[u8; 2]> {
    EXTRA_PARA_QUIRKS
        .iter()
        .find(|(ids, _)| ids.iter().any(|quirk| quirk.eq_ignore_ascii_case(id)))
        .map(|&(_, flags)| flags)
}

/// Everything needed to build an image for one device
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeviceProfile {
    pub id: &'static str,
    pub vendor: Option<&'static str>,
    pub support_list: &'static str,
    pub trailer: Trailer,
    pub soft_version: SoftVersion,
    pub compat_level: u32,
    pub partitions: Vec<FlashPartition>,
    pub first_sysupgrade_partition: &'static str,
    pub last_sysupgrade_partition: &'static str,
    pub partition_names: PartitionNames,
    /// Contents of the extra-para partition, for devices that require one
    pub extra_para: Option<[u8; 2]>,
}

impl Board {
    /// Resolves the board into a `DeviceProfile`
    pub fn profile(&self) -> Result<DeviceProfile, Error> {
        if self.partitions.len() > MAX_PARTITIONS {
            return Err(Error::TableFull(MAX_PARTITIONS));
        }

        Ok(DeviceProfile {
            id: self.id,
            vendor: self.vendor,
            support_list: self.support_list,
            trailer: self.trailer,
            soft_version: self.soft_version,
            compat_level: self.compat_level,
            partitions: self
                .partitions
                .iter()
                .map(|&(name, base, size)| FlashPartition::new(name, base, size))
                .collect(),
            first_sysupgrade_partition: self.first_sysupgrade_partition,
            last_sysupgrade_partition: self.last_sysupgrade_partition,
            partition_names: self.partition_names,
            extra_para: extra_para_for(self.id),
        })
    }
}

/// Looks up the board with the given `id`, ignoring case
pub fn find_board(id: &str) -> Result<DeviceProfile, Error> {
    BOARDS
        .iter()
        .find(|board| board.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| Error::UnknownBoard(id.to_owned()))?
        .profile()
}
