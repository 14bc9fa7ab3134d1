//! Factory and sysupgrade image assembly

use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use chrono::{NaiveDate, Utc};
use log::{debug, info};

use super::meta::{make_extra_para, make_soft_version, make_support_list};
use super::ptable;
use super::{
    align_up, digest, find_partition, FlashPartition, ImagePartition, ERASE_BLOCK_SIZE,
    HEADER_SIZE, JFFS2_EOF_MARK, MAX_PARTITIONS, MD5_SALT, PAYLOAD_OFFSET, PREAMBLE_SIZE,
    TABLE_SIZE,
};
use crate::board::{DeviceProfile, PartitionNames};
use crate::Error;

/// Name of the flash partition that is split into os-image and file-system
const FIRMWARE_PARTITION: &str = "firmware";

/// Splits the `firmware` flash partition at the end of a kernel of `kernel_size` bytes
///
/// The firmware partition is renamed to the os-image partition and a file-system partition is
/// inserted right after it. With `align` the file system starts at the next erase block.
///
/// Returns the new file-system partition, or `None` if the layout has no firmware partition.
pub fn split_firmware(
    partitions: &mut Vec<FlashPartition>,
    names: &PartitionNames,
    kernel_size: usize,
    align: bool,
) -> Result<Option<FlashPartition>, Error> {
    let index = match partitions.iter().position(|p| p.name == FIRMWARE_PARTITION) {
        Some(index) => index,
        None => return Ok(None),
    };

    if partitions.len() >= MAX_PARTITIONS {
        return Err(Error::TableFull(MAX_PARTITIONS));
    }

    let firmware = partitions[index].clone();
    let too_large = || Error::KernelTooLarge {
        size: kernel_size,
        limit: firmware.size,
    };

    if kernel_size > firmware.size as usize {
        return Err(too_large());
    }

    let mut boundary = firmware.base as usize + kernel_size;

    if align {
        boundary = align_up(boundary, ERASE_BLOCK_SIZE);
    }

    // Aligning may push the boundary past the end of the firmware partition
    let offset = boundary - firmware.base as usize;
    let fs_size = (firmware.size as usize)
        .checked_sub(offset)
        .ok_or_else(too_large)?;

    let file_system = FlashPartition::new(names.file_system, boundary as u32, fs_size as u32);

    debug!(
        "Split {} at {:#x}: {} size {:#x}, {} size {:#x}",
        FIRMWARE_PARTITION,
        boundary,
        names.os_image,
        kernel_size,
        names.file_system,
        fs_size
    );

    partitions[index] = FlashPartition::new(names.os_image, firmware.base, kernel_size as u32);
    partitions.insert(index + 1, file_system.clone());

    Ok(Some(file_system))
}

/// Pads a file system to the next erase block and appends the JFFS2 end-of-filesystem marker
///
/// When the flash location of the file system is known the padding is measured from its flash
/// base, otherwise from the start of the data.
pub fn pad_jffs2(data: &mut Vec<u8>, file_system: Option<&FlashPartition>) {
    let base = file_system.map_or(0, |p| p.base as usize);
    let len = align_up(data.len() + base, ERASE_BLOCK_SIZE) - base;

    data.resize(len, 0xff);
    data.extend_from_slice(&JFFS2_EOF_MARK);
}

fn check_fits(part: &ImagePartition, slot: &FlashPartition) -> Result<(), Error> {
    if part.size() > slot.size as usize {
        return Err(Error::PartitionTooLarge {
            name: slot.name.clone(),
            limit: slot.size,
        });
    }

    Ok(())
}

fn to_u32(value: usize, name: &str) -> Result<u32, Error> {
    u32::try_from(value).map_err(|_| Error::PartitionTooLarge {
        name: name.to_owned(),
        limit: u32::MAX,
    })
}

/// Builds firmware images for a device
///
/// ```no_run
/// # fn main() -> Result<(), safeloader::Error> {
/// use safeloader::board::find_board;
/// use safeloader::safeloader::ImageBuilder;
///
/// let profile = find_board("CPE510")?;
/// let image = ImageBuilder::new(&profile)
///     .revision(1)
///     .add_jffs2_eof(true)
///     .build(&[0u8; 1024], &[0u8; 1024])?;
/// # Ok(())
/// # }
/// ```
pub struct ImageBuilder<'a> {
    profile: &'a DeviceProfile,
    revision: u32,
    add_jffs2_eof: bool,
    sysupgrade: bool,
    /// Date stored in numeric soft-version records, today if unset
    build_date: Option<NaiveDate>,
}

impl<'a> ImageBuilder<'a> {
    pub fn new(profile: &'a DeviceProfile) -> ImageBuilder<'a> {
        ImageBuilder {
            profile,
            revision: 0,
            add_jffs2_eof: false,
            sysupgrade: false,
            build_date: None,
        }
    }

    /// Sets the revision stored in numeric soft-version records
    pub fn revision(&mut self, revision: u32) -> &mut ImageBuilder<'a> {
        self.revision = revision;
        self
    }

    /// Appends a JFFS2 end-of-filesystem marker to the file system when `enabled`
    pub fn add_jffs2_eof(&mut self, enabled: bool) -> &mut ImageBuilder<'a> {
        self.add_jffs2_eof = enabled;
        self
    }

    /// Builds a sysupgrade image instead of a factory image when `enabled`
    pub fn sysupgrade(&mut self, enabled: bool) -> &mut ImageBuilder<'a> {
        self.sysupgrade = enabled;
        self
    }

    pub fn build_date(&mut self, date: NaiveDate) -> &mut ImageBuilder<'a> {
        self.build_date = Some(date);
        self
    }

    /// Returns the flash layout with the firmware split for `kernel_size`, and the file-system
    /// slot if the layout was split
    fn flash_layout(
        &self,
        kernel_size: usize,
    ) -> Result<(Vec<FlashPartition>, Option<FlashPartition>), Error> {
        let mut flash = self.profile.partitions.clone();

        // Sysupgrade images are flashed behind the kernel without gaps
        let file_system = split_firmware(
            &mut flash,
            &self.profile.partition_names,
            kernel_size,
            !self.sysupgrade,
        )?;

        Ok((flash, file_system))
    }

    /// Generates the partitions that make up the image, in image order
    pub fn partitions(
        &self,
        flash: &[FlashPartition],
        file_system: Option<&FlashPartition>,
        kernel: &[u8],
        rootfs: &[u8],
    ) -> Result<Vec<ImagePartition>, Error> {
        let profile = self.profile;
        let names = &profile.partition_names;
        let date = self.build_date.unwrap_or_else(|| Utc::now().date_naive());

        let mut rootfs = rootfs.to_vec();

        if self.add_jffs2_eof {
            pad_jffs2(&mut rootfs, file_system);
        }

        let mut parts = vec![
            ImagePartition::new(
                names.partition_table,
                ptable::encode_flash_table(flash, TABLE_SIZE)?,
            ),
            make_soft_version(
                names.soft_version,
                profile.soft_version,
                profile.compat_level,
                self.revision,
                date,
                profile.trailer,
            ),
            make_support_list(names.support_list, profile.support_list, profile.trailer),
            ImagePartition::new(names.os_image, kernel.to_vec()),
            ImagePartition::new(names.file_system, rootfs),
        ];

        if let Some(flags) = profile.extra_para {
            parts.push(make_extra_para(names.extra_para, flags, profile.trailer));
        }

        Ok(parts)
    }

    /// Builds the complete image from the `kernel` and `rootfs` contents
    pub fn build(&self, kernel: &[u8], rootfs: &[u8]) -> Result<Vec<u8>, Error> {
        let (flash, file_system) = self.flash_layout(kernel.len())?;
        let parts = self.partitions(&flash, file_system.as_ref(), kernel, rootfs)?;

        if self.sysupgrade {
            self.assemble_sysupgrade(&flash, &parts)
        } else {
            self.assemble_factory(&flash, &parts)
        }
    }

    /// Reads the kernel and rootfs files, builds the image and writes it to `output`
    pub fn write_image<P: AsRef<Path>>(&self, kernel: P, rootfs: P, output: P) -> Result<(), Error> {
        let kernel = fs::read(kernel)?;
        let rootfs = fs::read(rootfs)?;
        let image = self.build(&kernel, &rootfs)?;

        fs::write(output.as_ref(), &image)?;

        info!(
            "Wrote {} {} image of {} bytes to {}",
            self.profile.id,
            if self.sysupgrade { "sysupgrade" } else { "factory" },
            image.len(),
            output.as_ref().display()
        );

        Ok(())
    }

    /// Lays out the preamble, the vendor header, the image partition table and the partitions
    fn assemble_factory(
        &self,
        flash: &[FlashPartition],
        parts: &[ImagePartition],
    ) -> Result<Vec<u8>, Error> {
        // The vendor string and its length have to fit into the header block
        let vendor_limit = HEADER_SIZE - 4;

        if self.profile.vendor.map_or(false, |v| v.len() > vendor_limit) {
            return Err(Error::PartitionTooLarge {
                name: "vendor".to_owned(),
                limit: vendor_limit as u32,
            });
        }

        let mut entries = Vec::with_capacity(parts.len());
        let mut base = TABLE_SIZE;

        for part in parts {
            let slot = find_partition(flash, &part.name)
                .ok_or_else(|| Error::MissingFlashPartition(part.name.clone()))?;

            check_fits(part, slot)?;

            debug!(
                "Placing {} at {:#x} size {:#x}",
                part.name,
                base,
                part.size()
            );

            entries.push(FlashPartition::new(
                part.name.as_str(),
                to_u32(base, &part.name)?,
                to_u32(part.size(), &part.name)?,
            ));

            base += part.size();
        }

        let len = PAYLOAD_OFFSET + base;
        let mut image = vec![0xffu8; len];

        BigEndian::write_u32(&mut image[0..4], to_u32(len, "image")?);

        if let Some(vendor) = self.profile.vendor {
            let vendor = vendor.as_bytes();
            let start = PREAMBLE_SIZE + 4;

            BigEndian::write_u32(&mut image[PREAMBLE_SIZE..start], vendor.len() as u32);
            image[start..start + vendor.len()].copy_from_slice(vendor);
        }

        let table = ptable::encode_image_table(&entries, TABLE_SIZE)?;
        image[PAYLOAD_OFFSET..PAYLOAD_OFFSET + TABLE_SIZE].copy_from_slice(&table);

        for (part, entry) in parts.iter().zip(&entries) {
            let start = PAYLOAD_OFFSET + entry.base as usize;
            image[start..start + part.size()].copy_from_slice(&part.data);
        }

        let checksum = digest(&MD5_SALT, &image[PREAMBLE_SIZE..]);
        image[4..PREAMBLE_SIZE].copy_from_slice(&checksum);

        Ok(image)
    }

    /// Lays out the partitions between the first and last sysupgrade partition as they appear
    /// on flash
    fn assemble_sysupgrade(
        &self,
        flash: &[FlashPartition],
        parts: &[ImagePartition],
    ) -> Result<Vec<u8>, Error> {
        let profile = self.profile;
        let position = |name: &str| {
            flash
                .iter()
                .position(|p| p.name == name)
                .ok_or_else(|| Error::MissingFlashPartition(name.to_owned()))
        };

        let first_index = position(profile.first_sysupgrade_partition)?;
        let last_index = position(profile.last_sysupgrade_partition)?;
        let invalid_range = || Error::InvalidSysupgradeRange {
            first: profile.first_sysupgrade_partition.to_owned(),
            last: profile.last_sysupgrade_partition.to_owned(),
        };

        if first_index >= last_index {
            return Err(invalid_range());
        }

        let first = &flash[first_index];
        let last = &flash[last_index];
        let last_part = parts
            .iter()
            .find(|p| p.name == last.name)
            .ok_or_else(|| Error::MissingPartition(last.name.clone(), "image"))?;

        let span = last.base.checked_sub(first.base).ok_or_else(invalid_range)?;
        let len = span as usize + last_part.size();
        let mut image = vec![0xffu8; len];

        for slot in &flash[first_index..=last_index] {
            let part = match parts.iter().find(|p| p.name == slot.name) {
                Some(part) => part,
                None => continue,
            };

            check_fits(part, slot)?;

            let offset = slot.base.checked_sub(first.base).ok_or_else(invalid_range)? as usize;

            // Overlapping layouts could place a partition past the end of the image
            if offset + part.size() > len {
                return Err(Error::PartitionTooLarge {
                    name: slot.name.clone(),
                    limit: len.saturating_sub(offset) as u32,
                });
            }

            debug!("Placing {} at {:#x} size {:#x}", part.name, offset, part.size());

            image[offset..offset + part.size()].copy_from_slice(&part.data);
        }

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_hex::*;
    use hex_literal::hex;

    use super::*;
    use crate::board::find_board;
    use crate::safeloader::meta::{SoftVersion, Trailer};
    use crate::safeloader::{ImageInfo, Variant};

    fn test_profile() -> DeviceProfile {
        DeviceProfile {
            id: "TEST",
            vendor: None,
            support_list: "SupportList:\r\nTEST(TP-LINK|UN|N300-5):1.0\r\n",
            trailer: Trailer::Pad(0xff),
            soft_version: SoftVersion::Numeric(1, 2, 3),
            compat_level: 0,
            partitions: vec![
                FlashPartition::new("fs-uboot", 0x00000, 0x10000),
                FlashPartition::new("partition-table", 0x10000, 0x1000),
                FlashPartition::new("firmware", 0x20000, 0x40000),
                FlashPartition::new("soft-version", 0x60000, 0x100),
                FlashPartition::new("support-list", 0x61000, 0x100),
                FlashPartition::new("radio", 0x70000, 0x10000),
            ],
            first_sysupgrade_partition: "os-image",
            last_sysupgrade_partition: "support-list",
            partition_names: PartitionNames::DEFAULT,
            extra_para: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    fn scenario_layout() -> Vec<FlashPartition> {
        vec![
            FlashPartition::new("fs-uboot", 0, 0x20000),
            FlashPartition::new("firmware", 0x40000, 0x770000),
            FlashPartition::new("soft-version", 0x7b0000, 0x100),
            FlashPartition::new("support-list", 0x7b1000, 0x400),
        ]
    }

    #[test]
    fn it_should_split_the_firmware_partition() {
        let mut layout = scenario_layout();
        let fs = split_firmware(&mut layout, &PartitionNames::DEFAULT, 0x150000, true)
            .unwrap()
            .unwrap();

        // 0x40000 + 0x150000 is already on an erase block boundary
        assert_eq!(fs, FlashPartition::new("file-system", 0x190000, 0x620000));
        assert_eq!(layout.len(), 5);
        assert_eq!(layout[1], FlashPartition::new("os-image", 0x40000, 0x150000));
        assert_eq!(layout[2], fs);
        assert_eq!(layout[3].name, "soft-version");
    }

    #[test]
    fn it_should_align_the_file_system_for_factory_images() {
        let mut layout = scenario_layout();
        let fs = split_firmware(&mut layout, &PartitionNames::DEFAULT, 0x150001, true)
            .unwrap()
            .unwrap();

        assert_eq_hex!(fs.base, 0x1a0000);
        assert_eq_hex!(fs.size, 0x770000 - (0x1a0000 - 0x40000));
        assert_eq_hex!(layout[1].size, 0x150001);
    }

    #[test]
    fn it_should_not_align_the_file_system_for_sysupgrade_images() {
        let mut layout = scenario_layout();
        let fs = split_firmware(&mut layout, &PartitionNames::DEFAULT, 0x150001, false)
            .unwrap()
            .unwrap();

        assert_eq_hex!(fs.base, 0x190001);
        assert_eq_hex!(fs.size, 0x770000 - 0x150001);
    }

    #[test]
    fn it_should_leave_layouts_without_firmware_alone() {
        let mut layout = vec![FlashPartition::new("os-image", 0, 0x1000)];

        assert_eq!(
            split_firmware(&mut layout, &PartitionNames::DEFAULT, 0x10, true).unwrap(),
            None
        );
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn it_should_reject_oversized_kernels() {
        let mut layout = scenario_layout();

        assert!(matches!(
            split_firmware(&mut layout, &PartitionNames::DEFAULT, 0x770001, true),
            Err(Error::KernelTooLarge { size: 0x770001, limit: 0x770000 })
        ));
    }

    #[test]
    fn it_should_reject_kernels_whose_alignment_overflows() {
        let mut layout = vec![FlashPartition::new("firmware", 0x40000, 0x18000)];

        assert!(matches!(
            split_firmware(&mut layout, &PartitionNames::DEFAULT, 0x17000, true),
            Err(Error::KernelTooLarge { .. })
        ));
    }

    #[test]
    fn it_should_fail_to_split_a_full_table() {
        let mut layout: Vec<FlashPartition> = (0..MAX_PARTITIONS as u32)
            .map(|i| FlashPartition::new(format!("part{}", i), i * 0x10000, 0x10000))
            .collect();
        layout[3].name = "firmware".to_owned();

        assert!(matches!(
            split_firmware(&mut layout, &PartitionNames::DEFAULT, 0x100, true),
            Err(Error::TableFull(32))
        ));
    }

    #[test]
    fn it_should_pad_jffs2_from_the_flash_base() {
        let fs = FlashPartition::new("file-system", 0x41234, 0x100000);
        let mut data = vec![0xbbu8; 0x800];

        pad_jffs2(&mut data, Some(&fs));

        assert_eq_hex!(data.len(), 0x50000 + 4 - 0x41234);
        assert_eq_hex!(data[0x7ff], 0xbb);
        assert_eq_hex!(data[0x800], 0xff);
        assert_eq_hex!(&data[data.len() - 4..], &hex!("de ad c0 de"));
    }

    #[test]
    fn it_should_pad_jffs2_from_the_partition_start() {
        let mut data = vec![0xbbu8; 0x800];

        pad_jffs2(&mut data, None);

        assert_eq_hex!(data.len(), 0x10004);
        assert_eq_hex!(&data[0x10000..], &hex!("de ad c0 de"));
    }

    #[test]
    fn it_should_build_a_factory_image() {
        let profile = test_profile();
        let kernel = vec![0xaau8; 0x1234];
        let rootfs = vec![0xbbu8; 0x800];
        let image = ImageBuilder::new(&profile)
            .build_date(date())
            .build(&kernel, &rootfs)
            .unwrap();

        assert_eq!(BigEndian::read_u32(&image[0..4]) as usize, image.len());
        assert_eq_hex!(&image[4..0x14], &digest(&MD5_SALT, &image[0x14..])[..]);

        // No vendor string, the header is left blank
        assert!(image[0x14..PAYLOAD_OFFSET].iter().all(|&b| b == 0xff));

        let info = ImageInfo::from_reader(&mut Cursor::new(&image)).unwrap();
        let names: Vec<&str> = info.entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(info.variant, Variant::Default);
        assert_eq!(
            names,
            ["partition-table", "soft-version", "support-list", "os-image", "file-system"]
        );
        assert_eq!(info.entries[0], FlashPartition::new("partition-table", 0x800, 0x800));

        let os_image = info.find("os-image").unwrap();
        let file_system = info.find("file-system").unwrap();

        assert_eq!(info.read_partition(&mut Cursor::new(&image), os_image).unwrap(), kernel);
        assert_eq!(
            info.read_partition(&mut Cursor::new(&image), file_system).unwrap(),
            rootfs
        );
        assert_eq!(file_system.base, os_image.base + os_image.size);
    }

    #[test]
    fn it_should_store_the_split_flash_layout() {
        let profile = test_profile();
        let image = ImageBuilder::new(&profile)
            .build_date(date())
            .build(&[0xaa; 0x1234], &[0xbb; 0x800])
            .unwrap();

        let mut cursor = Cursor::new(&image);
        let info = ImageInfo::from_reader(&mut cursor).unwrap();
        let table = info.find("partition-table").unwrap().clone();
        let flash = info.read_flash_table(&mut cursor, &table).unwrap();

        assert_eq!(flash.len(), 7);
        assert_eq!(flash[2], FlashPartition::new("os-image", 0x20000, 0x1234));
        assert_eq!(flash[3], FlashPartition::new("file-system", 0x30000, 0x30000));
    }

    #[test]
    fn it_should_write_the_vendor_string() {
        let profile = find_board("CPE510").unwrap();
        let image = ImageBuilder::new(&profile)
            .build_date(date())
            .build(&[0xaa; 0x100], &[0xbb; 0x100])
            .unwrap();

        let vendor = b"CPE510(TP-LINK|UN|N300-5):1.0\r\n";

        assert_eq_hex!(&image[0x14..0x18], &hex!("00 00 00 1f"));
        assert_eq!(&image[0x18..0x18 + vendor.len()], &vendor[..]);
        assert_eq_hex!(image[0x18 + vendor.len()], 0xff);

        let mut cursor = Cursor::new(&image);
        let info = ImageInfo::from_reader(&mut cursor).unwrap();

        assert_eq!(info.variant, Variant::Vendor);
        assert_eq!(info.read_vendor(&mut cursor).unwrap(), &vendor[..]);
    }

    #[test]
    fn it_should_append_the_extra_para_partition() {
        let profile = find_board("ARCHER-C6-V2").unwrap();
        let image = ImageBuilder::new(&profile)
            .build(&[0xaa; 0x100], &[0xbb; 0x100])
            .unwrap();

        let mut cursor = Cursor::new(&image);
        let info = ImageInfo::from_reader(&mut cursor).unwrap();
        let extra_para = info.entries.last().unwrap().clone();

        assert_eq!(extra_para.name, "extra-para");
        assert_eq_hex!(
            &info.read_partition(&mut cursor, &extra_para).unwrap()[..],
            &hex!("00 00 00 02 00 00 00 00 00 01 00")
        );
    }

    #[test]
    fn it_should_reject_partitions_larger_than_their_slot() {
        let mut profile = test_profile();
        profile.partitions[4].size = 0x10;

        assert!(matches!(
            ImageBuilder::new(&profile).build(&[0xaa; 0x100], &[0xbb; 0x100]),
            Err(Error::PartitionTooLarge { ref name, limit: 0x10 }) if name == "support-list"
        ));
    }

    #[test]
    fn it_should_build_a_sysupgrade_image() {
        let profile = test_profile();
        let kernel = vec![0xaau8; 0x1234];
        let rootfs = vec![0xbbu8; 0x800];
        let image = ImageBuilder::new(&profile)
            .build_date(date())
            .sysupgrade(true)
            .build(&kernel, &rootfs)
            .unwrap();

        let support_list = make_support_list("support-list", profile.support_list, profile.trailer);

        assert_eq!(image.len(), 0x61000 - 0x20000 + support_list.size());
        assert_eq!(&image[..0x1234], &kernel[..]);
        assert_eq!(&image[0x1234..0x1a34], &rootfs[..]);
        assert!(image[0x1a34..0x40000].iter().all(|&b| b == 0xff));

        // soft-version slot
        assert_eq_hex!(&image[0x40000..0x40008], &hex!("00 00 00 0c 00 00 00 00"));
        assert_eq_hex!(
            &image[0x40008..0x40014],
            &hex!("ff 01 02 03 20 24 03 07 00 00 00 00")
        );
        assert_eq_hex!(image[0x40014], 0xff);

        assert_eq!(&image[0x41000..], &support_list.data[..]);
    }

    #[test]
    fn it_should_reject_oversized_vendor_strings() {
        let mut profile = test_profile();
        let vendor: &'static str = Box::leak("x".repeat(HEADER_SIZE - 3).into_boxed_str());
        profile.vendor = Some(vendor);

        assert!(matches!(
            ImageBuilder::new(&profile).build(&[0xaa; 0x100], &[0xbb; 0x100]),
            Err(Error::PartitionTooLarge { ref name, limit: 0xffc }) if name == "vendor"
        ));
    }

    #[test]
    fn it_should_fill_the_header_with_the_longest_vendor_string() {
        let mut profile = test_profile();
        let vendor: &'static str = Box::leak("x".repeat(HEADER_SIZE - 4).into_boxed_str());
        profile.vendor = Some(vendor);

        let image = ImageBuilder::new(&profile)
            .build(&[0xaa; 0x100], &[0xbb; 0x100])
            .unwrap();

        assert_eq_hex!(&image[0x14..0x18], &hex!("00 00 0f fc"));
        assert!(image[0x18..PAYLOAD_OFFSET].iter().all(|&b| b == b'x'));
        assert_eq!(&image[PAYLOAD_OFFSET..PAYLOAD_OFFSET + 8], &b"fwup-ptn"[..]);
    }

    #[test]
    fn it_should_reject_sysupgrade_partitions_larger_than_their_slot() {
        let mut profile = test_profile();
        profile.partitions[4].size = 0x10;

        assert!(matches!(
            ImageBuilder::new(&profile)
                .sysupgrade(true)
                .build(&[0xaa; 0x100], &[0xbb; 0x100]),
            Err(Error::PartitionTooLarge { ref name, limit: 0x10 }) if name == "support-list"
        ));
    }

    #[test]
    fn it_should_reject_sysupgrade_partitions_past_the_end_of_the_image() {
        let mut profile = test_profile();

        // support-list now sits behind the last sysupgrade partition on flash
        profile.partitions.swap(3, 4);
        profile.last_sysupgrade_partition = "soft-version";

        assert!(matches!(
            ImageBuilder::new(&profile)
                .sysupgrade(true)
                .build(&[0xaa; 0x100], &[0xbb; 0x100]),
            Err(Error::PartitionTooLarge { ref name, limit: 0 }) if name == "support-list"
        ));
    }

    #[test]
    fn it_should_reject_an_inverted_sysupgrade_range() {
        let mut profile = test_profile();
        profile.first_sysupgrade_partition = "support-list";
        profile.last_sysupgrade_partition = "os-image";

        assert!(matches!(
            ImageBuilder::new(&profile)
                .sysupgrade(true)
                .build(&[0xaa; 0x100], &[0xbb; 0x100]),
            Err(Error::InvalidSysupgradeRange { .. })
        ));
    }

    #[test]
    fn it_should_build_sysupgrade_images_with_renamed_partitions() {
        let profile = find_board("DECO-M5").unwrap();
        let image = ImageBuilder::new(&profile)
            .sysupgrade(true)
            .build(&[0xaa; 0x100], &[0xbb; 0x100])
            .unwrap();

        // os-image@1 to file-system@1
        assert_eq!(image.len(), 0x1190000 - 0xd90000 + 0x100);
        assert_eq!(&image[..0x100], &[0xaa; 0x100][..]);
        assert_eq!(&image[0x400000..], &[0xbb; 0x100][..]);
    }

    #[test]
    fn it_should_be_reproducible() {
        let profile = find_board("EAP615-WALL-V1").unwrap();
        let build = || {
            ImageBuilder::new(&profile)
                .revision(3)
                .build_date(date())
                .add_jffs2_eof(true)
                .build(&[0xaa; 0x100], &[0xbb; 0x100])
                .unwrap()
        };

        assert_eq!(build(), build());
    }
}
