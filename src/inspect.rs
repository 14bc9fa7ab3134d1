//! Operations on existing images: printing their metadata, extracting their partitions and
//! converting factory images to the sysupgrade layout.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

use log::{debug, info};

use crate::safeloader::meta::{meta_payload, SoftVersionRecord};
use crate::safeloader::{copy_partition, find_partition, FlashPartition, ImageInfo, Variant};
use crate::Error;

/// Size of the chunks used for filling gaps with `0xff`
const FILL_CHUNK_SIZE: usize = 4096;

fn require<'a>(
    entries: &'a [FlashPartition],
    name: &str,
    table: &'static str,
) -> Result<&'a FlashPartition, Error> {
    find_partition(entries, name).ok_or_else(|| Error::MissingPartition(name.to_owned(), table))
}

fn write_table<W: Write>(out: &mut W, entries: &[FlashPartition]) -> io::Result<()> {
    writeln!(out, "{:<8} {:<8} name", "base", "size")?;

    for entry in entries {
        writeln!(out, "{:08x} {:08x} {}", entry.base, entry.size, entry.name)?;
    }

    Ok(())
}

fn write_soft_version<W: Write>(out: &mut W, data: &[u8]) -> io::Result<()> {
    let payload = match meta_payload(data) {
        Some(payload) => payload,
        None => return writeln!(out, "Failed to parse data"),
    };

    if payload.is_ascii() {
        let end = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());

        out.write_all(&payload[..end])?;
        return writeln!(out);
    }

    match SoftVersionRecord::from_bytes(payload) {
        Some(record) => {
            writeln!(
                out,
                "Version: {}.{}.{}",
                record.major, record.minor, record.patch
            )?;
            writeln!(out, "Date: {}", record.date_string())?;
            writeln!(out, "Revision: {}", record.revision)
        }
        None => writeln!(out, "Failed to parse data"),
    }
}

fn status(matches: bool) -> &'static str {
    if matches {
        "ok"
    } else {
        "mismatch"
    }
}

/// Prints a human readable description of the image in `reader` to `out`
pub fn info<R: Read + Seek, W: Write>(reader: &mut R, out: &mut W) -> Result<(), Error> {
    let image = ImageInfo::from_reader(reader)?;

    writeln!(out, "Image variant: {}", image.variant)?;

    match image.verify(reader)? {
        Some(verification) => {
            writeln!(out, "Image size: {}", status(verification.size_matches))?;
            writeln!(out, "Image checksum: {}", status(verification.checksum_matches))?;
        }
        None => {
            writeln!(out, "Image size: not verified")?;
            writeln!(out, "Image checksum: not verified")?;
        }
    }

    if image.variant == Variant::Vendor {
        let vendor = image.read_vendor(reader)?;

        writeln!(out, "Firmware vendor string:")?;
        out.write_all(&vendor)?;
        writeln!(out)?;
    }

    writeln!(out, "Firmware image partitions:")?;
    write_table(out, &image.entries)?;

    if let Some(entry) = image.find("soft-version") {
        let data = image.read_partition(reader, entry)?;

        writeln!(out, "\n[Software version]")?;
        write_soft_version(out, &data)?;
    }

    if let Some(entry) = image.find("support-list") {
        let data = image.read_partition(reader, entry)?;

        writeln!(out, "\n[Support list]")?;
        out.write_all(meta_payload(&data).unwrap_or_default())?;
        writeln!(out)?;
    }

    if let Some(entry) = image.find("partition-table") {
        let flash = image.read_flash_table(reader, entry)?;

        writeln!(out, "\n[Partition table]")?;
        write_table(out, &flash)?;
    }

    Ok(())
}

/// Returns the path of the file for the partition `name` inside `output_dir`
///
/// The name has to be a single plain file name, so a partition can't be written outside of
/// `output_dir`.
fn partition_path(output_dir: &Path, name: &str) -> Result<PathBuf, Error> {
    let mut components = Path::new(name).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(file_name)), None) => Ok(output_dir.join(file_name)),
        _ => Err(Error::InvalidPartitionName(name.to_owned())),
    }
}

/// Writes every partition of the image in `reader` to a file of the same name in `output_dir`
///
/// Returns the paths of the written files. Nothing is written if any partition name isn't a
/// plain file name.
pub fn extract<R: Read + Seek>(reader: &mut R, output_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    if !fs::metadata(output_dir)?.is_dir() {
        return Err(Error::NotADirectory(output_dir.to_path_buf()));
    }

    let image = ImageInfo::from_reader(reader)?;
    let paths = image
        .entries
        .iter()
        .map(|entry| partition_path(output_dir, &entry.name))
        .collect::<Result<Vec<_>, _>>()?;
    let mut written = Vec::with_capacity(paths.len());

    for (entry, path) in image.entries.iter().zip(paths) {
        let mut file = File::create(&path)?;

        copy_partition(reader, image.payload_offset, entry, &mut file)?;

        info!("Extracted {} ({} bytes) to {}", entry.name, entry.size, path.display());

        written.push(path);
    }

    Ok(written)
}

/// Writes `len` bytes of `0xff` to `writer`
fn write_ff<W: Write>(writer: &mut W, len: usize) -> io::Result<()> {
    let buf = [0xffu8; FILL_CHUNK_SIZE];
    let mut remaining = len;

    while remaining > 0 {
        let n = remaining.min(FILL_CHUNK_SIZE);

        writer.write_all(&buf[..n])?;
        remaining -= n;
    }

    Ok(())
}

/// Converts the factory image in `reader` to a sysupgrade image in `writer`
///
/// The os-image is written at offset 0 and padded to the size of its flash slot, the
/// file-system follows at its flash offset relative to the os-image.
pub fn convert<R: Read + Seek, W: Write + Seek>(reader: &mut R, writer: &mut W) -> Result<(), Error> {
    let image = ImageInfo::from_reader(reader)?;

    let fwup_os_image = require(&image.entries, "os-image", "fwup")?;
    let fwup_file_system = require(&image.entries, "file-system", "fwup")?;
    let fwup_partition_table = require(&image.entries, "partition-table", "fwup")?;

    let flash = image.read_flash_table(reader, fwup_partition_table)?;
    let flash_os_image = require(&flash, "os-image", "flash")?;
    let flash_file_system = require(&flash, "file-system", "flash")?;

    if fwup_os_image.size > flash_os_image.size {
        return Err(Error::PartitionTooLarge {
            name: flash_os_image.name.clone(),
            limit: flash_os_image.size,
        });
    }

    let fs_offset = flash_file_system
        .base
        .checked_sub(flash_os_image.base)
        .ok_or_else(|| Error::InvalidSysupgradeRange {
            first: flash_os_image.name.clone(),
            last: flash_file_system.name.clone(),
        })?;

    debug!(
        "Placing {} at 0 and {} at {:#x}",
        fwup_os_image.name, fwup_file_system.name, fs_offset
    );

    copy_partition(reader, image.payload_offset, fwup_os_image, writer)?;
    write_ff(writer, (flash_os_image.size - fwup_os_image.size) as usize)?;

    // Fill any gap up to the file system instead of leaving a hole
    let position = writer.seek(SeekFrom::Current(0))?;

    if (fs_offset as u64) > position {
        write_ff(writer, (fs_offset as u64 - position) as usize)?;
    } else {
        writer.seek(SeekFrom::Start(fs_offset as u64))?;
    }

    copy_partition(reader, image.payload_offset, fwup_file_system, writer)?;

    Ok(())
}
