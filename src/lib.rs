//! Library for building and inspecting firmware images for TP-Link devices that use the
//! SafeLoader bootloader.
//!
//! A factory image looks like this:
//!
//! ```text
//! 0000-0003    Image size (big endian)
//! 0004-0013    MD5 of a fixed salt followed by everything from 0x14 onwards
//! 0014-1013    Vendor information, padded with 0xff
//! 1014-1813    Image partition table, padded with 0xff
//! 1814-xxxx    Partitions
//! ```

pub mod board;
mod error;
pub mod inspect;
pub mod safeloader;

pub use error::Error;
