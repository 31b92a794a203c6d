//! Hardware identifiers (vendor/product pairs).
//!
//! A [`HardwareId`] names a device *model*, not a unit: two identical pads share
//! one. The packed layout matches the Windows product GUID `Data1` convention
//! (vendor in the low word, product in the high word), so a value read from a
//! low-level instance descriptor compares directly against one parsed from a
//! registry identifier string.

use serde::{Serialize, Serializer};
use std::fmt;

/// Prefix preceding the 4-digit vendor code in a device identifier string.
pub const VENDOR_PREFIX: &str = "VID_";
/// Prefix preceding the 4-digit product code in a device identifier string.
pub const PRODUCT_PREFIX: &str = "PID_";

/// Vendor + product code packed into one comparable 32-bit value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HardwareId(u32);

impl HardwareId {
    #[inline]
    pub const fn new(vendor: u16, product: u16) -> Self {
        Self((vendor as u32) | ((product as u32) << 16))
    }

    /// Wrap an already-packed value (e.g. `guidProduct.Data1`).
    #[inline]
    pub const fn from_packed(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn vendor(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    #[inline]
    pub const fn product(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Extract `VID_xxxx` and `PID_xxxx` from a device identifier string such as
    /// `HID\VID_045E&PID_028E&IG_00\3&1b2c&0&0000`.
    ///
    /// Only the first occurrence of each prefix is examined, and it must be
    /// followed by exactly four hex digits. Anything else yields `None`.
    pub fn parse(device_id: &str) -> Option<Self> {
        let vendor = hex4_after(device_id, VENDOR_PREFIX)?;
        let product = hex4_after(device_id, PRODUCT_PREFIX)?;
        Some(Self::new(vendor, product))
    }
}

/// Fixed-width hex field following the first `prefix` in `s`.
fn hex4_after(s: &str, prefix: &str) -> Option<u16> {
    let start = s.find(prefix)? + prefix.len();
    let field = s.get(start..start + 4)?;
    if !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(field, 16).ok()
}

impl fmt::Display for HardwareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor(), self.product())
    }
}

impl Serialize for HardwareId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
