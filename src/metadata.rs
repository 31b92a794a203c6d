//! Device metadata snapshot.
//!
//! [`DeviceMeta`] is a lightweight, cloneable description of a registered
//! device suitable for logging, diagnostics reports and persistence. Helpers
//! populate what they know; unknown fields remain `None`.
//!
//! # Conventions
//! - `bus` is a short hint: `"hid"` for the low-level path, `"xinput"` for slots.
//! - `path` is an OS path (opaque) on the HID side and `xinput:{slot}` for slots.
//! - `vid`/`pid` are stable across reconnects and are what de-duplication keys
//!   on; `path` may change across ports and should be treated as diagnostic.

use crate::identifier::HardwareId;
use serde::{Deserialize, Serialize};

/// Snapshot of metadata describing a single device.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// Bus classification (`"hid"`, `"xinput"`).
    pub bus: Option<String>,

    /// USB Vendor ID (VID), if known.
    pub vid: Option<u16>,

    /// USB Product ID (PID), if known.
    pub pid: Option<u16>,

    /// Human-readable product name from the driver/firmware.
    pub product_string: Option<String>,

    /// Device serial number supplied by firmware/OS, if present.
    pub serial_number: Option<String>,

    /// HID interface index. Some stacks report `-1`; that is stored as `None`.
    pub interface_number: Option<i32>,

    /// HID Usage Page (e.g. `0x01` Generic Desktop).
    pub usage_page: Option<u16>,

    /// HID Usage within the page (e.g. `0x04` Joystick, `0x05` Gamepad).
    pub usage: Option<u16>,

    /// OS/topological path to the device.
    pub path: Option<String>,

    /// XInput slot (`0..4`) for high-level devices.
    pub xinput_slot: Option<u32>,

    /// XInput capability subtype name (e.g. `"Gamepad"`, `"Wheel"`).
    pub xinput_subtype: Option<String>,
}

impl DeviceMeta {
    /// Vendor/product pair, when both halves are known.
    pub fn hardware_id(&self) -> Option<HardwareId> {
        Some(HardwareId::new(self.vid?, self.pid?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardware_id_needs_both_halves() {
        let mut meta = DeviceMeta {
            vid: Some(0x045E),
            ..Default::default()
        };
        assert_eq!(meta.hardware_id(), None);
        meta.pid = Some(0x028E);
        assert_eq!(meta.hardware_id(), Some(HardwareId::new(0x045E, 0x028E)));
    }
}
