//! XInput marker discovery via the device registry.
//!
//! The HID enumeration cannot tell whether a controller is also served by
//! XInput. The XInput companion driver stack does, however, tag the device
//! identifier of the HID interface it owns with an interface-group marker
//! (`IG_`), e.g. `HID\VID_045E&PID_028E&IG_00\...`. Scanning every present device
//! for that marker yields the set of models that XInput will report, which the
//! low-level pass then uses as a deny-list.
//!
//! Matching on the marker instead of a table of known Xbox VID/PIDs also covers
//! third-party and future XInput devices.

use crate::error::ScanError;
use crate::identifier::HardwareId;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Interface-group marker used by the XInput driver stack.
pub const XINPUT_MARKER: &str = "IG_";

/// Source of present-device identifier strings.
///
/// The Windows implementation is
/// [`ConfigManagerRegistry`](crate::backends::windows::ConfigManagerRegistry).
/// The two-phase buffer sizing the OS requires is an implementation detail.
pub trait DeviceRegistry {
    /// Identifier strings for every currently present device, any class.
    fn present_device_ids(&self) -> Result<Vec<String>, ScanError>;
}

/// Split a NUL-delimited, double-NUL-terminated list (`REG_MULTI_SZ` layout).
///
/// Stops at the first empty entry; a missing terminator simply ends the list.
/// Non-UTF-8 bytes are replaced (device IDs are ASCII in practice).
pub fn split_multi_sz(buf: &[u8]) -> Vec<String> {
    buf.split(|&b| b == 0)
        .take_while(|s| !s.is_empty())
        .map(|s| String::from_utf8_lossy(s).into_owned())
        .collect()
}

/// Models (vendor/product pairs) known to be served by XInput.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkerSet {
    ids: HashSet<HardwareId>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw identifier strings; strings without the marker or with a
    /// malformed VID/PID are skipped.
    pub fn from_device_ids<I, S>(device_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for raw in device_ids {
            let raw = raw.as_ref();
            trace!("device id: {raw}");
            if let Some(id) = marked_hardware_id(raw) {
                set.insert(id);
            }
        }
        set
    }

    pub fn insert(&mut self, id: HardwareId) -> bool {
        self.ids.insert(id)
    }

    #[inline]
    pub fn contains(&self, id: HardwareId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entries in ascending order (stable for reports and logs).
    pub fn sorted(&self) -> Vec<HardwareId> {
        let mut v: Vec<_> = self.ids.iter().copied().collect();
        v.sort();
        v
    }
}

impl FromIterator<HardwareId> for MarkerSet {
    fn from_iter<T: IntoIterator<Item = HardwareId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Hardware id of a marker-carrying identifier string, if it parses.
pub fn marked_hardware_id(device_id: &str) -> Option<HardwareId> {
    if !device_id.contains(XINPUT_MARKER) {
        return None;
    }
    HardwareId::parse(device_id)
}

/// Snapshot the registry and collect every XInput-marked model.
pub fn scan<R: DeviceRegistry + ?Sized>(registry: &R) -> Result<MarkerSet, ScanError> {
    let ids = registry.present_device_ids()?;
    let set = MarkerSet::from_device_ids(&ids);
    debug!(
        "scanned {} device id(s), {} XInput-marked model(s)",
        ids.len(),
        set.len()
    );
    Ok(set)
}
