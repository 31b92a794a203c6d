//! Registered devices and the host device list.
//!
//! Every device the module registers implements [`InputDevice`] and is handed
//! to the host's [`DeviceList`] under a [`DeviceClass`]. Once added, the list
//! owns it; enumerators keep no reference.

use crate::identifier::HardwareId;
use crate::metadata::DeviceMeta;
use std::fmt;

/// Host device classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Keyboard,
    Mouse,
    Lightgun,
    Joystick,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceClass::Keyboard => "keyboard",
            DeviceClass::Mouse => "mouse",
            DeviceClass::Lightgun => "lightgun",
            DeviceClass::Joystick => "joystick",
        };
        f.write_str(s)
    }
}

/// Which API a device was registered through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceOrigin {
    LowLevel,
    HighLevel,
}

/// A device registered by one of the enumerators.
///
/// `id()` must be stable for the lifetime of the device and unique within one
/// pass (HID path on the low-level side, `xinput:{slot}` on the XInput side).
pub trait InputDevice {
    fn name(&self) -> &str;
    fn id(&self) -> &str;
    fn origin(&self) -> DeviceOrigin;
    fn metadata(&self) -> DeviceMeta;

    /// Vendor/product pair, when the backing API exposes one.
    fn hardware_id(&self) -> Option<HardwareId> {
        self.metadata().hardware_id()
    }
}

/// One registered device.
pub struct DeviceEntry {
    pub class: DeviceClass,
    pub device: Box<dyn InputDevice>,
}

impl fmt::Debug for DeviceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceEntry")
            .field("class", &self.class)
            .field("id", &self.device.id())
            .field("name", &self.device.name())
            .finish()
    }
}

/// Host-side device container. Order is registration order.
#[derive(Default, Debug)]
pub struct DeviceList {
    entries: Vec<DeviceEntry>,
}

impl DeviceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `device` under `class`.
    pub fn add_device(&mut self, class: DeviceClass, device: Box<dyn InputDevice>) {
        self.entries.push(DeviceEntry { class, device });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceEntry> {
        self.entries.iter()
    }

    /// Devices registered under `class`.
    pub fn of_class(&self, class: DeviceClass) -> impl Iterator<Item = &dyn InputDevice> {
        self.entries
            .iter()
            .filter(move |e| e.class == class)
            .map(|e| e.device.as_ref())
    }

    /// Drop every device (host-side teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
