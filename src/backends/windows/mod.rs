#![cfg(target_os = "windows")]

//! Windows bindings for the hybrid joystick module.
//!
//! - **cfgmgr** - present device IDs via the Configuration Manager
//! - **HID** enumeration and device opening via `hidapi` (the low-level API)
//! - **XInput** slot queries via `XInputGetState` / `XInputGetCapabilities`
//!
//! Most users only need [`WindowsPlatform`]:
//! ```no_run
//! use hybridstick::backends::windows::WindowsPlatform;
//! use hybridstick::{DeviceList, HybridJoystickModule, InputModule, ModuleOptions};
//!
//! let mut module = HybridJoystickModule::new(WindowsPlatform::default());
//! if module.probe() {
//!     module.init(&ModuleOptions::default()).expect("init");
//!     let mut devices = DeviceList::new();
//!     module.input_init(&mut devices).expect("enumerate");
//! }
//! ```

pub mod cfgmgr;
pub mod hid_device;
pub mod hid_discovery;
pub mod xinput_devices;

pub use cfgmgr::ConfigManagerRegistry;
pub use hid_device::HidJoystick;
pub use hid_discovery::HidApiHelper;
pub use xinput_devices::{XInputDevice, XInputHelper};

use crate::backends::Platform;
use crate::config::ModuleOptions;
use crate::device::DeviceList;
use crate::error::HybridError;
use crate::module::{HybridJoystickModule, InputModule};
use crate::report::EnumerationReport;

/// Helper factory for the Windows APIs.
#[derive(Debug, Default)]
pub struct WindowsPlatform {
    registry: ConfigManagerRegistry,
}

impl Platform for WindowsPlatform {
    type LowLevel = HidApiHelper;
    type HighLevel = XInputHelper;
    type Registry = ConfigManagerRegistry;

    fn open_low_level(&mut self) -> Result<HidApiHelper, HybridError> {
        HidApiHelper::initialize()
    }

    fn open_high_level(&mut self) -> Result<XInputHelper, HybridError> {
        XInputHelper::initialize()
    }

    fn registry(&self) -> &ConfigManagerRegistry {
        &self.registry
    }
}

/// One-shot discovery: init, enumerate and release a fresh module.
///
/// Hosts that keep the module around should drive [`HybridJoystickModule`]
/// directly instead.
pub fn discover(options: &ModuleOptions) -> Result<(DeviceList, EnumerationReport), HybridError> {
    let mut module = HybridJoystickModule::new(WindowsPlatform::default());
    module.init(options)?;
    let mut devices = DeviceList::new();
    let report = module.input_init(&mut devices)?;
    module.exit();
    Ok((devices, report))
}
