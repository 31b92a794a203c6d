//! Windows XInput slot helper and device wrapper.
//!
//! Controllers that carry the XInput marker are registered through this path
//! rather than HID because XInput offers:
//! - stable slot-based identity (`0..4`),
//! - a standardized layout and capability report,
//! - correct separate trigger axes (the HID compatibility endpoint merges them).
//!
//! # Limitations
//! - XInput does not expose VID/PID, so slot devices carry no hardware id.
//! - `windows-sys` links `xinput1_4.dll` at load time. On a system without
//!   it the process fails to start; [`XInputHelper::initialize`] never gets
//!   the chance to report the helper as unavailable.

use crate::backends::{HighLevelApi, XINPUT_MAX_SLOTS};
use crate::device::{DeviceOrigin, InputDevice};
use crate::error::{ApiKind, DeviceError, HybridError};
use crate::metadata::DeviceMeta;
use crate::xinput::subtype_name;

use windows_sys::Win32::Foundation::{ERROR_DEVICE_NOT_CONNECTED, ERROR_SUCCESS};
use windows_sys::Win32::UI::Input::XboxController::*;

/// XInput slot helper.
#[derive(Debug, Default)]
pub struct XInputHelper;

impl XInputHelper {
    /// Check that XInput answers at all. A disconnected slot 0 is fine;
    /// any other error means the API is unusable.
    ///
    /// The XInput DLL is an import of this binary, not loaded here, so a
    /// missing DLL is a process load failure rather than an `Err` from this
    /// call (and `probe()` returning false).
    pub fn initialize() -> Result<Self, HybridError> {
        // FFI struct: must be manually zeroed
        let mut state: XINPUT_STATE = unsafe { std::mem::zeroed() };
        let res = unsafe { XInputGetState(0, &mut state) };
        if res != ERROR_SUCCESS && res != ERROR_DEVICE_NOT_CONNECTED {
            return Err(HybridError::HelperInit {
                api: ApiKind::HighLevel,
                reason: format!("XInputGetState returned {res}"),
            });
        }
        Ok(Self)
    }

    fn capabilities(slot: u32) -> Option<XINPUT_CAPABILITIES> {
        let mut caps: XINPUT_CAPABILITIES = unsafe { std::mem::zeroed() };
        let res = unsafe { XInputGetCapabilities(slot, 0, &mut caps) };
        (res == ERROR_SUCCESS).then_some(caps)
    }
}

impl HighLevelApi for XInputHelper {
    fn slot_count(&self) -> u32 {
        XINPUT_MAX_SLOTS
    }

    fn slot_connected(&self, slot: u32) -> bool {
        let mut state: XINPUT_STATE = unsafe { std::mem::zeroed() };
        // NOTE: XInputGetState returns 0 on success.
        unsafe { XInputGetState(slot, &mut state) == ERROR_SUCCESS }
    }

    fn create_slot_device(&self, slot: u32) -> Result<Box<dyn InputDevice>, DeviceError> {
        let caps = Self::capabilities(slot).ok_or(DeviceError::SlotDisconnected(slot))?;
        Ok(Box::new(XInputDevice::new(slot, caps.SubType)))
    }
}

/// XInput-backed device bound to one slot.
pub struct XInputDevice {
    slot: u32,
    id: String,
    name: String,
    meta: DeviceMeta,
}

impl XInputDevice {
    pub fn new(slot: u32, subtype: u8) -> Self {
        let sub = subtype_name(subtype);
        let id = format!("xinput:{slot}");
        Self {
            slot,
            name: format!("XInput Player {} ({sub})", slot + 1),
            meta: DeviceMeta {
                bus: Some("xinput".into()),
                product_string: Some(format!("XInput {sub}")),
                path: Some(id.clone()),
                xinput_slot: Some(slot),
                xinput_subtype: Some(sub.to_string()),
                ..Default::default()
            },
            id,
        }
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }
}

impl InputDevice for XInputDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn origin(&self) -> DeviceOrigin {
        DeviceOrigin::HighLevel
    }

    fn metadata(&self) -> DeviceMeta {
        self.meta.clone()
    }
}
