//! Windows HID joystick wrapper.
//!
//! [`HidJoystick`] owns an opened `hidapi::HidDevice` for a game controller
//! registered through the low-level path. It is configured once at creation
//! (axis mode) and then handed to the host device list.
//!
//! This module does **not** read or decode reports.

use crate::backends::{AxisMode, CooperativeLevel, DeviceProperties, DeviceInstance, PropertyStatus};
use crate::device::{DeviceOrigin, InputDevice};
use crate::error::{DeviceError, PropertyError};
use crate::metadata::DeviceMeta;
use hidapi::{HidApi, HidDevice};
use std::ffi::CString;

/// HID-backed joystick registered through the low-level path.
pub struct HidJoystick {
    id: String,
    name: String,
    meta: DeviceMeta,
    cooperative: CooperativeLevel,
    #[allow(dead_code)] // held open for the device's lifetime
    raw: HidDevice,
}

impl HidJoystick {
    /// Open the device at `instance.path`.
    pub fn open(
        api: &HidApi,
        instance: &DeviceInstance,
        cooperative: CooperativeLevel,
    ) -> Result<Self, DeviceError> {
        let path = CString::new(instance.path.as_str())
            .map_err(|e| DeviceError::Open(format!("{}: {e}", instance.path)))?;
        let raw = api
            .open_path(&path)
            .map_err(|e| DeviceError::Open(format!("{}: {e}", instance.path)))?;

        Ok(Self {
            id: instance.path.clone(),
            name: instance.name.clone(),
            meta: instance.meta.clone(),
            cooperative,
            raw,
        })
    }

    pub fn cooperative_level(&self) -> CooperativeLevel {
        self.cooperative
    }
}

impl DeviceProperties for HidJoystick {
    /// HID input reports carry absolute values; there is no relative mode to
    /// switch away from.
    fn set_axis_mode(&mut self, mode: AxisMode) -> Result<PropertyStatus, PropertyError> {
        match mode {
            AxisMode::Absolute => Ok(PropertyStatus::NoEffect),
            AxisMode::Relative => Err(PropertyError::Unsupported),
        }
    }
}

impl InputDevice for HidJoystick {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn origin(&self) -> DeviceOrigin {
        DeviceOrigin::LowLevel
    }

    fn metadata(&self) -> DeviceMeta {
        self.meta.clone()
    }
}
