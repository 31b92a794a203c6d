//! Platform API seams.
//!
//! The hybrid module talks to three platform services through the traits in
//! this module:
//! - [`DeviceRegistry`](crate::registry::DeviceRegistry) for present device IDs,
//! - [`LowLevelApi`] for HID-class enumeration and device creation,
//! - [`HighLevelApi`] for XInput slot queries,
//!
//! and obtains its helpers from a [`Platform`] factory.
//!
//! # Feature flags
//! - **`hid`** - enables the Windows HID/XInput bindings (default).

use crate::device::InputDevice;
use crate::error::{DeviceError, EnumError, HybridError, PropertyError};
use crate::identifier::HardwareId;
use crate::metadata::DeviceMeta;
use crate::registry::DeviceRegistry;

#[cfg(all(feature = "hid", target_os = "windows"))]
#[cfg_attr(docsrs, doc(cfg(all(feature = "hid", target_os = "windows"))))]
pub mod windows;

/// Number of XInput user slots.
pub const XINPUT_MAX_SLOTS: u32 = 4;

/// Device class requested from the low-level enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceFilter {
    /// Joysticks, gamepads, wheels, pedals and similar game controls.
    GameController,
    /// Every attached device.
    All,
}

/// Visitor answer for [`LowLevelApi::enumerate_attached`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumControl {
    Continue,
    Stop,
}

/// Input data layout requested at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    /// Standard joystick layout (axes, POVs, buttons).
    Joystick,
}

/// Access level for the created device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooperativeLevel {
    /// Input is delivered only while the host window has focus.
    Foreground,
    /// Input is delivered regardless of focus.
    Background,
}

impl CooperativeLevel {
    pub fn from_background(background: bool) -> Self {
        if background {
            CooperativeLevel::Background
        } else {
            CooperativeLevel::Foreground
        }
    }
}

/// Axis reporting mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisMode {
    Absolute,
    Relative,
}

/// Outcome of a property write that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyStatus {
    Applied,
    /// The device does not support the property; nothing changed.
    NoEffect,
}

/// Options passed to [`LowLevelApi::create_device`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreateOptions {
    pub format: DataFormat,
    pub cooperative: CooperativeLevel,
}

/// One attached low-level device as yielded by the enumeration.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceInstance {
    /// Instance name shown to users.
    pub name: String,
    /// Structured vendor/product pair read from the instance descriptor.
    pub product: HardwareId,
    /// Opaque OS path; what the helper uses to open the device.
    pub path: String,
    pub meta: DeviceMeta,
}

/// Properties writable on a freshly created device, before registration.
pub trait DeviceProperties {
    fn set_axis_mode(&mut self, mode: AxisMode) -> Result<PropertyStatus, PropertyError>;
}

/// Post-creation configuration step run by [`LowLevelApi::create_device`].
pub type ConfigureFn<'a> = &'a dyn Fn(&mut dyn DeviceProperties) -> Result<(), DeviceError>;

/// Low-level (HID-class) enumeration and device construction.
///
/// Both methods take `&self` so `create_device` can be called from inside the
/// enumeration visitor.
pub trait LowLevelApi {
    /// Walk attached devices matching `filter`, calling `visit` for each on the
    /// caller's thread. `Err` means the walk itself is broken.
    fn enumerate_attached(
        &self,
        filter: DeviceFilter,
        visit: &mut dyn FnMut(&DeviceInstance) -> EnumControl,
    ) -> Result<(), EnumError>;

    /// Open `instance`, run `configure` on it, and wrap it for registration.
    /// A `configure` error drops the device.
    fn create_device(
        &self,
        instance: &DeviceInstance,
        options: &CreateOptions,
        configure: ConfigureFn<'_>,
    ) -> Result<Box<dyn InputDevice>, DeviceError>;
}

/// High-level (XInput) slot API.
pub trait HighLevelApi {
    fn slot_count(&self) -> u32 {
        XINPUT_MAX_SLOTS
    }

    fn slot_connected(&self, slot: u32) -> bool;

    /// Wrap a connected slot for registration.
    fn create_slot_device(&self, slot: u32) -> Result<Box<dyn InputDevice>, DeviceError>;
}

/// Factory for the per-module helpers.
///
/// `open_*` may be called again after the previous helper was dropped (module
/// re-initialization), and must then hand out a fresh, working helper.
pub trait Platform {
    type LowLevel: LowLevelApi;
    type HighLevel: HighLevelApi;
    type Registry: DeviceRegistry;

    fn open_low_level(&mut self) -> Result<Self::LowLevel, HybridError>;
    fn open_high_level(&mut self) -> Result<Self::HighLevel, HybridError>;
    fn registry(&self) -> &Self::Registry;
}

/// Whether a HID usage page/usage pair belongs to the game-controller class.
///
/// Accepted:
/// - `0x01` Generic Desktop: Joystick (`0x04`), Gamepad (`0x05`), Multi-axis (`0x08`)
/// - `0x02` Simulation Controls (rudders, pedals, throttles)
///
/// Pointer, system-control and vendor-defined collections are not controllers,
/// even when they live on the same physical device.
pub fn is_game_controller_usage(usage_page: u16, usage: u16) -> bool {
    match usage_page {
        0x01 => matches!(usage, 0x04 | 0x05 | 0x08),
        0x02 => true,
        _ => false,
    }
}
