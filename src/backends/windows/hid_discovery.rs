//! Windows low-level enumeration via `hidapi`.
//!
//! [`HidApiHelper`] implements [`LowLevelApi`]:
//! - `enumerate_attached` refreshes the `hidapi` device list and yields one
//!   [`DeviceInstance`] per game-controller collection
//! - `create_device` opens the collection as a [`HidJoystick`] and runs the
//!   caller's configuration step on it
//!
//! The vendor/product pair comes straight from the HID attributes, so it can
//! be compared against the XInput marker set without any string parsing.

use crate::backends::windows::hid_device::HidJoystick;
use crate::backends::{
    is_game_controller_usage, ConfigureFn, CreateOptions, DeviceFilter, DeviceInstance,
    EnumControl, LowLevelApi,
};
use crate::device::InputDevice;
use crate::error::{ApiKind, DeviceError, EnumError, HybridError};
use crate::identifier::HardwareId;
use crate::metadata::DeviceMeta;
use hidapi::{DeviceInfo, HidApi};
use std::cell::RefCell;
use tracing::trace;

/// Owns the `hidapi` context for one module instance.
pub struct HidApiHelper {
    api: RefCell<HidApi>,
}

impl HidApiHelper {
    pub fn initialize() -> Result<Self, HybridError> {
        let api = HidApi::new().map_err(|e| HybridError::HelperInit {
            api: ApiKind::LowLevel,
            reason: e.to_string(),
        })?;
        Ok(Self {
            api: RefCell::new(api),
        })
    }
}

fn accept(info: &DeviceInfo, filter: DeviceFilter) -> bool {
    match filter {
        DeviceFilter::All => true,
        DeviceFilter::GameController => is_game_controller_usage(info.usage_page(), info.usage()),
    }
}

/// Build a [`DeviceInstance`] for a `hidapi` device entry.
fn instance(info: &DeviceInfo) -> DeviceInstance {
    let path = info.path().to_string_lossy().to_string();
    let name = info.product_string().unwrap_or("Unknown").to_string();
    let interface_number = {
        let n = info.interface_number();
        if n >= 0 {
            Some(n)
        } else {
            None
        }
    };

    DeviceInstance {
        product: HardwareId::new(info.vendor_id(), info.product_id()),
        meta: DeviceMeta {
            bus: Some("hid".into()),
            vid: Some(info.vendor_id()),
            pid: Some(info.product_id()),
            product_string: info.product_string().map(|s| s.to_string()),
            serial_number: info.serial_number().map(|s| s.to_string()),
            usage_page: Some(info.usage_page()),
            usage: Some(info.usage()),
            interface_number,
            path: Some(path.clone()),
            ..Default::default()
        },
        name,
        path,
    }
}

impl LowLevelApi for HidApiHelper {
    fn enumerate_attached(
        &self,
        filter: DeviceFilter,
        visit: &mut dyn FnMut(&DeviceInstance) -> EnumControl,
    ) -> Result<(), EnumError> {
        self.api
            .borrow_mut()
            .refresh_devices()
            .map_err(|e| EnumError::new(format!("hidapi refresh failed: {e}")))?;

        // Snapshot first: `visit` calls back into `create_device`, which
        // borrows the context again.
        let instances: Vec<DeviceInstance> = self
            .api
            .borrow()
            .device_list()
            .filter(|info| accept(info, filter))
            .map(instance)
            .collect();

        for inst in &instances {
            trace!(
                "HID vid=0x{:04x} pid=0x{:04x} up={:?} u={:?} path={}",
                inst.product.vendor(),
                inst.product.product(),
                inst.meta.usage_page,
                inst.meta.usage,
                inst.path
            );
            if visit(inst) == EnumControl::Stop {
                break;
            }
        }
        Ok(())
    }

    fn create_device(
        &self,
        instance: &DeviceInstance,
        options: &CreateOptions,
        configure: ConfigureFn<'_>,
    ) -> Result<Box<dyn InputDevice>, DeviceError> {
        let api = self.api.borrow();
        let mut device = HidJoystick::open(&api, instance, options.cooperative)?;
        configure(&mut device)?;
        Ok(Box::new(device))
    }
}
