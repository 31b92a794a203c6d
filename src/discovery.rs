//! Hybrid discovery: HID devices filtered against the XInput marker set, then
//! XInput slots.
//!
//! All de-duplication happens on the HID side. A HID device whose model is in
//! the [`MarkerSet`] is left out because XInput reports it; XInput slots are
//! registered unconditionally.

use crate::backends::{
    AxisMode, CooperativeLevel, CreateOptions, DataFormat, DeviceFilter, DeviceProperties,
    EnumControl, HighLevelApi, LowLevelApi, PropertyStatus,
};
use crate::device::{DeviceClass, DeviceList};
use crate::error::{DeviceError, HybridError};
use crate::registry::MarkerSet;
use crate::report::{LowLevelOutcome, LowLevelRecord, SlotRecord};
use tracing::{debug, error, warn};

/// Put a freshly opened joystick into absolute axis mode.
///
/// Devices that do not support the property at all answer
/// [`PropertyStatus::NoEffect`], which is fine.
pub fn configure_absolute_axes(device: &mut dyn DeviceProperties) -> Result<(), DeviceError> {
    match device.set_axis_mode(AxisMode::Absolute) {
        Ok(PropertyStatus::Applied) | Ok(PropertyStatus::NoEffect) => Ok(()),
        Err(e) => {
            error!("unable to set absolute mode for joystick: {e}");
            Err(DeviceError::AxisMode(e))
        }
    }
}

/// Register every attached low-level game controller whose model is not in
/// `markers`. Returns the number of devices registered.
///
/// A device that fails to open or configure is logged and left out; only a
/// failure of the enumeration walk itself is returned as an error.
pub fn enumerate_low_level<L: LowLevelApi + ?Sized>(
    api: &L,
    markers: &MarkerSet,
    cooperative: CooperativeLevel,
    devices: &mut DeviceList,
    records: &mut Vec<LowLevelRecord>,
) -> Result<usize, HybridError> {
    let options = CreateOptions {
        format: DataFormat::Joystick,
        cooperative,
    };
    let mut registered = 0usize;

    api.enumerate_attached(DeviceFilter::GameController, &mut |instance| {
        let outcome = if markers.contains(instance.product) {
            debug!(
                "skipping HID path for XInput compatible joystick {} ({})",
                instance.name, instance.product
            );
            LowLevelOutcome::SkippedXInput
        } else {
            match api.create_device(instance, &options, &configure_absolute_axes) {
                Ok(device) => {
                    debug!("registered HID joystick {} ({})", instance.name, instance.product);
                    devices.add_device(DeviceClass::Joystick, device);
                    registered += 1;
                    LowLevelOutcome::Registered
                }
                Err(e) => {
                    warn!("unable to create HID joystick {}: {e}", instance.name);
                    LowLevelOutcome::CreateFailed {
                        error: e.to_string(),
                    }
                }
            }
        };

        records.push(LowLevelRecord {
            name: instance.name.clone(),
            path: instance.path.clone(),
            hardware_id: instance.product,
            outcome,
        });
        EnumControl::Continue
    })?;

    Ok(registered)
}

/// Register every connected XInput slot. Returns the number registered.
pub fn enumerate_high_level<H: HighLevelApi + ?Sized>(
    api: &H,
    devices: &mut DeviceList,
    records: &mut Vec<SlotRecord>,
) -> usize {
    let mut registered = 0usize;

    for slot in 0..api.slot_count() {
        if !api.slot_connected(slot) {
            records.push(SlotRecord {
                slot,
                connected: false,
                registered: false,
                error: None,
            });
            continue;
        }

        let error = match api.create_slot_device(slot) {
            Ok(device) => {
                debug!("registered XInput slot {slot}: {}", device.name());
                devices.add_device(DeviceClass::Joystick, device);
                registered += 1;
                None
            }
            Err(e) => {
                warn!("unable to create XInput device for slot {slot}: {e}");
                Some(e.to_string())
            }
        };

        records.push(SlotRecord {
            slot,
            connected: true,
            registered: error.is_none(),
            error,
        });
    }

    registered
}
