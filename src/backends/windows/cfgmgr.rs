//! Present-device identifier list via the Configuration Manager (cfgmgr32).

use crate::error::ScanError;
use crate::registry::{split_multi_sz, DeviceRegistry};

use core::ptr;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    CM_Get_Device_ID_ListA, CM_Get_Device_ID_List_SizeA, CM_GETIDLIST_FILTER_PRESENT, CR_SUCCESS,
};

/// [`DeviceRegistry`] backed by `CM_Get_Device_ID_List*`.
///
/// No class filter is applied: the XInput marker can sit on a device of any
/// setup class.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigManagerRegistry;

impl DeviceRegistry for ConfigManagerRegistry {
    fn present_device_ids(&self) -> Result<Vec<String>, ScanError> {
        let flags = CM_GETIDLIST_FILTER_PRESENT;

        // 1) Required size in bytes, including the final double NUL.
        let mut len: u32 = 0;
        let ret = unsafe { CM_Get_Device_ID_List_SizeA(&mut len, ptr::null(), flags) };
        if ret != CR_SUCCESS {
            return Err(ScanError::SizeQuery(ret));
        }

        // 2) Fetch into a buffer of exactly that size.
        let mut buf = vec![0u8; len as usize];
        let ret = unsafe { CM_Get_Device_ID_ListA(ptr::null(), buf.as_mut_ptr(), len, flags) };
        if ret != CR_SUCCESS {
            return Err(ScanError::ListQuery(ret));
        }

        Ok(split_multi_sz(&buf))
    }
}
