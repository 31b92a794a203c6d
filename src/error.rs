//! Error types.
//!
//! Each failure class has a different blast radius, so each gets its own type:
//! - [`HybridError`] is what the module surfaces to the host.
//! - [`ScanError`] degrades the pass (empty marker set, XInput skipped).
//! - [`DeviceError`] / [`PropertyError`] drop a single device.
//! - [`EnumError`] aborts the pass.

use std::fmt;
use thiserror::Error;

/// Which platform API a helper wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiKind {
    /// HID-class enumeration (every attached controller).
    LowLevel,
    /// XInput slot API.
    HighLevel,
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKind::LowLevel => f.write_str("HID"),
            ApiKind::HighLevel => f.write_str("XInput"),
        }
    }
}

/// Errors surfaced by [`HybridJoystickModule`](crate::module::HybridJoystickModule).
#[derive(Error, Debug)]
pub enum HybridError {
    #[error("{api} API failed to initialize: {reason}")]
    HelperInit { api: ApiKind, reason: String },

    #[error("module helpers are not initialized; call init() first")]
    NotInitialized,

    #[error("unable to enumerate game controllers: {0}")]
    Enumeration(#[from] EnumError),

    #[error("invalid module options: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unable to serialize module options: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Device registry query failure. Each phase carries the raw status code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("device ID list size query failed (status 0x{0:X})")]
    SizeQuery(u32),

    #[error("device ID list query failed (status 0x{0:X})")]
    ListQuery(u32),
}

/// The low-level enumeration walk itself failed.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct EnumError {
    pub message: String,
}

impl EnumError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A device property could not be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("property is not supported in this mode")]
    Unsupported,

    #[error("property write failed (status 0x{0:X})")]
    Failed(u32),
}

/// Creating one device failed. Never fatal for the pass.
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("unable to open device: {0}")]
    Open(String),

    #[error("unable to set absolute axis mode: {0}")]
    AxisMode(#[from] PropertyError),

    #[error("XInput slot {0} is not connected")]
    SlotDisconnected(u32),
}
