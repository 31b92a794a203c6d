//! hybridstick - hybrid HID/XInput joystick enumeration.
//!
//! Windows exposes an Xbox-style controller twice: once as a HID game
//! controller and once as an XInput slot. This crate registers every attached
//! controller exactly once, preferring XInput, by scanning the device registry
//! for XInput-marked models and leaving those out of the HID pass.
//!
//! The algorithm is platform-neutral and runs against the traits in
//! [`backends`]; the Windows bindings live in `backends::windows`.

pub mod backends;
pub mod config;
pub mod device;
pub mod discovery;
pub mod error;
pub mod identifier;
pub mod metadata;
pub mod module;
pub mod registry;
pub mod report;
pub mod xinput;

pub use config::ModuleOptions;
pub use device::*;
pub use error::*;
pub use identifier::HardwareId;
pub use metadata::DeviceMeta;
pub use module::*;
pub use registry::MarkerSet;
pub use report::EnumerationReport;
