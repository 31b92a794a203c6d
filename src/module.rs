//! The hybrid joystick input module.
//!
//! [`HybridJoystickModule`] is what a host registers as its joystick provider.
//! The host calls [`probe`](InputModule::probe) to ask whether the module can
//! run at all, [`init`](InputModule::init) once options are known,
//! [`input_init`](InputModule::input_init) to populate its device list, and
//! [`exit`](InputModule::exit) on shutdown.
//!
//! # Pass order
//! 1. Open both helpers (HID and XInput); failure makes the module unavailable.
//! 2. Scan the device registry for XInput-marked models. On failure the marker
//!    set is empty and XInput is skipped for this pass.
//! 3. Enumerate HID game controllers, skipping marked models.
//! 4. Enumerate XInput slots (unless step 2 failed).
//!
//! If step 2 fails, a controller visible to both APIs is registered once
//! through HID and not at all through XInput, so nothing is listed twice.

use crate::backends::{CooperativeLevel, Platform};
use crate::config::ModuleOptions;
use crate::device::DeviceList;
use crate::discovery::{enumerate_high_level, enumerate_low_level};
use crate::error::HybridError;
use crate::registry::{self, MarkerSet};
use crate::report::{EnumerationReport, ScanOutcome};
use tracing::{debug, error, info, warn};

/// Host-facing input provider contract.
pub trait InputModule {
    fn name(&self) -> &str;

    /// Cheap availability check; creates helpers as a side effect.
    fn probe(&mut self) -> bool;

    fn init(&mut self, options: &ModuleOptions) -> Result<(), HybridError>;

    /// Enumerate devices into `devices`.
    fn input_init(&mut self, devices: &mut DeviceList) -> Result<EnumerationReport, HybridError>;

    /// Release helpers. Safe to call repeatedly.
    fn exit(&mut self);
}

/// Progress of one `input_init` pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitPhase {
    NotStarted,
    HelpersReady,
    MarkerScanned,
    /// Degraded: marker set empty, XInput step will be skipped.
    MarkerScanFailed,
    LowLevelEnumerated,
    HighLevelEnumerated,
    Done,
}

/// Owns the two API helpers for the lifetime of the module.
///
/// `open` creates whichever helper is missing, so it can be called again after
/// a partial failure or after `close`.
pub struct Helpers<P: Platform> {
    low: Option<P::LowLevel>,
    high: Option<P::HighLevel>,
}

impl<P: Platform> Default for Helpers<P> {
    fn default() -> Self {
        Self {
            low: None,
            high: None,
        }
    }
}

impl<P: Platform> Helpers<P> {
    pub fn open(&mut self, platform: &mut P) -> Result<(), HybridError> {
        if self.high.is_none() {
            self.high = Some(platform.open_high_level()?);
        }
        if self.low.is_none() {
            self.low = Some(platform.open_low_level()?);
        }
        Ok(())
    }

    pub fn close(&mut self) {
        self.high = None;
        self.low = None;
    }

    pub fn is_open(&self) -> bool {
        self.low.is_some() && self.high.is_some()
    }

    pub fn low_level(&self) -> Option<&P::LowLevel> {
        self.low.as_ref()
    }

    pub fn high_level(&self) -> Option<&P::HighLevel> {
        self.high.as_ref()
    }
}

/// Joystick provider merging HID and XInput enumeration.
pub struct HybridJoystickModule<P: Platform> {
    platform: P,
    helpers: Helpers<P>,
    options: ModuleOptions,
    phase: InitPhase,
}

impl<P: Platform> HybridJoystickModule<P> {
    pub const NAME: &'static str = "winhybrid";

    pub fn new(platform: P) -> Self {
        Self {
            platform,
            helpers: Helpers::default(),
            options: ModuleOptions::default(),
            phase: InitPhase::NotStarted,
        }
    }

    pub fn phase(&self) -> InitPhase {
        self.phase
    }

    pub fn options(&self) -> &ModuleOptions {
        &self.options
    }

    pub fn helpers(&self) -> &Helpers<P> {
        &self.helpers
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }
}

impl<P: Platform> InputModule for HybridJoystickModule<P> {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn probe(&mut self) -> bool {
        match self.helpers.open(&mut self.platform) {
            Ok(()) => true,
            Err(e) => {
                debug!("hybrid joystick module isn't supported, falling back: {e}");
                false
            }
        }
    }

    fn init(&mut self, options: &ModuleOptions) -> Result<(), HybridError> {
        self.options = options.clone();
        if let Err(e) = self.helpers.open(&mut self.platform) {
            error!("hybrid joystick module helpers failed to initialize: {e}");
            return Err(e);
        }
        Ok(())
    }

    fn input_init(&mut self, devices: &mut DeviceList) -> Result<EnumerationReport, HybridError> {
        self.phase = InitPhase::NotStarted;
        let (Some(low), Some(high)) = (self.helpers.low_level(), self.helpers.high_level()) else {
            return Err(HybridError::NotInitialized);
        };
        self.phase = InitPhase::HelpersReady;

        let mut report = EnumerationReport::default();
        let markers = match registry::scan(self.platform.registry()) {
            Ok(set) => {
                self.phase = InitPhase::MarkerScanned;
                report.scan = ScanOutcome::Scanned;
                set
            }
            Err(e) => {
                warn!("XInput device detection failed, XInput won't be used: {e}");
                self.phase = InitPhase::MarkerScanFailed;
                report.scan = ScanOutcome::Failed {
                    error: e.to_string(),
                };
                MarkerSet::new()
            }
        };
        report.markers = markers.sorted();
        let xinput_enabled = self.phase == InitPhase::MarkerScanned;

        let cooperative = CooperativeLevel::from_background(self.options.background_input);
        let hid_count =
            enumerate_low_level(low, &markers, cooperative, devices, &mut report.low_level)
                .inspect_err(|e| error!("{e}"))?;
        drop(markers);
        self.phase = InitPhase::LowLevelEnumerated;

        let xinput_count = if xinput_enabled {
            let n = enumerate_high_level(high, devices, &mut report.high_level);
            self.phase = InitPhase::HighLevelEnumerated;
            n
        } else {
            report.high_level_skipped = true;
            0
        };

        self.phase = InitPhase::Done;
        info!("hybrid joystick module registered {hid_count} HID and {xinput_count} XInput device(s)");
        Ok(report)
    }

    fn exit(&mut self) {
        self.helpers.close();
        self.phase = InitPhase::NotStarted;
    }
}
