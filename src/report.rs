//! Enumeration diagnostics.
//!
//! [`EnumerationReport`] records every decision one `input_init` pass made:
//! the marker scan outcome, which HID devices were registered, skipped as
//! XInput-compatible or failed creation, and which XInput slots were found.
//! It does not influence runtime behavior; it exists so tooling can answer
//! "why is my stick missing / listed twice".

use crate::identifier::HardwareId;
use serde::Serialize;

/// Result of the registry marker scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// No scan ran yet in this pass.
    #[default]
    NotRun,
    Scanned,
    /// Scan failed; XInput was skipped for this pass.
    Failed { error: String },
}

/// What happened to one low-level device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LowLevelOutcome {
    Registered,
    /// Model carries the XInput marker; XInput will report it instead.
    #[serde(rename = "skipped_xinput")]
    SkippedXInput,
    CreateFailed { error: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LowLevelRecord {
    pub name: String,
    pub path: String,
    pub hardware_id: HardwareId,
    #[serde(flatten)]
    pub outcome: LowLevelOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotRecord {
    pub slot: u32,
    pub connected: bool,
    pub registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-pass enumeration report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EnumerationReport {
    pub scan: ScanOutcome,
    /// XInput-marked models, ascending.
    pub markers: Vec<HardwareId>,
    pub low_level: Vec<LowLevelRecord>,
    /// Empty when the XInput step was skipped.
    pub high_level: Vec<SlotRecord>,
    pub high_level_skipped: bool,
}

impl EnumerationReport {
    pub fn registered_low_level(&self) -> usize {
        self.low_level
            .iter()
            .filter(|r| r.outcome == LowLevelOutcome::Registered)
            .count()
    }

    pub fn registered_high_level(&self) -> usize {
        self.high_level.iter().filter(|r| r.registered).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
