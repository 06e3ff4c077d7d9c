//! Capability seams the controller drives.
//!
//! These traits describe the external collaborators the controller never
//! implements itself: the radio driver and the AP bring-up sequence. The
//! engine only ever talks to them through these traits, so a real driver
//! and a test fake are interchangeable.

use acs_types::AcsError;

/// Parameters for the initial scan request. Left empty: nothing here
/// requires a scan to carry tunable parameters, only that it be requested
/// and completed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanParams;

/// The driver capability set ACS consumes.
///
/// `remain_on_channel` is a request only; its asynchronous completion is
/// delivered back to the controller via [`crate::controller::AcsController::on_roc_started`]
/// and [`crate::controller::AcsController::on_roc_cancelled`], not as this
/// method's return value.
pub trait RadioDriver {
    /// Capability bitfield; only the off-channel TX bit is consulted.
    fn flags(&self) -> acs_types::DriverCapabilities;

    /// Request an initial scan. Completion is reported out-of-band via
    /// `on_scan_complete`.
    fn scan(&mut self, params: ScanParams) -> Result<(), AcsError>;

    /// Request a remain-on-channel dwell. Completion is reported out-of-band
    /// via `on_roc_started`/`on_roc_cancelled`.
    fn remain_on_channel(&mut self, freq_mhz: u32, duration_ms: u32) -> Result<(), AcsError>;

    /// Synchronously deposit zero or more survey measurements for `freq_mhz`.
    fn survey_freq(&mut self, freq_mhz: u32) -> Result<Vec<acs_types::SurveyMeasurement>, AcsError>;
}

/// The AP bring-up collaborator invoked once a channel has been chosen.
/// The controller calls through this trait on the Handoff transition and
/// never implements the actual channel switch itself.
pub trait BringUpCallback {
    fn bring_up(&mut self, channel: u8) -> acs_types::BringUpResult;
}
