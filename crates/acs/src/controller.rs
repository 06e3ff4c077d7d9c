//! The top-level ACS state machine.
//!
//! An explicit state enum plus a cursor, driven by the driver's event
//! hooks. No hidden coroutine stack: every suspension point returns control
//! to the caller, and the only persisted continuation is this struct's own
//! fields.

use acs_types::{AcsError, AcsOutcome, BringUpResult, InterfaceState};
use tracing::{debug, error, info, warn};

use crate::driver::{BringUpCallback, RadioDriver, ScanParams};
use crate::roc_iter::{IterStatus, RocIterator};

/// Controller states. Termination is split into `TerminatedOk` and
/// `TerminatedFail` so the outcome is visible without consulting a separate
/// error field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Sanity,
    InitialScan,
    Surveying,
    PassComplete,
    Deciding,
    Handoff,
    TerminatedOk,
    TerminatedFail,
}

/// One entry of the optional decision trace: records why a channel did or
/// didn't win.
#[derive(Debug, Clone)]
pub struct DecisionTraceEntry {
    pub phase: &'static str,
    pub chan: Option<u8>,
    pub factor: Option<f64>,
}

/// The ACS controller: owns the interface state and the bring-up callback,
/// and is driven by the driver's completion events. The driver handle itself
/// is borrowed only for the duration of each call, never stored.
pub struct AcsController {
    state: ControllerState,
    iface: InterfaceState,
    iter: RocIterator,
    bring_up: Box<dyn BringUpCallback>,
    trace: Option<Vec<DecisionTraceEntry>>,
    last_error: Option<AcsError>,
}

impl AcsController {
    pub fn new(iface: InterfaceState, bring_up: Box<dyn BringUpCallback>) -> Self {
        Self {
            state: ControllerState::Idle,
            iface,
            iter: RocIterator::new(),
            bring_up,
            trace: None,
            last_error: None,
        }
    }

    /// Enable accumulation of a decision trace for introspection.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn interface(&self) -> &InterfaceState {
        &self.iface
    }

    pub fn trace(&self) -> Option<&[DecisionTraceEntry]> {
        self.trace.as_deref()
    }

    /// The error that caused the most recent `TerminatedFail`, if any.
    pub fn last_error(&self) -> Option<&AcsError> {
        self.last_error.as_ref()
    }

    fn record(&mut self, phase: &'static str, chan: Option<u8>, factor: Option<f64>) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(DecisionTraceEntry { phase, chan, factor });
        }
    }

    /// Idle -> Sanity -> InitialScan, or a terminal failure. Returns `Acs`
    /// once the initial scan request has been issued and a completion
    /// callback must be awaited, or `Invalid` if the decision is impossible
    /// up front.
    ///
    /// The scan-request step below returns a plain `Result`, so the mapping
    /// to `AcsOutcome` has no dead branch to worry about: success is
    /// always `Acs`, failure `Invalid`.
    pub fn init(&mut self, driver: &mut dyn RadioDriver) -> AcsOutcome {
        if self.state != ControllerState::Idle {
            warn!(state = ?self.state, "acs_init called outside Idle state");
        }
        self.state = ControllerState::Sanity;

        if let Err(e) = self.sanity_check(driver) {
            error!(error = %e, "ACS sanity check failed");
            return self.fail(e);
        }

        self.state = ControllerState::InitialScan;
        match driver.scan(ScanParams::default()) {
            Ok(()) => {
                info!("initial scan requested, awaiting completion");
                AcsOutcome::Acs
            }
            Err(e) => {
                error!(error = %e, "initial scan request failed");
                self.fail(e)
            }
        }
    }

    /// Capability sanity check ahead of the initial scan. There is no
    /// `chans_surveyed` check here: that counter is only ever incremented
    /// after `InitialScan` completes and is cleared on every terminal
    /// transition, so it is always zero by construction at this point and a
    /// guard on it would carry no information.
    fn sanity_check(&self, driver: &mut dyn RadioDriver) -> Result<(), AcsError> {
        if !driver
            .flags()
            .contains(acs_types::DriverCapabilities::OFFCHANNEL_TX)
        {
            return Err(AcsError::CapabilityMissing);
        }
        Ok(())
    }

    /// Driver event hook: the initial scan has completed.
    pub fn on_scan_complete(&mut self, driver: &mut dyn RadioDriver) -> AcsOutcome {
        if self.state != ControllerState::InitialScan {
            warn!(state = ?self.state, "on_scan_complete called outside InitialScan");
        }

        self.iface.reset_survey_state();
        self.iter.set_cursor(0);
        self.state = ControllerState::Surveying;

        match self.advance(driver) {
            Ok(IterStatus::Issued) => AcsOutcome::Acs,
            Ok(IterStatus::Valid) | Ok(IterStatus::Invalid) => {
                // All channels disabled before a single dwell was issued: the
                // sweep can never produce data. Fail explicitly rather than
                // silently no-op.
                error!("no non-disabled channel available at initial scan completion");
                self.fail(AcsError::NoUsableChannel)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Driver event hook: ROC dwell started, i.e. we went off-channel.
    /// Informational; only fails the engine if the driver reports a
    /// non-zero status.
    pub fn on_roc_started(&mut self, status: i32) -> AcsOutcome {
        if status != 0 {
            error!(status, "ROC start reported failure status");
            return self.fail(AcsError::DriverEvent { op: "roc_start", status });
        }
        debug!("ROC dwell started");
        AcsOutcome::Acs
    }

    /// Driver event hook: ROC dwell cancelled/ended, i.e. we came back.
    /// Pulls the survey dump and advances the cursor.
    pub fn on_roc_cancelled(&mut self, freq_mhz: u32, status: i32, driver: &mut dyn RadioDriver) -> AcsOutcome {
        if status != 0 {
            error!(status, freq_mhz, "ROC cancel reported failure status");
            return self.fail(AcsError::DriverEvent { op: "roc_cancel", status });
        }

        if let Err(e) = self.pull_survey_dump(freq_mhz, driver) {
            error!(error = %e, freq_mhz, "survey dump failed");
            return self.fail(e);
        }

        self.iter.step();
        match self.advance(driver) {
            Ok(IterStatus::Issued) => AcsOutcome::Acs,
            Ok(IterStatus::Valid) => self.pass_complete(driver),
            // The iterator has walked every channel and chans_surveyed is
            // still zero. This is a legitimate terminal outcome, not an
            // anomaly: route straight to Deciding, which reports it
            // precisely as EmptySurvey rather than a generic selection
            // failure.
            Ok(IterStatus::Invalid) => self.decide(driver),
            Err(e) => self.fail(e),
        }
    }

    fn pull_survey_dump(&mut self, freq_mhz: u32, driver: &mut dyn RadioDriver) -> Result<(), AcsError> {
        let surveys = driver.survey_freq(freq_mhz)?;
        let channel = self
            .iface
            .channels
            .iter_mut()
            .find(|c| c.freq_mhz == freq_mhz)
            .ok_or_else(|| AcsError::DriverRequest(format!("no channel matches freq {freq_mhz}")))?;

        let was_surveyed = channel.survey_count > 0;
        for survey in surveys {
            channel.push_survey(survey);
        }
        if !was_surveyed && channel.survey_count > 0 {
            self.iface.chans_surveyed += 1;
        }
        self.iface.recompute_lowest_nf();
        Ok(())
    }

    fn advance(&mut self, driver: &mut dyn RadioDriver) -> Result<IterStatus, AcsError> {
        self.iter.advance(
            &self.iface.channels,
            self.iface.conf.acs_roc_duration_ms,
            self.iface.chans_surveyed,
            driver,
        )
        .map(|status| {
            self.iface.off_channel_freq_idx = self.iter.cursor();
            status
        })
    }

    /// Always fires once a pass's iterator is exhausted. Starts the next
    /// pass or moves to Deciding.
    fn pass_complete(&mut self, driver: &mut dyn RadioDriver) -> AcsOutcome {
        self.state = ControllerState::PassComplete;
        self.iface.acs_num_completed_surveys += 1;
        info!(
            completed = self.iface.acs_num_completed_surveys,
            required = self.iface.conf.normalized_passes(),
            "survey pass complete"
        );

        if self.iface.acs_num_completed_surveys < self.iface.conf.normalized_passes() {
            self.iter.set_cursor(0);
            self.state = ControllerState::Surveying;
            match self.advance(driver) {
                Ok(IterStatus::Issued) => AcsOutcome::Acs,
                Ok(IterStatus::Valid) | Ok(IterStatus::Invalid) => {
                    // All channels disabled mid-sweep between passes is
                    // impossible in practice, since the channel set never
                    // changes mid-invocation, but it still gets a real
                    // failure rather than a silent fallthrough.
                    error!("next pass could not issue a single dwell");
                    self.fail(AcsError::NoUsableChannel)
                }
                Err(e) => self.fail(e),
            }
        } else {
            self.decide(driver)
        }
    }

    /// Score every usable channel and hand off.
    fn decide(&mut self, driver: &mut dyn RadioDriver) -> AcsOutcome {
        self.state = ControllerState::Deciding;

        if self.iface.chans_surveyed == 0 {
            error!("no channel produced any survey data");
            return self.fail(AcsError::EmptySurvey);
        }

        let nf_ref = self.iface.lowest_nf;
        for channel in &mut self.iface.channels {
            channel.recompute_interference_factor(nf_ref);
        }

        let ideal = match crate::selector::select_ideal_channel(&self.iface.channels) {
            Some(c) => (c.chan, c.survey_interference_factor),
            None => {
                error!("selector found no usable channel");
                return self.fail(AcsError::NoUsableChannel);
            }
        };
        self.record("decide", Some(ideal.0), Some(ideal.1));

        self.iface.selected_channel = Some(ideal.0);
        info!(chan = ideal.0, factor = ideal.1, "channel selected, handing off");
        self.handoff(ideal.0, driver)
    }

    /// Invoke the bring-up callback and terminate according to its result.
    fn handoff(&mut self, chan: u8, _driver: &mut dyn RadioDriver) -> AcsOutcome {
        self.state = ControllerState::Handoff;
        match self.bring_up.bring_up(chan) {
            BringUpResult::Valid => {
                info!(chan, "bring-up succeeded");
                self.state = ControllerState::TerminatedOk;
                AcsOutcome::Valid
            }
            BringUpResult::Failed => {
                error!(chan, "bring-up failed");
                self.fail(AcsError::Handoff)
            }
        }
    }

    fn fail(&mut self, err: AcsError) -> AcsOutcome {
        self.record("fail", None, None);
        self.last_error = Some(err);
        self.state = ControllerState::TerminatedFail;
        self.iface.reset_survey_state();
        AcsOutcome::Invalid
    }

    /// Reset the interface state directly, for callers that want to reuse a
    /// controller across runs without constructing a new one.
    pub fn cleanup(&mut self) {
        self.iface.reset_survey_state();
    }
}
