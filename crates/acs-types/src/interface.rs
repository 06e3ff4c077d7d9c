//! The subset of AP interface state that ACS is allowed to read and mutate.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::config::AcsConfig;

bitflags! {
    /// Driver capability bits; ACS only ever consults the off-channel TX bit,
    /// the rest are carried for a realistic capability set a real driver
    /// handle would expose.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DriverCapabilities: u32 {
        const OFFCHANNEL_TX = 0b0000_0001;
        const AP            = 0b0000_0010;
        const RADAR_DETECT  = 0b0000_0100;
    }
}

/// The subset of the AP interface state that ACS owns for the duration of
/// one invocation. Mutated only between `acs_init` and either the bring-up
/// callback being invoked or failure being signalled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceState {
    pub channels: Vec<Channel>,
    pub conf: AcsConfig,
    /// Write-only output: the chosen channel number on success.
    pub selected_channel: Option<u8>,
    /// Cursor into `channels`; 0-initialised.
    pub off_channel_freq_idx: usize,
    /// Count of channels that produced any survey data in the current invocation.
    pub chans_surveyed: usize,
    /// Number of full passes finished so far.
    pub acs_num_completed_surveys: u32,
    /// Minimum `min_nf` across all channels; the reference noise floor for scoring.
    pub lowest_nf: i8,
    pub drv_flags: DriverCapabilities,
}

impl InterfaceState {
    pub fn new(channels: Vec<Channel>, conf: AcsConfig, drv_flags: DriverCapabilities) -> Self {
        Self {
            channels,
            conf,
            selected_channel: None,
            off_channel_freq_idx: 0,
            chans_surveyed: 0,
            acs_num_completed_surveys: 0,
            lowest_nf: 0,
            drv_flags,
        }
    }

    /// Cleanup: reset every channel's survey data and all counters.
    /// Idempotent, safe on an already-clean state. Deliberately leaves
    /// `selected_channel` untouched: it is an output the controller writes
    /// only once a decision is reached, and a failed Handoff after a
    /// channel was already chosen should still show which channel was
    /// attempted rather than erase the record of it.
    pub fn reset_survey_state(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
        self.chans_surveyed = 0;
        self.off_channel_freq_idx = 0;
        self.acs_num_completed_surveys = 0;
    }

    /// Recompute `lowest_nf` as the minimum `min_nf` across all channels that
    /// have been surveyed at least once. Channels with no surveys (`min_nf == 0`
    /// by convention) do not participate, since an unsurveyed channel's 0 is a
    /// sentinel, not an observation.
    pub fn recompute_lowest_nf(&mut self) {
        self.lowest_nf = self
            .channels
            .iter()
            .filter(|c| c.survey_count > 0)
            .map(|c| c.min_nf)
            .min()
            .unwrap_or(0);
    }
}
