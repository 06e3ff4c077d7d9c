//! One entry in the AP's mode description.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::survey::SurveyMeasurement;

bitflags! {
    /// Per-channel capability/restriction bits. Only `DISABLED` affects the
    /// engine's decisions; `RADAR` and `NO_IR` are carried for fidelity with
    /// real AP mode descriptions and surfaced read-only.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ChannelFlags: u8 {
        /// Channel must never be surveyed or selected.
        const DISABLED = 0b0000_0001;
        /// Channel requires radar detection (DFS) before use.
        const RADAR    = 0b0000_0010;
        /// Channel forbids initiating a radio transmission.
        const NO_IR    = 0b0000_0100;
    }
}

/// One channel entry in the AP's current operating mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub chan: u8,
    pub freq_mhz: u32,
    pub flags: ChannelFlags,
    pub survey_list: Vec<SurveyMeasurement>,
    pub survey_count: usize,
    /// Minimum `nf` seen across this channel's surveys; 0 when unknown.
    pub min_nf: i8,
    /// Accumulated-then-averaged interference score; meaningless until at
    /// least one survey has been folded in via [`Channel::recompute_interference_factor`].
    pub survey_interference_factor: f64,
}

impl Channel {
    pub fn new(chan: u8, freq_mhz: u32, flags: ChannelFlags) -> Self {
        Self {
            chan,
            freq_mhz,
            flags,
            survey_list: Vec::new(),
            survey_count: 0,
            min_nf: 0,
            survey_interference_factor: 0.0,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.flags.contains(ChannelFlags::DISABLED)
    }

    /// Usable iff it has at least one survey and is not disabled.
    pub fn is_usable(&self) -> bool {
        !self.is_disabled() && self.survey_count > 0 && !self.survey_list.is_empty()
    }

    /// Append a survey measurement, keeping `survey_count` and `min_nf`
    /// consistent with it.
    pub fn push_survey(&mut self, survey: SurveyMeasurement) {
        self.min_nf = match self.survey_list.first() {
            Some(_) => self.min_nf.min(survey.nf),
            None => survey.nf,
        };
        self.survey_list.push(survey);
        self.survey_count = self.survey_list.len();
    }

    /// Recompute `survey_interference_factor` as the mean of every
    /// measurement's factor.
    pub fn recompute_interference_factor(&mut self, nf_ref: i8) {
        if self.survey_list.is_empty() {
            self.survey_interference_factor = 0.0;
            return;
        }
        let sum: f64 = self
            .survey_list
            .iter()
            .map(|s| crate::scoring::interference_factor(s, nf_ref))
            .sum();
        self.survey_interference_factor = sum / self.survey_count as f64;
    }

    /// Free survey data and zero the derived counters. Safe to call
    /// repeatedly (idempotent).
    pub fn reset(&mut self) {
        self.survey_list.clear();
        self.survey_count = 0;
        self.min_nf = 0;
        self.survey_interference_factor = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey(nf: i8) -> SurveyMeasurement {
        SurveyMeasurement::new(1000, 100, 0, nf).unwrap()
    }

    #[test]
    fn min_nf_tracks_minimum_across_pushes() {
        let mut ch = Channel::new(1, 2412, ChannelFlags::empty());
        ch.push_survey(survey(-80));
        ch.push_survey(survey(-95));
        ch.push_survey(survey(-90));
        assert_eq!(ch.min_nf, -95);
        assert_eq!(ch.survey_count, 3);
        assert_eq!(ch.survey_count, ch.survey_list.len());
    }

    #[test]
    fn disabled_channel_is_never_usable() {
        let mut ch = Channel::new(1, 2412, ChannelFlags::DISABLED);
        ch.push_survey(survey(-90));
        assert!(!ch.is_usable());
    }

    #[test]
    fn channel_without_surveys_is_not_usable() {
        let ch = Channel::new(1, 2412, ChannelFlags::empty());
        assert!(!ch.is_usable());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut ch = Channel::new(1, 2412, ChannelFlags::empty());
        ch.push_survey(survey(-90));
        ch.reset();
        ch.reset();
        assert_eq!(ch.survey_count, 0);
        assert!(ch.survey_list.is_empty());
        assert_eq!(ch.min_nf, 0);
        assert_eq!(ch.survey_interference_factor, 0.0);
    }
}
