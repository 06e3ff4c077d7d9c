//! A stubbed-out radio driver that replays fixture data instead of talking
//! to hardware.

use std::collections::{HashMap, VecDeque};

use acs::{BringUpCallback, RadioDriver, ScanParams};
use acs_types::{AcsError, BringUpResult, DriverCapabilities, SurveyMeasurement};
use tracing::{debug, info};

use crate::config::SimConfig;

pub struct SimDriver {
    queues: HashMap<u32, VecDeque<Vec<SurveyMeasurement>>>,
}

impl SimDriver {
    pub fn new(config: &SimConfig) -> Result<Self, AcsError> {
        if config.channels.is_empty() {
            return Err(AcsError::DriverRequest("no channels configured".into()));
        }

        let mut queues = HashMap::new();
        for channel in &config.channels {
            let mut passes = VecDeque::new();
            for fixture in &channel.passes {
                let measurement = SurveyMeasurement::new(
                    fixture.channel_time,
                    fixture.channel_time_busy,
                    fixture.channel_time_tx,
                    fixture.nf,
                )?;
                passes.push_back(vec![measurement]);
            }
            queues.insert(channel.freq_mhz, passes);
        }

        info!(channels = queues.len(), "simulated driver ready");
        Ok(Self { queues })
    }
}

impl RadioDriver for SimDriver {
    fn flags(&self) -> DriverCapabilities {
        DriverCapabilities::OFFCHANNEL_TX | DriverCapabilities::AP
    }

    fn scan(&mut self, _params: ScanParams) -> Result<(), AcsError> {
        debug!("simulated initial scan requested");
        Ok(())
    }

    fn remain_on_channel(&mut self, freq_mhz: u32, duration_ms: u32) -> Result<(), AcsError> {
        debug!(freq_mhz, duration_ms, "simulated ROC dwell issued");
        Ok(())
    }

    fn survey_freq(&mut self, freq_mhz: u32) -> Result<Vec<SurveyMeasurement>, AcsError> {
        Ok(self
            .queues
            .get_mut(&freq_mhz)
            .and_then(|q| q.pop_front())
            .unwrap_or_default())
    }
}

/// Always approves the handoff; stands in for the platform-specific code
/// that would actually switch the interface to the chosen channel.
pub struct SimBringUp;

impl BringUpCallback for SimBringUp {
    fn bring_up(&mut self, channel: u8) -> BringUpResult {
        info!(channel, "simulated bring-up: channel switch applied");
        BringUpResult::Valid
    }
}
