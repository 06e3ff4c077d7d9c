//! TOML-loadable configuration for a simulated ACS run.

use acs_types::{AcsConfig, ChannelFlags};
use serde::{Deserialize, Serialize};

/// One fixture measurement, in the same shape `SurveyMeasurement::new` expects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimSurvey {
    pub channel_time: u64,
    pub channel_time_busy: u64,
    pub channel_time_tx: u64,
    pub nf: i8,
}

/// A channel entry plus the fixture data the simulated driver hands back for
/// it, one entry per survey pass (in pass order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimChannel {
    pub chan: u8,
    pub freq_mhz: u32,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub passes: Vec<SimSurvey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub passes: u32,
    pub dwell_ms: u32,
    pub channels: Vec<SimChannel>,
}

impl SimConfig {
    pub fn acs_config(&self) -> AcsConfig {
        AcsConfig {
            acs_num_req_surveys: self.passes,
            acs_roc_duration_ms: self.dwell_ms,
        }
    }
}

impl Default for SimConfig {
    /// A three-channel 2.4GHz layout where channel 11 is the clear winner:
    /// channel 1 carries a busy neighbour, channel 6 is moderately loaded,
    /// channel 11 is quiet.
    fn default() -> Self {
        Self {
            passes: 2,
            dwell_ms: 200,
            channels: vec![
                SimChannel {
                    chan: 1,
                    freq_mhz: 2412,
                    disabled: false,
                    passes: vec![
                        SimSurvey { channel_time: 1000, channel_time_busy: 650, channel_time_tx: 0, nf: -88 },
                        SimSurvey { channel_time: 1000, channel_time_busy: 700, channel_time_tx: 0, nf: -87 },
                    ],
                },
                SimChannel {
                    chan: 6,
                    freq_mhz: 2437,
                    disabled: false,
                    passes: vec![
                        SimSurvey { channel_time: 1000, channel_time_busy: 300, channel_time_tx: 0, nf: -90 },
                        SimSurvey { channel_time: 1000, channel_time_busy: 350, channel_time_tx: 0, nf: -90 },
                    ],
                },
                SimChannel {
                    chan: 11,
                    freq_mhz: 2462,
                    disabled: false,
                    passes: vec![
                        SimSurvey { channel_time: 1000, channel_time_busy: 50, channel_time_tx: 0, nf: -95 },
                        SimSurvey { channel_time: 1000, channel_time_busy: 40, channel_time_tx: 0, nf: -95 },
                    ],
                },
            ],
        }
    }
}

pub fn channel_flags(sim: &SimChannel) -> ChannelFlags {
    if sim.disabled {
        ChannelFlags::DISABLED
    } else {
        ChannelFlags::empty()
    }
}
