//! A single radio observation on one frequency.

use serde::{Deserialize, Serialize};

use crate::error::AcsError;

/// One survey measurement reported by the driver for a given frequency.
///
/// `channel_time_tx <= channel_time_busy <= channel_time` and
/// `channel_time > channel_time_tx` must hold. The latter is required for
/// the scoring denominator to be non-zero. [`SurveyMeasurement::new`] is the
/// only public constructor and enforces both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyMeasurement {
    /// Total time the radio spent observing, in microseconds.
    pub channel_time: u64,
    /// Time the medium was sensed busy, in microseconds.
    pub channel_time_busy: u64,
    /// Time spent transmitting during the observation window, in microseconds.
    pub channel_time_tx: u64,
    /// Observed noise floor, in dBm.
    pub nf: i8,
}

impl SurveyMeasurement {
    /// Build a measurement, rejecting any that would violate the ordering
    /// invariant or leave the scoring denominator at zero.
    pub fn new(
        channel_time: u64,
        channel_time_busy: u64,
        channel_time_tx: u64,
        nf: i8,
    ) -> Result<Self, AcsError> {
        if channel_time_tx > channel_time_busy {
            return Err(AcsError::InvalidMeasurement(format!(
                "channel_time_tx ({channel_time_tx}) exceeds channel_time_busy ({channel_time_busy})"
            )));
        }
        if channel_time_busy > channel_time {
            return Err(AcsError::InvalidMeasurement(format!(
                "channel_time_busy ({channel_time_busy}) exceeds channel_time ({channel_time})"
            )));
        }
        if channel_time <= channel_time_tx {
            return Err(AcsError::InvalidMeasurement(format!(
                "channel_time ({channel_time}) must exceed channel_time_tx ({channel_time_tx})"
            )));
        }
        Ok(Self {
            channel_time,
            channel_time_busy,
            channel_time_tx,
            nf,
        })
    }
}
