//! Stateful cursor that drives successive remain-on-channel dwells.

use acs_types::{AcsError, Channel};
use tracing::debug;

use crate::driver::RadioDriver;

/// Result of [`RocIterator::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterStatus {
    /// A dwell request was issued; wait for the completion event.
    Issued,
    /// No channel remains and at least one channel was surveyed this pass.
    Valid,
    /// No channel remains and nothing was surveyed.
    Invalid,
}

/// Cursor into a channel list, issuing remain-on-channel dwells and skipping
/// disabled channels. The cursor only moves forward, and only after a
/// dwell's completion event. `advance` just looks ahead from the current
/// position and requests the next dwell.
pub struct RocIterator {
    cursor: usize,
}

impl RocIterator {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    pub fn at(cursor: usize) -> Self {
        Self { cursor }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    /// Advance the cursor past the channel that was just dwelled on.
    pub fn step(&mut self) {
        self.cursor += 1;
    }

    /// 1. If the cursor is past the channel count, fail invalid.
    /// 2. From the cursor onward, find the first non-disabled channel, issue
    ///    a dwell on it, leave the cursor pointing at it, return `Issued`.
    /// 3. If none remains, return `Valid` when `chans_surveyed > 0`, else `Invalid`.
    pub fn advance(
        &mut self,
        channels: &[Channel],
        duration_ms: u32,
        chans_surveyed: usize,
        driver: &mut dyn RadioDriver,
    ) -> Result<IterStatus, AcsError> {
        if self.cursor > channels.len() {
            return Err(AcsError::InvalidState("roc_iterator_cursor_out_of_range"));
        }

        while self.cursor < channels.len() {
            let channel = &channels[self.cursor];
            if channel.is_disabled() {
                self.cursor += 1;
                continue;
            }
            debug!(chan = channel.chan, freq = channel.freq_mhz, "issuing ROC dwell");
            driver.remain_on_channel(channel.freq_mhz, duration_ms)?;
            return Ok(IterStatus::Issued);
        }

        if chans_surveyed > 0 {
            Ok(IterStatus::Valid)
        } else {
            Ok(IterStatus::Invalid)
        }
    }
}

impl Default for RocIterator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acs_types::ChannelFlags;
    use std::cell::RefCell;

    struct FakeDriver {
        issued: RefCell<Vec<u32>>,
    }

    impl RadioDriver for FakeDriver {
        fn flags(&self) -> acs_types::DriverCapabilities {
            acs_types::DriverCapabilities::OFFCHANNEL_TX
        }
        fn scan(&mut self, _params: crate::driver::ScanParams) -> Result<(), AcsError> {
            Ok(())
        }
        fn remain_on_channel(&mut self, freq_mhz: u32, _duration_ms: u32) -> Result<(), AcsError> {
            self.issued.borrow_mut().push(freq_mhz);
            Ok(())
        }
        fn survey_freq(&mut self, _freq_mhz: u32) -> Result<Vec<acs_types::SurveyMeasurement>, AcsError> {
            Ok(vec![])
        }
    }

    fn channels() -> Vec<Channel> {
        vec![
            Channel::new(1, 2412, ChannelFlags::DISABLED),
            Channel::new(6, 2437, ChannelFlags::empty()),
            Channel::new(11, 2462, ChannelFlags::empty()),
        ]
    }

    #[test]
    fn skips_disabled_channel_on_issue() {
        let chans = channels();
        let mut iter = RocIterator::new();
        let mut driver = FakeDriver { issued: RefCell::new(vec![]) };
        let status = iter.advance(&chans, 100, 0, &mut driver).unwrap();
        assert_eq!(status, IterStatus::Issued);
        assert_eq!(driver.issued.borrow().as_slice(), &[2437]);
        assert_eq!(iter.cursor(), 1);
    }

    #[test]
    fn returns_valid_once_chans_surveyed_and_exhausted() {
        let chans = channels();
        let mut iter = RocIterator::at(chans.len());
        let mut driver = FakeDriver { issued: RefCell::new(vec![]) };
        let status = iter.advance(&chans, 100, 2, &mut driver).unwrap();
        assert_eq!(status, IterStatus::Valid);
    }

    #[test]
    fn returns_invalid_when_exhausted_with_nothing_surveyed() {
        let chans = channels();
        let mut iter = RocIterator::at(chans.len());
        let mut driver = FakeDriver { issued: RefCell::new(vec![]) };
        let status = iter.advance(&chans, 100, 0, &mut driver).unwrap();
        assert_eq!(status, IterStatus::Invalid);
    }

    #[test]
    fn cursor_past_channel_count_is_an_error() {
        let chans = channels();
        let mut iter = RocIterator::at(chans.len() + 1);
        let mut driver = FakeDriver { issued: RefCell::new(vec![]) };
        assert!(iter.advance(&chans, 100, 0, &mut driver).is_err());
    }
}
