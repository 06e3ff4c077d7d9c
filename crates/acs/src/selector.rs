//! Picks the ideal channel out of the surveyed set.

use acs_types::Channel;

/// Scan all usable channels and return the one with the lowest average
/// interference factor. Ties go to the first-seen channel (iteration order
/// of `channels`), equivalent to an argmin over the usable subset, with no
/// later channel able to overturn an earlier equally-good one. `None` if no
/// channel is usable.
pub fn select_ideal_channel(channels: &[Channel]) -> Option<&Channel> {
    let mut best: Option<&Channel> = None;
    for channel in channels {
        if !channel.is_usable() {
            continue;
        }
        best = match best {
            None => Some(channel),
            Some(current) => {
                if channel.survey_interference_factor < current.survey_interference_factor {
                    Some(channel)
                } else {
                    Some(current)
                }
            }
        };
    }
    best
}
