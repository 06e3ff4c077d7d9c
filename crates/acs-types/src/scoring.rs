//! Pure per-measurement scoring.

use crate::survey::SurveyMeasurement;

/// Interference factor for one measurement against a reference noise floor.
///
/// ```text
/// factor = log2( (busy - tx) / (time - tx) * 2^(nf - nf_ref) )
/// ```
///
/// Monotone increasing in `channel_time_busy` and in `nf` (holding the
/// other inputs fixed): the log argument is strictly increasing in both,
/// which is the only property that needs to hold stable across
/// implementations of this formula.
pub fn interference_factor(survey: &SurveyMeasurement, nf_ref: i8) -> f64 {
    let busy_active = (survey.channel_time_busy - survey.channel_time_tx) as f64;
    let observed = (survey.channel_time - survey.channel_time_tx) as f64;
    let busy_fraction = busy_active / observed;
    let nf_term = 2f64.powi((survey.nf as i32) - (nf_ref as i32));
    (busy_fraction * nf_term).log2()
}
