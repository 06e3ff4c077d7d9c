//! ACS-relevant slice of `iface.conf`.

use serde::{Deserialize, Serialize};

/// Configuration knobs ACS reads from the interface's configuration object.
/// `conf.channel` itself (write-only output) is not modeled here. It lives
/// on [`crate::interface::InterfaceState`] as `selected_channel`, since it is
/// an engine output rather than operator input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcsConfig {
    /// Required number of full survey passes. Must be >= 1.
    pub acs_num_req_surveys: u32,
    /// Dwell time per channel, in milliseconds.
    pub acs_roc_duration_ms: u32,
}

impl Default for AcsConfig {
    fn default() -> Self {
        Self {
            acs_num_req_surveys: 1,
            acs_roc_duration_ms: 200,
        }
    }
}

impl AcsConfig {
    /// `acs_num_req_surveys` of zero is meaningless; treat it as 1 pass
    /// rather than let the controller loop on divide-by-zero averaging or a
    /// single always-satisfied pass-complete check.
    pub fn normalized_passes(&self) -> u32 {
        self.acs_num_req_surveys.max(1)
    }
}
