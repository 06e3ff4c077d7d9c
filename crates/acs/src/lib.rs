//! Automatic Channel Selection (ACS) decision engine.
//!
//! Walks a channel list across one or more survey passes using an
//! off-channel remain-on-channel primitive exposed by a radio driver,
//! scores each channel's interference from the resulting measurements, and
//! selects the channel with the lowest score.

pub mod controller;
pub mod driver;
pub mod roc_iter;
pub mod selector;


pub use acs_types::scoring;
pub use controller::{AcsController, ControllerState, DecisionTraceEntry};
pub use driver::{BringUpCallback, RadioDriver, ScanParams};
pub use roc_iter::{IterStatus, RocIterator};
pub use selector::select_ideal_channel;
