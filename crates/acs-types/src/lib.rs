//! Shared data types for the Automatic Channel Selection engine.
//!
//! This crate holds the survey/channel/interface data model and the pure
//! scoring math that operates over it. The stateful iterator and controller
//! live in the `acs` crate, which depends on this one.

pub mod channel;
pub mod config;
pub mod error;
pub mod interface;
pub mod scoring;
pub mod survey;

pub use channel::{Channel, ChannelFlags};
pub use config::AcsConfig;
pub use error::{AcsError, AcsOutcome, BringUpResult};
pub use interface::{DriverCapabilities, InterfaceState};
pub use survey::SurveyMeasurement;
