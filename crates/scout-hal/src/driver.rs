//! Generic `MotorDriver` trait for the shield's per-channel primitives.
//!
//! Drivers implement this trait and are handed to a
//! [`ChannelRegistry`][crate::registry::ChannelRegistry], which is the only
//! component that ever calls them.  Calls are synchronous and must not be
//! re-entered for the same channel.

use scout_types::{Channel, ScoutError};

/// A motor shield driver: one direction line and one enable line per
/// [`Channel`].
///
/// Every method may fail with [`ScoutError::Driver`]; on failure the caller
/// must assume the physical output did not change.
pub trait MotorDriver: Send + Sync {
    /// Energise the channel's enable line.
    fn enable(&mut self, channel: Channel) -> Result<(), ScoutError>;

    /// De-energise the channel's enable line.
    fn disable(&mut self, channel: Channel) -> Result<(), ScoutError>;

    /// Drive the channel's motor forward.
    fn set_forward(&mut self, channel: Channel) -> Result<(), ScoutError>;

    /// Drive the channel's motor in reverse.
    fn set_reverse(&mut self, channel: Channel) -> Result<(), ScoutError>;

    /// Cut the channel's motor output (direction returns to idle).
    fn stop(&mut self, channel: Channel) -> Result<(), ScoutError>;
}
