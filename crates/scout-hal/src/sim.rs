//! In-process simulation driver for CI and headless testing.
//!
//! [`SimMotorDriver`] implements [`MotorDriver`] without any physical
//! shield: every primitive succeeds and is appended to a shared
//! [`SimLog`], so tests can assert on the exact sequence of hardware calls
//! the rest of the stack produced.
//!
//! # Example
//!
//! ```rust
//! use scout_hal::{ChannelRegistry, SimMotorDriver, SimOp};
//! use scout_types::{Channel, Direction};
//!
//! let driver = SimMotorDriver::new();
//! let log = driver.log();
//! let mut registry = ChannelRegistry::new(Box::new(driver));
//!
//! registry
//!     .set_direction(Channel::DriveLeft, Direction::Forward)
//!     .expect("sim primitives always succeed");
//!
//! assert_eq!(log.ops(), vec![(Channel::DriveLeft, SimOp::Forward)]);
//! ```

use std::sync::{Arc, Mutex};

use scout_types::{Channel, ScoutError};

use crate::driver::MotorDriver;

/// One recorded shield primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimOp {
    Enable,
    Disable,
    Forward,
    Reverse,
    Stop,
}

/// Shared, cloneable view of every primitive a [`SimMotorDriver`] has
/// received, in call order.
#[derive(Debug, Clone, Default)]
pub struct SimLog {
    ops: Arc<Mutex<Vec<(Channel, SimOp)>>>,
}

impl SimLog {
    /// Copy of the recorded primitives, oldest first.
    pub fn ops(&self) -> Vec<(Channel, SimOp)> {
        self.ops.lock().expect("sim log mutex poisoned").clone()
    }

    /// Number of primitives recorded so far.
    pub fn len(&self) -> usize {
        self.ops.lock().expect("sim log mutex poisoned").len()
    }

    /// True when no primitive has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, channel: Channel, op: SimOp) {
        self.ops
            .lock()
            .expect("sim log mutex poisoned")
            .push((channel, op));
    }
}

/// A simulated motor shield driver.  Always succeeds.
#[derive(Debug, Default)]
pub struct SimMotorDriver {
    log: SimLog,
}

impl SimMotorDriver {
    /// Create a fresh simulated driver with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone a handle to the driver's call log.  Grab this before boxing
    /// the driver into a registry.
    pub fn log(&self) -> SimLog {
        self.log.clone()
    }
}

impl MotorDriver for SimMotorDriver {
    fn enable(&mut self, channel: Channel) -> Result<(), ScoutError> {
        self.log.record(channel, SimOp::Enable);
        Ok(())
    }

    fn disable(&mut self, channel: Channel) -> Result<(), ScoutError> {
        self.log.record(channel, SimOp::Disable);
        Ok(())
    }

    fn set_forward(&mut self, channel: Channel) -> Result<(), ScoutError> {
        self.log.record(channel, SimOp::Forward);
        Ok(())
    }

    fn set_reverse(&mut self, channel: Channel) -> Result<(), ScoutError> {
        self.log.record(channel, SimOp::Reverse);
        Ok(())
    }

    fn stop(&mut self, channel: Channel) -> Result<(), ScoutError> {
        self.log.record(channel, SimOp::Stop);
        Ok(())
    }
}
