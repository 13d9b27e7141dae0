//! [`ChannelRegistry`] – owns the driver handle and the observable state of
//! every channel.
//!
//! The registry is the single seam between command execution and the
//! physical shield.  Each mutation forwards the primitive to the
//! [`MotorDriver`] first and updates the in-memory [`ChannelState`] only
//! when the driver call succeeds, so a failed call never leaves the
//! registry claiming a state the hardware does not have.

use std::collections::BTreeMap;

use scout_types::{Channel, ChannelState, Direction, Directive, EnableState, ScoutError, Step};
use tracing::debug;

use crate::driver::MotorDriver;

/// Tracks per-channel direction/enable/fault state and forwards primitives
/// to the owned [`MotorDriver`].
pub struct ChannelRegistry {
    driver: Box<dyn MotorDriver>,
    states: BTreeMap<Channel, ChannelState>,
}

impl ChannelRegistry {
    /// Take exclusive ownership of `driver`; every channel starts idle.
    pub fn new(driver: Box<dyn MotorDriver>) -> Self {
        let states = Channel::ALL
            .iter()
            .map(|c| (*c, ChannelState::default()))
            .collect();
        Self { driver, states }
    }

    /// Set the channel's direction line.
    ///
    /// [`Direction::Idle`] maps to the driver's `stop` primitive.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Driver`] when the driver refuses the call; the
    /// recorded state is left unchanged in that case.
    pub fn set_direction(&mut self, channel: Channel, dir: Direction) -> Result<(), ScoutError> {
        match dir {
            Direction::Forward => self.driver.set_forward(channel)?,
            Direction::Reverse => self.driver.set_reverse(channel)?,
            Direction::Idle => self.driver.stop(channel)?,
        }
        debug!(channel = %channel, direction = ?dir, "direction set");
        self.state_mut(channel).direction = dir;
        Ok(())
    }

    /// Set the channel's enable line.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Driver`] when the driver refuses the call; the
    /// recorded state is left unchanged in that case.
    pub fn set_enable(&mut self, channel: Channel, on: bool) -> Result<(), ScoutError> {
        if on {
            self.driver.enable(channel)?;
        } else {
            self.driver.disable(channel)?;
        }
        debug!(channel = %channel, enable = on, "enable line set");
        self.state_mut(channel).enable = if on { EnableState::On } else { EnableState::Off };
        Ok(())
    }

    /// Apply one command [`Step`] to the hardware.
    pub fn apply(&mut self, step: Step) -> Result<(), ScoutError> {
        match step.directive {
            Directive::EnableOn => self.set_enable(step.channel, true),
            Directive::EnableOff => self.set_enable(step.channel, false),
            Directive::SetForward => self.set_direction(step.channel, Direction::Forward),
            Directive::SetReverse => self.set_direction(step.channel, Direction::Reverse),
            Directive::Stop => self.set_direction(step.channel, Direction::Idle),
        }
    }

    /// Current observable state of `channel`.
    pub fn state(&self, channel: Channel) -> ChannelState {
        self.states[&channel]
    }

    /// Snapshot of every channel's state, keyed in stable channel order.
    pub fn snapshot(&self) -> BTreeMap<Channel, ChannelState> {
        self.states.clone()
    }

    /// Mark the channel as faulted; it stays faulted until
    /// [`ChannelRegistry::clear_fault`].
    pub fn flag_fault(&mut self, channel: Channel) {
        self.state_mut(channel).faulted = true;
    }

    /// Clear the channel's fault flag.
    pub fn clear_fault(&mut self, channel: Channel) {
        self.state_mut(channel).faulted = false;
    }

    fn state_mut(&mut self, channel: Channel) -> &mut ChannelState {
        self.states
            .get_mut(&channel)
            .expect("registry seeds every channel at construction")
    }
}
