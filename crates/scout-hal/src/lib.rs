//! `scout-hal` – hardware access layer for the rig's motor shield.
//!
//! # Modules
//!
//! - [`driver`] – [`MotorDriver`][driver::MotorDriver]: the trait every
//!   shield driver implements.  Exposes the five per-channel primitives
//!   (enable, disable, set-forward, set-reverse, stop) and nothing else.
//! - [`registry`] – [`ChannelRegistry`][registry::ChannelRegistry]: owns the
//!   driver handle, tracks the observable state of every
//!   [`Channel`][scout_types::Channel], and forwards primitives to the
//!   driver.  State is updated only after the driver call succeeds.
//! - [`sim`] – [`SimMotorDriver`][sim::SimMotorDriver]: an always-succeeding
//!   stub driver that records every primitive it receives, so the full stack
//!   runs in headless tests and CI without a physical shield.

pub mod driver;
pub mod registry;
pub mod sim;

pub use driver::MotorDriver;
pub use registry::ChannelRegistry;
pub use sim::{SimLog, SimMotorDriver, SimOp};
