//! `scout-engine` – command execution for the rig's actuator channels.
//!
//! # Modules
//!
//! - [`command`] – [`Command`][command::Command]: the fixed mapping from the
//!   seven symbolic actions to ordered engage/release step lists plus the
//!   caller-supplied hold duration.
//! - [`engine`] – [`Engine`][engine::Engine]: exclusive owner of the
//!   [`ChannelRegistry`][scout_hal::ChannelRegistry].  Serializes access to
//!   the channels, rejects conflicting commands, holds for the requested
//!   duration on a background timer task, and reverts the channels to idle
//!   when the hold expires or an all-stop arrives.

pub mod command;
pub mod engine;

pub use command::Command;
pub use engine::Engine;
