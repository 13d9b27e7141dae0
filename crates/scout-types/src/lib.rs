use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A logically named actuator output on the rig: a motor (or motor pair)
/// with an independent direction line and enable line.
///
/// The set is fixed by the motor shield harness; there is no runtime
/// registration of channels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    /// Left drive motor.
    DriveLeft,
    /// Right drive motor.
    DriveRight,
    /// Camera tilt motor.
    CameraTilt,
    /// Spare shield output, only touched by all-stop.
    Aux,
}

impl Channel {
    /// Every channel the shield exposes, in a stable order.
    pub const ALL: [Channel; 4] = [
        Channel::DriveLeft,
        Channel::DriveRight,
        Channel::CameraTilt,
        Channel::Aux,
    ];

    /// Stable string form, matching the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::DriveLeft => "drive-left",
            Channel::DriveRight => "drive-right",
            Channel::CameraTilt => "camera-tilt",
            Channel::Aux => "aux",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction state of a channel's motor output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Idle,
    Forward,
    Reverse,
}

/// State of a channel's enable line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnableState {
    #[default]
    Off,
    On,
}

/// Observable state of one channel.
///
/// `faulted` is set when the driver refused a release primitive; the channel
/// then rejects new commands until an all-stop clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelState {
    pub direction: Direction,
    pub enable: EnableState,
    pub faulted: bool,
}

impl ChannelState {
    /// True when neither the direction nor the enable line is driven.
    pub fn is_idle(&self) -> bool {
        self.direction == Direction::Idle && self.enable == EnableState::Off
    }
}

/// A single primitive operation against one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    EnableOn,
    EnableOff,
    SetForward,
    SetReverse,
    Stop,
}

/// One `(channel, directive)` step of a command's engage or release list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub channel: Channel,
    pub directive: Directive,
}

impl Step {
    pub fn new(channel: Channel, directive: Directive) -> Self {
        Self { channel, directive }
    }
}

/// The closed set of composite actions a caller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandKind {
    Forward,
    Reverse,
    TurnLeft,
    TurnRight,
    CameraUp,
    CameraDown,
    AllStop,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Forward => "forward",
            CommandKind::Reverse => "reverse",
            CommandKind::TurnLeft => "turn-left",
            CommandKind::TurnRight => "turn-right",
            CommandKind::CameraUp => "camera-up",
            CommandKind::CameraDown => "camera-down",
            CommandKind::AllStop => "all-stop",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body accepted by every command endpoint.
///
/// `duration` is a signed whole number of seconds. Negative means "engage
/// and do not auto-release"; zero means "engage, then release immediately".
/// No upper bound is enforced here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionRequest {
    pub duration: i64,
}

/// JSON error envelope returned to callers on any failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub action: String,
    pub context: String,
    pub message: String,
}

/// Global error type spanning the auth gate, request decoding, channel
/// arbitration, and the hardware driver.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ScoutError {
    #[error("authentication rejected")]
    AuthRejected,

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("channel {0} is busy")]
    ChannelBusy(Channel),

    #[error("driver fault on {channel}: {details}")]
    Driver { channel: Channel, details: String },

    #[error("asset unavailable: {0}")]
    AssetUnavailable(String),
}
