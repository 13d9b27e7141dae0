//! [`Command`] – expansion of a symbolic action into primitive steps.
//!
//! The tables here are a pure description: nothing in this module touches
//! hardware.  Each of the seven [`CommandKind`]s expands to an ordered
//! engage list (enable + direction primitives) and a matching release list
//! (stop + disable primitives), plus the caller's hold duration taken
//! verbatim.  Duration limiting is deliberately not done at this layer.

use std::collections::BTreeSet;

use scout_types::{Channel, CommandKind, Directive, Step};

use Channel::{CameraTilt, DriveLeft, DriveRight};
use Directive::{EnableOff, EnableOn, SetForward, SetReverse, Stop};

/// A fully expanded command: symbolic kind, engage steps, release steps,
/// and the signed hold duration in whole seconds.
///
/// `duration_secs < 0` means "engage and do not auto-release";
/// `duration_secs == 0` means "engage, then release immediately".
#[derive(Debug, Clone)]
pub struct Command {
    pub kind: CommandKind,
    pub engage: Vec<Step>,
    pub release: Vec<Step>,
    pub duration_secs: i64,
}

impl Command {
    /// Expand `kind` into its step lists with the given hold duration.
    ///
    /// The enable-line slots follow the shield harness as wired on the rig:
    /// `forward` arms the drive-right enable, `reverse` arms the camera
    /// channel's enable, and both turns arm the drive-left enable.  Confirm
    /// against the physical wiring before changing these tables.
    pub fn new(kind: CommandKind, duration_secs: i64) -> Self {
        let (engage, release) = match kind {
            CommandKind::Forward => (
                vec![
                    Step::new(DriveRight, EnableOn),
                    Step::new(DriveLeft, SetForward),
                    Step::new(DriveRight, SetForward),
                ],
                vec![
                    Step::new(DriveLeft, Stop),
                    Step::new(DriveRight, Stop),
                    Step::new(DriveRight, EnableOff),
                ],
            ),
            CommandKind::Reverse => (
                vec![
                    Step::new(CameraTilt, EnableOn),
                    Step::new(DriveLeft, SetReverse),
                    Step::new(DriveRight, SetReverse),
                ],
                vec![
                    Step::new(DriveLeft, Stop),
                    Step::new(DriveRight, Stop),
                    Step::new(CameraTilt, EnableOff),
                ],
            ),
            CommandKind::TurnLeft => (
                vec![
                    Step::new(DriveLeft, EnableOn),
                    Step::new(DriveLeft, SetReverse),
                    Step::new(DriveRight, SetForward),
                ],
                vec![
                    Step::new(DriveLeft, Stop),
                    Step::new(DriveRight, Stop),
                    Step::new(DriveLeft, EnableOff),
                ],
            ),
            CommandKind::TurnRight => (
                vec![
                    Step::new(DriveLeft, EnableOn),
                    Step::new(DriveLeft, SetForward),
                    Step::new(DriveRight, SetReverse),
                ],
                vec![
                    Step::new(DriveLeft, Stop),
                    Step::new(DriveRight, Stop),
                    Step::new(DriveLeft, EnableOff),
                ],
            ),
            CommandKind::CameraUp => (
                vec![Step::new(CameraTilt, SetForward)],
                vec![Step::new(CameraTilt, Stop)],
            ),
            CommandKind::CameraDown => (
                vec![Step::new(CameraTilt, SetReverse)],
                vec![Step::new(CameraTilt, Stop)],
            ),
            // All-stop has no engage phase; its release covers every
            // channel unconditionally.
            CommandKind::AllStop => (
                vec![],
                Channel::ALL
                    .iter()
                    .flat_map(|c| [Step::new(*c, Stop), Step::new(*c, EnableOff)])
                    .collect(),
            ),
        };
        Self {
            kind,
            engage,
            release,
            duration_secs,
        }
    }

    /// The set of channels this command touches in either phase.  A hold
    /// occupies exactly these channels.
    pub fn channels(&self) -> BTreeSet<Channel> {
        self.engage
            .iter()
            .chain(self.release.iter())
            .map(|s| s.channel)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_arms_drive_right_enable() {
        let cmd = Command::new(CommandKind::Forward, 2);
        assert_eq!(cmd.engage[0], Step::new(DriveRight, EnableOn));
        assert_eq!(cmd.release.last(), Some(&Step::new(DriveRight, EnableOff)));
        assert_eq!(
            cmd.channels(),
            BTreeSet::from([DriveLeft, DriveRight])
        );
    }

    #[test]
    fn reverse_arms_camera_channel_enable() {
        // The reverse enable slot sits on the camera channel in the rig's
        // harness, so reverse also occupies camera-tilt.
        let cmd = Command::new(CommandKind::Reverse, 2);
        assert_eq!(cmd.engage[0], Step::new(CameraTilt, EnableOn));
        assert!(cmd.channels().contains(&CameraTilt));
    }

    #[test]
    fn turns_drive_wheels_in_opposition() {
        let left = Command::new(CommandKind::TurnLeft, 1);
        assert!(left.engage.contains(&Step::new(DriveLeft, SetReverse)));
        assert!(left.engage.contains(&Step::new(DriveRight, SetForward)));

        let right = Command::new(CommandKind::TurnRight, 1);
        assert!(right.engage.contains(&Step::new(DriveLeft, SetForward)));
        assert!(right.engage.contains(&Step::new(DriveRight, SetReverse)));
    }

    #[test]
    fn camera_commands_touch_only_the_camera_channel() {
        for kind in [CommandKind::CameraUp, CommandKind::CameraDown] {
            let cmd = Command::new(kind, 0);
            assert_eq!(cmd.channels(), BTreeSet::from([CameraTilt]));
        }
    }

    #[test]
    fn all_stop_releases_every_channel() {
        let cmd = Command::new(CommandKind::AllStop, 0);
        assert!(cmd.engage.is_empty());
        assert_eq!(cmd.channels(), BTreeSet::from(Channel::ALL));
        assert_eq!(cmd.release.len(), Channel::ALL.len() * 2);
        assert!(cmd.release.iter().any(|s| *s == Step::new(Channel::Aux, Stop)));
    }

    #[test]
    fn duration_is_taken_verbatim() {
        assert_eq!(Command::new(CommandKind::Forward, -1).duration_secs, -1);
        assert_eq!(Command::new(CommandKind::Forward, 0).duration_secs, 0);
        assert_eq!(
            Command::new(CommandKind::Forward, 86_400).duration_secs,
            86_400
        );
    }
}
