//! [`Engine`] – exclusive owner of the channel registry and the only
//! component allowed to touch the motor driver.
//!
//! Commands pass through [`Engine::submit`].  The engine checks every
//! channel the command needs against the live hold table, applies the
//! engage steps, and answers immediately; the timed release runs on a
//! background tokio timer task instead of blocking the caller for the full
//! hold.  At most one hold exists per channel at any instant.
//!
//! State machine per channel: **Idle → Engaged → (Releasing) → Idle**.
//! A driver fault during release leaves the channel Engaged with its fault
//! flag set; only an all-stop clears it.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use scout_hal::{ChannelRegistry, MotorDriver};
use scout_types::{Channel, ChannelState, CommandKind, Directive, ScoutError, Step};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::command::Command;

/// Runtime record of an engaged command occupying a set of channels.
struct Hold {
    kind: CommandKind,
    channels: BTreeSet<Channel>,
    release: Vec<Step>,
    /// Release timer; `None` for unbounded holds (negative duration).
    timer: Option<JoinHandle<()>>,
}

struct EngineInner {
    registry: ChannelRegistry,
    next_hold: u64,
    holds: HashMap<u64, Hold>,
    owner: HashMap<Channel, u64>,
}

/// Serializes all channel mutations behind one lock and schedules
/// auto-release timers.  Clones share the same underlying state.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Mutex<EngineInner>>,
}

impl Engine {
    /// Take exclusive ownership of `driver`.  All channels start idle and
    /// the engine runs for the life of the process.
    pub fn new(driver: Box<dyn MotorDriver>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(EngineInner {
                registry: ChannelRegistry::new(driver),
                next_hold: 0,
                holds: HashMap::new(),
                owner: HashMap::new(),
            })),
        }
    }

    /// Submit a command for execution.
    ///
    /// Engages synchronously and returns as soon as the hold is
    /// established; the release runs later on a timer task.  An all-stop
    /// command bypasses the busy check entirely.
    ///
    /// # Errors
    ///
    /// - [`ScoutError::ChannelBusy`] – a needed channel is occupied by a
    ///   live hold.  No hardware call was made; the caller may retry.
    /// - [`ScoutError::Driver`] – a needed channel is fault-flagged, or the
    ///   driver refused an engage primitive.  On an engage refusal the
    ///   already-applied steps are backed out best-effort and the refusing
    ///   channel is flagged.
    pub fn submit(&self, command: Command) -> Result<(), ScoutError> {
        if command.kind == CommandKind::AllStop {
            let mut failures = self.all_stop();
            return match failures.is_empty() {
                true => Ok(()),
                false => Err(failures.remove(0)),
            };
        }

        let mut inner = self.lock();
        let channels = command.channels();

        // Validate availability before issuing any primitive so a rejection
        // never leaves partial state.
        for c in &channels {
            if inner.owner.contains_key(c) {
                return Err(ScoutError::ChannelBusy(*c));
            }
            if inner.registry.state(*c).faulted {
                return Err(ScoutError::Driver {
                    channel: *c,
                    details: "channel is fault-flagged; all-stop required".to_string(),
                });
            }
        }

        for step in &command.engage {
            if let Err(err) = inner.registry.apply(*step) {
                error!(kind = %command.kind, channel = %step.channel, %err,
                    "driver refused engage step; backing out");
                inner.registry.flag_fault(step.channel);
                for rs in &command.release {
                    if let Err(back_err) = inner.registry.apply(*rs) {
                        error!(channel = %rs.channel, err = %back_err,
                            "driver refused back-out step; channel flagged");
                        inner.registry.flag_fault(rs.channel);
                    }
                }
                return Err(err);
            }
        }
        debug!(kind = %command.kind, duration = command.duration_secs, "engaged");

        // Zero duration: no measurable hold, release inline.
        if command.duration_secs == 0 {
            let mut first_failure = None;
            for step in &command.release {
                if let Err(err) = inner.registry.apply(*step) {
                    error!(channel = %step.channel, %err,
                        "driver fault during release; channel flagged");
                    inner.registry.flag_fault(step.channel);
                    first_failure.get_or_insert(err);
                }
            }
            return match first_failure {
                None => Ok(()),
                Some(err) => Err(err),
            };
        }

        let id = inner.next_hold;
        inner.next_hold += 1;
        for c in &channels {
            inner.owner.insert(*c, id);
        }

        let timer = if command.duration_secs > 0 {
            let shared = Arc::clone(&self.inner);
            let secs = command.duration_secs as u64;
            Some(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                release_expired(&shared, id);
            }))
        } else {
            None
        };

        inner.holds.insert(
            id,
            Hold {
                kind: command.kind,
                channels,
                release: command.release,
                timer,
            },
        );
        Ok(())
    }

    /// Unconditionally stop and disable every channel, cancelling all
    /// pending release timers and clearing fault flags on channels whose
    /// primitives succeed.
    ///
    /// Best-effort: a driver failure on one channel is recorded and the
    /// remaining channels are still processed.  Returns the per-channel
    /// failures; an empty vec means every channel is idle.
    pub fn all_stop(&self) -> Vec<ScoutError> {
        let mut inner = self.lock();
        for (id, hold) in inner.holds.drain() {
            if let Some(timer) = hold.timer {
                timer.abort();
            }
            debug!(hold = id, kind = %hold.kind, "hold cancelled by all-stop");
        }
        inner.owner.clear();

        let mut failures = Vec::new();
        for c in Channel::ALL {
            let mut clean = true;
            for directive in [Directive::Stop, Directive::EnableOff] {
                if let Err(err) = inner.registry.apply(Step::new(c, directive)) {
                    error!(channel = %c, %err, "all-stop: driver refused primitive");
                    failures.push(err);
                    clean = false;
                }
            }
            if clean {
                inner.registry.clear_fault(c);
            } else {
                inner.registry.flag_fault(c);
            }
        }
        info!(failures = failures.len(), "all-stop complete");
        failures
    }

    /// Current observable state of one channel.
    pub fn state(&self, channel: Channel) -> ChannelState {
        self.lock().registry.state(channel)
    }

    /// Snapshot of every channel's state.
    pub fn snapshot(&self) -> BTreeMap<Channel, ChannelState> {
        self.lock().registry.snapshot()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EngineInner> {
        self.inner.lock().expect("engine mutex poisoned")
    }
}

/// Timer-task half of a hold's lifecycle.  A hold superseded by all-stop is
/// already gone from the table, so a stale timer firing is a no-op and a
/// release can never run twice.
fn release_expired(inner: &Arc<Mutex<EngineInner>>, id: u64) {
    let mut inner = inner.lock().expect("engine mutex poisoned");
    let Some(hold) = inner.holds.remove(&id) else {
        return;
    };
    for c in &hold.channels {
        inner.owner.remove(c);
    }
    debug!(hold = id, kind = %hold.kind, "hold expired, releasing");
    for step in &hold.release {
        if let Err(err) = inner.registry.apply(*step) {
            error!(channel = %step.channel, %err,
                "driver fault during release; channel flagged");
            inner.registry.flag_fault(step.channel);
        }
    }
}
