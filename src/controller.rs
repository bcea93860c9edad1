//! Pen session controller.
//!
//! A small state machine per target. The pen state itself lives in the
//! host's per-target storage (the [`Target`] trait); the controller reads and
//! writes it on every event and never keeps a copy.
//!
//! | Event        | Pen  | Effect                                          |
//! |--------------|------|-------------------------------------------------|
//! | `pen_down`   | up   | down; `PU<travel>;PD;`                          |
//! | `pen_down`   | down | none                                            |
//! | `pen_up`     | down | up; `PU;`                                       |
//! | `pen_up`     | up   | none                                            |
//! | `on_move`    | down | `PD<point>;` unless the move was forced         |
//! | `on_move`    | up   | none                                            |
//! | `paper_feed` | any  | `PG;`                                           |
//! | `clear`      | any  | empty buffer and pen layer, pen state unchanged |

use std::fmt;

use crate::action::Action;
use crate::buffer::CommandBuffer;
use crate::config::PlotterConfig;
use crate::errors::DomainError;
use crate::log::{debug, warn};
use crate::mapper::CoordinateMapper;
use crate::transport::Transport;
use crate::types::Point;

/// Key the pen state is stored under in each target's custom state.
pub const STATE_KEY: &str = "plotter.pen";

/// Rendering attributes owned by the host's pen layer.
#[derive(Clone, Debug, PartialEq)]
pub struct PenAttributes {
    pub color4f: [f32; 4],
    pub diameter: f64,
}

impl Default for PenAttributes {
    fn default() -> Self {
        Self {
            color4f: [0.0, 0.0, 1.0, 1.0],
            diameter: 1.0,
        }
    }
}

/// Per-target pen state.
///
/// Only `pen_down` drives the controller. The color fields are carried so
/// clones inherit them, but nothing here reads them.
#[derive(Clone, Debug, PartialEq)]
pub struct PenState {
    pub pen_down: bool,
    pub color: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub transparency: f64,
    /// Used only by legacy shade commands
    pub shade: f64,
    pub attributes: PenAttributes,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            pen_down: false,
            color: 66.66,
            saturation: 100.0,
            brightness: 100.0,
            transparency: 0.0,
            shade: 50.0,
            attributes: PenAttributes::default(),
        }
    }
}

/// The host's view of one drawable target.
pub trait Target {
    /// Current position in source (screen) coordinates
    fn position(&self) -> Point;

    fn custom_state(&self, key: &str) -> Option<&PenState>;

    fn set_custom_state(&mut self, key: &str, state: PenState);
}

/// The host's on-screen pen layer, cleared together with the buffer.
pub trait PenLayer: fmt::Debug {
    fn clear(&mut self);
}

/// Controller states, derived from the stored [`PenState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PenPhase {
    Up,
    Down,
}

/// Read-modify-write the target's pen state, creating the default on first access.
fn update_pen_state<T, R>(target: &mut T, f: impl FnOnce(&mut PenState) -> R) -> R
where
    T: Target + ?Sized,
{
    let mut state = target.custom_state(STATE_KEY).cloned().unwrap_or_default();
    let out = f(&mut state);
    target.set_custom_state(STATE_KEY, state);
    out
}

/// Turns one target's pen events into recorded plotter actions.
#[derive(Debug)]
pub struct PenController {
    mapper: CoordinateMapper,
    buffer: CommandBuffer,
    layer: Option<Box<dyn PenLayer>>,
    endpoint: Option<String>,
}

impl PenController {
    /// Controller for one target; fails when the configured source area is degenerate.
    pub fn new(config: &PlotterConfig) -> Result<Self, DomainError> {
        Ok(Self {
            mapper: config.mapper()?,
            buffer: CommandBuffer::with_device(config.device()),
            layer: None,
            endpoint: config.endpoint().map(str::to_owned),
        })
    }

    /// Attach the host's pen layer so `clear` wipes it too.
    pub fn with_layer(mut self, layer: impl PenLayer + 'static) -> Self {
        self.layer = Some(Box::new(layer));
        self
    }

    pub fn buffer(&self) -> &CommandBuffer {
        &self.buffer
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Current phase of `target`. A target with no stored state is up.
    pub fn phase<T: Target + ?Sized>(target: &T) -> PenPhase {
        match target.custom_state(STATE_KEY) {
            Some(state) if state.pen_down => PenPhase::Down,
            _ => PenPhase::Up,
        }
    }

    /// Lower the pen: travel to the target's position with the pen up, then
    /// put it down.
    ///
    /// A position that cannot be mapped drops the whole event, so the pen
    /// stays up and later moves are not recorded as strokes from nowhere.
    pub fn pen_down<T: Target + ?Sized>(&mut self, target: &mut T) {
        if Self::phase(target) == PenPhase::Down {
            debug!("pen already down");
            return;
        }

        let travel = match self.mapper.map(target.position()) {
            Ok(travel) => travel,
            Err(err) => {
                warn!(%err, "dropping pen down");
                return;
            }
        };
        update_pen_state(target, |state| state.pen_down = true);
        debug!(x = travel.x, y = travel.y, "pen down");
        self.buffer.append(Action::PenUp(Some(travel)));
        self.buffer.append(Action::PenDown(None));
    }

    /// Lift the pen where it is.
    pub fn pen_up<T: Target + ?Sized>(&mut self, target: &mut T) {
        let was_down = update_pen_state(target, |state| std::mem::replace(&mut state.pen_down, false));
        if !was_down {
            debug!("pen already up");
            return;
        }
        debug!("pen up");
        self.buffer.append(Action::PenUp(None));
    }

    /// The target moved from `old` to its current position.
    ///
    /// Only observed while the pen is down. Forced moves (teleports, programmatic
    /// relocation) are not strokes and are skipped.
    pub fn on_move<T: Target + ?Sized>(&mut self, target: &T, old: Point, forced: bool) {
        if Self::phase(target) == PenPhase::Up {
            return;
        }
        let new = target.position();
        if forced {
            debug!(?old, ?new, "ignoring forced move");
            return;
        }
        match self.mapper.map(new) {
            Ok(p) => {
                if !self.mapper.source().contains(new) {
                    debug!(?new, "stroke leaves the drawable area");
                }
                debug!(?old, ?new, x = p.x, y = p.y, "stroke");
                self.buffer.append(Action::PenDown(Some(p)));
            }
            Err(err) => {
                warn!(%err, "dropping move");
            }
        }
    }

    pub fn paper_feed(&mut self) {
        self.buffer.append(Action::PaperFeed);
    }

    /// Discard everything recorded and wipe the pen layer. The pen stays as it is.
    pub fn clear(&mut self) {
        debug!(discarded = self.buffer.len(), "clear");
        self.buffer.clear();
        if let Some(layer) = self.layer.as_mut() {
            layer.clear();
        }
    }

    pub fn on_runtime_disposed(&mut self) {
        self.clear();
    }

    /// Copy the parent's pen state into a freshly created target.
    ///
    /// Returns true when the new target inherits a lowered pen, i.e. its moves
    /// are observed from now on. Targets without a parent, or whose parent never
    /// touched the pen, get nothing.
    pub fn on_target_created<N, S>(new_target: &mut N, source: Option<&S>) -> bool
    where
        N: Target + ?Sized,
        S: Target + ?Sized,
    {
        let Some(state) = source.and_then(|s| s.custom_state(STATE_KEY)).cloned() else {
            return false;
        };
        let observing = state.pen_down;
        new_target.set_custom_state(STATE_KEY, state);
        observing
    }

    /// Send the serialized buffer to `url`.
    ///
    /// Issues exactly one request when there is something to send and none
    /// otherwise. Fire-and-forget: the outcome is never observed here.
    pub fn post<X: Transport + ?Sized>(&self, url: &str, transport: &X) -> bool {
        let body = self.buffer.serialize();
        if body.is_empty() {
            debug!(url, "nothing to post");
            return false;
        }
        debug!(url, bytes = body.len(), bounds = ?self.buffer.bounds(), "post");
        transport.send(url, body);
        true
    }

    /// Post to the configured endpoint, if there is one.
    pub fn post_to_endpoint<X: Transport + ?Sized>(&self, transport: &X) -> bool {
        match self.endpoint.as_deref() {
            Some(url) => self.post(url, transport),
            None => {
                warn!("no endpoint configured; not posting");
                false
            }
        }
    }
}
