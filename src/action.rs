//! Plotter primitives and their device mnemonics.

use std::fmt;

use crate::errors::InvalidActionError;
use crate::types::{Point, pt};

/// Which primitive an [`Action`] is, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    PenUp,
    PenDown,
    PaperFeed,
}

impl ActionKind {
    /// Two-letter device command
    pub fn mnemonic(self) -> &'static str {
        match self {
            ActionKind::PenUp => "PU",
            ActionKind::PenDown => "PD",
            ActionKind::PaperFeed => "PG",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::PenUp => "pen up",
            ActionKind::PenDown => "pen down",
            ActionKind::PaperFeed => "paper feed",
        };
        f.write_str(name)
    }
}

/// One plotter primitive.
///
/// A position is in device units. `None` means "transition only": the pen
/// changes state where it already is. Paper feed never has a position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    PenUp(Option<Point>),
    PenDown(Option<Point>),
    PaperFeed,
}

impl Action {
    /// Build an action from its kind, rejecting a positioned paper feed.
    pub fn new(kind: ActionKind, position: Option<Point>) -> Result<Self, InvalidActionError> {
        match (kind, position) {
            (ActionKind::PenUp, position) => Ok(Action::PenUp(position)),
            (ActionKind::PenDown, position) => Ok(Action::PenDown(position)),
            (ActionKind::PaperFeed, None) => Ok(Action::PaperFeed),
            (ActionKind::PaperFeed, Some(_)) => {
                Err(InvalidActionError::PositionNotAllowed { kind })
            }
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::PenUp(_) => ActionKind::PenUp,
            Action::PenDown(_) => ActionKind::PenDown,
            Action::PaperFeed => ActionKind::PaperFeed,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            Action::PenUp(position) | Action::PenDown(position) => *position,
            Action::PaperFeed => None,
        }
    }

    /// Same action translated by `(dx, dy)`. Unpositioned actions come back
    /// unchanged. No rounding happens here.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Action {
        let shift = |position: Option<Point>| position.map(|p| p + pt(dx, dy));
        match self {
            Action::PenUp(position) => Action::PenUp(shift(position)),
            Action::PenDown(position) => Action::PenDown(shift(position)),
            Action::PaperFeed => Action::PaperFeed,
        }
    }

    /// Device text for this action, e.g. `PD12,8;`
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

/// Round a device coordinate to the integer the plotter receives.
///
/// Nearest integer, ties away from zero (`f64::round`). Negative zero
/// collapses to `0`.
pub fn device_units(value: f64) -> i64 {
    value.round() as i64
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().mnemonic())?;
        if let Some(p) = self.position() {
            write!(f, "{},{}", device_units(p.x), device_units(p.y))?;
        }
        f.write_str(";")
    }
}
