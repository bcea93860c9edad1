//! Command buffer: recorded actions and their device serialization.
//!
//! Storage is append-only and keeps event order. Serialization normalizes the
//! horizontal axis so the leftmost recorded travel sits at x = 0; the offset is
//! recomputed from the full contents on every call and never written back.

use std::fmt;

use crate::action::Action;
use crate::config::DeviceSettings;
use crate::types::Rect;

/// Ordered actions for one plotting session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandBuffer {
    actions: Vec<Action>,
    device: DeviceSettings,
}

impl CommandBuffer {
    /// Buffer with the default `VS50;!ST1,0;` preamble
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(device: DeviceSettings) -> Self {
        Self {
            actions: Vec::new(),
            device,
        }
    }

    pub fn append(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Drop everything recorded so far
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn device(&self) -> DeviceSettings {
        self.device
    }

    /// Smallest x over positioned actions, 0 when none carries a position
    pub fn xmin(&self) -> f64 {
        self.actions
            .iter()
            .filter_map(Action::position)
            .map(|p| p.x)
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    /// Extent of all recorded travel, before normalization
    pub fn bounds(&self) -> Option<Rect> {
        Rect::enclosing(self.actions.iter().filter_map(Action::position))
    }

    /// Write the full command string: preamble, normalized actions, `PG;`.
    /// Writes nothing for an empty buffer.
    pub fn write_to(&self, out: &mut impl fmt::Write) -> fmt::Result {
        if self.actions.is_empty() {
            return Ok(());
        }
        let xmin = self.xmin();
        self.device.write_preamble(out)?;
        for action in &self.actions {
            write!(out, "{}", action.offset(-xmin, 0.0))?;
        }
        write!(out, "{}", Action::PaperFeed)
    }

    /// Device command string; empty means "nothing to send".
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut out);
        out
    }
}

impl<'a> IntoIterator for &'a CommandBuffer {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
