//! In-memory host used to replay event scripts.
//!
//! A [`Stage`] holds sprites (position plus custom state) and one
//! [`PenController`] per sprite, and turns script commands into the host
//! events the controllers expect.

use std::collections::HashMap;

use crate::buffer::CommandBuffer;
use crate::config::PlotterConfig;
use crate::controller::{PenController, PenState, Target};
use crate::errors::DomainError;
use crate::log::debug;
use crate::script::{Command, Script};
use crate::transport::Transport;
use crate::types::{Point, pt};

/// A drawable target with its own position and custom state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    position: Point,
    custom_state: HashMap<String, PenState>,
}

impl Sprite {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            custom_state: HashMap::new(),
        }
    }

    /// Move to `to`, returning where the sprite was.
    pub fn move_to(&mut self, to: Point) -> Point {
        std::mem::replace(&mut self.position, to)
    }
}

impl Target for Sprite {
    fn position(&self) -> Point {
        self.position
    }

    fn custom_state(&self, key: &str) -> Option<&PenState> {
        self.custom_state.get(key)
    }

    fn set_custom_state(&mut self, key: &str, state: PenState) {
        self.custom_state.insert(key.to_owned(), state);
    }
}

#[derive(Debug)]
struct Actor {
    sprite: Sprite,
    pen: PenController,
}

/// Sprites plus their controllers. Commands act on the active sprite, which
/// is the most recently created one.
#[derive(Debug)]
pub struct Stage<'t, X: Transport + ?Sized> {
    config: PlotterConfig,
    actors: Vec<Actor>,
    transport: &'t X,
}

impl<'t, X: Transport + ?Sized> Stage<'t, X> {
    /// Stage with a single sprite at the origin.
    pub fn new(config: PlotterConfig, transport: &'t X) -> Result<Self, DomainError> {
        let pen = PenController::new(&config)?;
        Ok(Self {
            config,
            actors: vec![Actor {
                sprite: Sprite::new(pt(0.0, 0.0)),
                pen,
            }],
            transport,
        })
    }

    pub fn run(&mut self, script: &Script) -> Result<(), DomainError> {
        for command in &script.commands {
            self.apply(command)?;
        }
        Ok(())
    }

    /// Deliver one command. Only `clone` can fail, when no controller can be
    /// built for the new sprite.
    pub fn apply(&mut self, command: &Command) -> Result<(), DomainError> {
        match command {
            Command::PenDown => {
                let actor = self.active_mut();
                actor.pen.pen_down(&mut actor.sprite);
            }
            Command::PenUp => {
                let actor = self.active_mut();
                actor.pen.pen_up(&mut actor.sprite);
            }
            Command::Goto(to) => self.move_active(*to, false),
            Command::Jump(to) => self.move_active(*to, true),
            Command::Feed => self.active_mut().pen.paper_feed(),
            Command::Clear => self.active_mut().pen.clear(),
            Command::Clone => self.clone_active()?,
            Command::Dispose => {
                for actor in &mut self.actors {
                    actor.pen.on_runtime_disposed();
                }
            }
            Command::Post(Some(url)) => {
                self.active().pen.post(url, self.transport);
            }
            Command::Post(None) => {
                self.active().pen.post_to_endpoint(self.transport);
            }
        }
        Ok(())
    }

    fn active(&self) -> &Actor {
        // The stage is created with one actor and never removes any
        &self.actors[self.actors.len() - 1]
    }

    fn active_mut(&mut self) -> &mut Actor {
        let last = self.actors.len() - 1;
        &mut self.actors[last]
    }

    fn move_active(&mut self, to: Point, forced: bool) {
        let actor = self.active_mut();
        let old = actor.sprite.move_to(to);
        actor.pen.on_move(&actor.sprite, old, forced);
    }

    fn clone_active(&mut self) -> Result<(), DomainError> {
        let parent = &self.active().sprite;
        let mut sprite = Sprite::new(parent.position());
        let observing = PenController::on_target_created(&mut sprite, Some(parent));
        debug!(observing, sprites = self.actors.len() + 1, "clone");
        let pen = PenController::new(&self.config)?;
        self.actors.push(Actor { sprite, pen });
        Ok(())
    }

    /// Buffer of the active sprite
    pub fn buffer(&self) -> &CommandBuffer {
        self.active().pen.buffer()
    }

    pub fn sprite(&self) -> &Sprite {
        &self.active().sprite
    }

    pub fn sprite_count(&self) -> usize {
        self.actors.len()
    }
}
