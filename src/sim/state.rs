//! Game state and core simulation types
//!
//! `World` holds the live entities of one session; `GameState` holds the
//! lives / launched / phase bookkeeping that drives transitions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{ClassificationTable, ColliderId, Layer, SurfaceKind};
use super::geometry::{Aabb, direction};
use super::tick::TickInput;
use crate::consts::INITIAL_LIVES;
use crate::platform::EntityHandle;
use crate::settings::{BorderSettings, Settings};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every brick destroyed
    Won,
    /// Lives exhausted
    Lost,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No entities spawned (scene inactive or disposed)
    Uninitialized,
    /// Active gameplay (ball may still be waiting for launch)
    Running,
    /// Frozen until a reload
    Ended(Outcome),
}

/// Border behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderKind {
    /// Ball bounces off
    Solid,
    /// Ball is lost
    Respawn,
}

/// Stable brick identity within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrickId(pub u32);

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub handle: EntityHandle,
    pub pos: Vec2,
    /// Scaled collider radius, also the swept box half extent
    pub radius: f32,
    /// Always unit length
    pub direction: Vec2,
    pub speed: f32,
}

impl Ball {
    pub fn new(handle: EntityHandle, settings: &Settings) -> Self {
        Self {
            handle,
            pos: settings.ball_start,
            radius: settings.ball_half_extent(),
            direction: direction(1.0, 1.0),
            speed: settings.ball_speed_scale,
        }
    }

    /// Distance travelled this tick
    pub fn move_vector(&self, dt: f32) -> Vec2 {
        self.direction * self.speed * dt
    }

    /// Advance along the current direction, returning the move applied
    pub fn integrate(&mut self, dt: f32) -> Vec2 {
        let step = self.move_vector(dt);
        self.pos += step;
        step
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::splat(self.radius)
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub handle: EntityHandle,
    pub pos: Vec2,
    pub half_extents: Vec2,
    pub min_x: f32,
    pub max_x: f32,
    pub speed: f32,
}

impl Paddle {
    pub fn new(handle: EntityHandle, settings: &Settings) -> Self {
        Self {
            handle,
            pos: settings.paddle_start,
            half_extents: settings.paddle_half_extents,
            min_x: settings.min_x,
            max_x: settings.max_x,
            speed: settings.player_speed_scale,
        }
    }

    pub fn region(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_extents)
    }

    /// Apply held left/right input; x stays inside [min_x, max_x]
    pub fn steer(&mut self, input: &TickInput, dt: f32) {
        let mut dx = 0.0;
        if input.left {
            dx -= self.speed * dt;
        }
        if input.right {
            dx += self.speed * dt;
        }
        self.pos.x = (self.pos.x + dx).clamp(self.min_x, self.max_x);
    }
}

/// A destroyable brick
#[derive(Debug, Clone)]
pub struct Brick {
    pub id: BrickId,
    pub handle: EntityHandle,
    pub pos: Vec2,
    pub half_extents: Vec2,
}

impl Brick {
    pub fn region(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_extents)
    }
}

/// A static level border
#[derive(Debug, Clone)]
pub struct Border {
    pub kind: BorderKind,
    pub layer: Layer,
    pub region: Aabb,
}

impl From<&BorderSettings> for Border {
    fn from(settings: &BorderSettings) -> Self {
        Self {
            kind: settings.kind,
            layer: settings.layer,
            region: Aabb::from_center(settings.center, settings.half_extents),
        }
    }
}

/// Live entities of one session
#[derive(Debug, Clone)]
pub struct World {
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: Vec<Brick>,
    pub borders: Vec<Border>,
    pub table: ClassificationTable,
    /// Brick-break effects spawned this session, some possibly expired
    pub effects: Vec<EntityHandle>,
}

impl World {
    pub fn new(
        ball: Ball,
        paddle: Paddle,
        bricks: Vec<Brick>,
        borders: Vec<Border>,
        paddle_layer: Layer,
    ) -> Self {
        let table = ClassificationTable::build(paddle_layer, &borders, &bricks);
        Self {
            ball,
            paddle,
            bricks,
            borders,
            table,
            effects: Vec::new(),
        }
    }

    /// Region and surface kind of a collider, if it still exists
    pub fn collider(&self, id: ColliderId) -> Option<(Aabb, SurfaceKind)> {
        match id {
            ColliderId::Paddle => Some((self.paddle.region(), SurfaceKind::Paddle)),
            ColliderId::Border(i) => self
                .borders
                .get(i)
                .map(|b| (b.region, SurfaceKind::from(b.kind))),
            ColliderId::Brick(brick_id) => self
                .bricks
                .iter()
                .find(|b| b.id == brick_id)
                .map(|b| (b.region(), SurfaceKind::Brick)),
        }
    }

    /// Take a brick out of the world and the classification table
    pub fn remove_brick(&mut self, id: BrickId) -> Option<Brick> {
        let idx = self.bricks.iter().position(|b| b.id == id)?;
        self.table.remove(ColliderId::Brick(id));
        Some(self.bricks.remove(idx))
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.len()
    }
}

/// Lives, launch flag and phase
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: GamePhase,
    pub lives: u8,
    /// Ball is in flight
    pub launched: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Uninitialized,
            lives: INITIAL_LIVES,
            launched: false,
        }
    }

    /// Uninitialized -> Running with a full set of lives
    pub fn start(&mut self) {
        *self = Self {
            phase: GamePhase::Running,
            ..Self::new()
        };
    }

    /// Back to Uninitialized (session torn down)
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, GamePhase::Ended(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Set the launched flag; only while running
    pub fn launch(&mut self) {
        if self.is_running() {
            self.launched = true;
        }
    }

    /// Ball fell into the respawn zone. Returns true when this was the last life.
    pub fn lose_life(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.launched = false;
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::Ended(Outcome::Lost);
            true
        } else {
            false
        }
    }

    /// A brick broke. Returns true when none remain and the game is won.
    pub fn brick_cleared(&mut self, bricks_remaining: usize) -> bool {
        if !self.is_running() || bricks_remaining > 0 {
            return false;
        }
        self.phase = GamePhase::Ended(Outcome::Won);
        self.launched = false;
        true
    }
}
