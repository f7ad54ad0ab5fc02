//! Platform abstraction layer
//!
//! Everything the simulation needs from the engine around it:
//! - Scene activity (drives initialize / dispose)
//! - Input sampling
//! - Entity spawning and destruction
//!
//! Audio and UI requests live in `crate::audio` and `crate::ui`. `Host`
//! bundles all of them so the simulation can own a single collaborator.

pub mod headless;

use glam::Vec2;

use crate::audio::AudioSink;
use crate::sim::TickInput;
use crate::ui::UiSink;

pub use headless::{AudioEvent, HeadlessHost};

/// Opaque id of an entity spawned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(pub u64);

/// Prefabs the simulation instantiates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Ball,
    Paddle,
    Brick,
    /// Brick-break effect, destroyed after a delay
    Vfx,
}

/// Reports whether the play scene is the active one
pub trait SceneLifecycle {
    fn is_scene_active(&self) -> bool;
}

/// Sampled once per tick
pub trait InputProvider {
    fn sample(&mut self) -> TickInput;
}

/// Instantiates and destroys entities
pub trait EntityFactory {
    /// `None` when the prefab for `kind` is unavailable
    fn spawn(&mut self, kind: EntityKind, position: Vec2) -> Option<EntityHandle>;
    fn destroy(&mut self, handle: EntityHandle);
    /// Destroy after `delay` time units
    fn destroy_after(&mut self, handle: EntityHandle, delay: f32);
}

/// Everything the simulation talks to
pub trait Host: SceneLifecycle + InputProvider + EntityFactory + AudioSink + UiSink {}

impl<T> Host for T where T: SceneLifecycle + InputProvider + EntityFactory + AudioSink + UiSink {}
