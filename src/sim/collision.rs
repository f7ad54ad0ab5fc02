//! Collision classification and per-frame queries
//!
//! Every collidable carries an explicit `SurfaceKind` and belongs to one
//! `Layer`. The `ClassificationTable` is built once when a session starts and
//! only shrinks afterwards (bricks are removed as they break).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::sweep_box;
use super::state::{Ball, Border, BorderKind, Brick, BrickId, World};

/// Query group a collider belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Paddle, ceiling and respawn zone - bounces flip the y axis
    Vertical,
    /// Side walls - bounces flip the x axis
    Horizontal,
    /// Destroyable bricks
    Bricks,
}

impl Layer {
    fn index(self) -> usize {
        match self {
            Layer::Vertical => 0,
            Layer::Horizontal => 1,
            Layer::Bricks => 2,
        }
    }
}

/// What happens when the ball strikes a collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Paddle,
    Solid,
    Respawn,
    Brick,
}

impl From<BorderKind> for SurfaceKind {
    fn from(kind: BorderKind) -> Self {
        match kind {
            BorderKind::Solid => SurfaceKind::Solid,
            BorderKind::Respawn => SurfaceKind::Respawn,
        }
    }
}

/// Stable reference to a collider in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderId {
    Paddle,
    Border(usize),
    Brick(BrickId),
}

/// A resolved collision for one layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub collider: ColliderId,
    pub kind: SurfaceKind,
    /// Axis normal of the struck face, pointing towards the ball
    pub normal: Vec2,
    /// Fraction of the probe travelled before contact
    pub toi: f32,
}

/// Layer -> colliders lookup, built once per session
#[derive(Debug, Clone, Default)]
pub struct ClassificationTable {
    layers: [Vec<ColliderId>; 3],
}

impl ClassificationTable {
    pub fn build(paddle_layer: Layer, borders: &[Border], bricks: &[Brick]) -> Self {
        let mut table = Self::default();
        table.layers[paddle_layer.index()].push(ColliderId::Paddle);
        for (i, border) in borders.iter().enumerate() {
            table.layers[border.layer.index()].push(ColliderId::Border(i));
        }
        for brick in bricks {
            table.layers[Layer::Bricks.index()].push(ColliderId::Brick(brick.id));
        }
        table
    }

    pub fn members(&self, layer: Layer) -> &[ColliderId] {
        &self.layers[layer.index()]
    }

    pub fn remove(&mut self, id: ColliderId) {
        for layer in &mut self.layers {
            layer.retain(|member| *member != id);
        }
    }
}

/// Contacts found in one frame; every layer is queried, none short-circuits
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameContacts {
    pub vertical: Option<Contact>,
    pub horizontal: Option<Contact>,
    pub brick: Option<Contact>,
}

impl FrameContacts {
    pub fn any(&self) -> bool {
        self.vertical.is_some() || self.horizontal.is_some() || self.brick.is_some()
    }
}

/// Earliest contact of a box swept along `motion` against one layer
pub fn query_layer(
    world: &World,
    layer: Layer,
    center: Vec2,
    half_extents: Vec2,
    motion: Vec2,
) -> Option<Contact> {
    let mut best: Option<Contact> = None;
    for &id in world.table.members(layer) {
        let Some((region, kind)) = world.collider(id) else {
            continue;
        };
        if let Some(hit) = sweep_box(center, half_extents, motion, &region) {
            if best.is_none_or(|b| hit.toi < b.toi) {
                best = Some(Contact {
                    collider: id,
                    kind,
                    normal: hit.normal,
                    toi: hit.toi,
                });
            }
        }
    }
    best
}

/// Query all three layers with the ball's box swept along its direction
/// over `|move_vector|`
pub fn resolve_frame_collisions(
    world: &World,
    ball: &Ball,
    move_vector: Vec2,
) -> FrameContacts {
    let motion = ball.direction * move_vector.length();
    let half = ball.half_extents();
    FrameContacts {
        vertical: query_layer(world, Layer::Vertical, ball.pos, half, motion),
        horizontal: query_layer(world, Layer::Horizontal, ball.pos, half, motion),
        brick: query_layer(world, Layer::Bricks, ball.pos, half, motion),
    }
}
