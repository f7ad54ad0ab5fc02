//! Bounce rules
//!
//! The ball never reflects freely. A paddle hit picks one of four fixed
//! angles from where the ball struck; every other surface flips one axis.

use glam::Vec2;

use super::geometry::direction;
use crate::consts::PADDLE_ZONE_EDGE;

/// Axis flipped by a bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Axis to flip for a contact with the given face normal
    pub fn from_normal(normal: Vec2) -> Self {
        if normal.x == 0.0 { Axis::Y } else { Axis::X }
    }
}

/// New direction plus the positional correction that keeps the ball from
/// re-hitting the same surface next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub direction: Vec2,
    pub nudge: Vec2,
}

/// Direction after a paddle hit
///
/// `d = paddle.x - ball.x`. Rows are checked in order and the last match
/// wins; `d == 0` lands on (1, 1). At exactly `d == 0.4` no row matches and
/// `current` is kept.
pub fn on_paddle_contact(paddle_pos: Vec2, ball_pos: Vec2, current: Vec2) -> Vec2 {
    let d = paddle_pos.x - ball_pos.x;
    let mut result = current;

    if d > PADDLE_ZONE_EDGE {
        result = direction(-2.0, 1.0);
    }
    if (0.0..PADDLE_ZONE_EDGE).contains(&d) {
        result = direction(1.0, 1.0);
    }
    if d <= -PADDLE_ZONE_EDGE {
        result = direction(2.0, 1.0);
    }
    if (-PADDLE_ZONE_EDGE..0.0).contains(&d) {
        result = direction(-1.0, 1.0);
    }
    result
}

/// Negate one component of `current`
pub fn on_axis_flip(axis: Axis, current: Vec2) -> Vec2 {
    match axis {
        Axis::X => Vec2::new(-current.x, current.y),
        Axis::Y => Vec2::new(current.x, -current.y),
    }
}

/// Axis flip with the nudge `-previous_component * nudge_scale * dt`
pub fn axis_bounce(axis: Axis, current: Vec2, nudge_scale: f32, dt: f32) -> Bounce {
    let nudge = match axis {
        Axis::X => Vec2::new(-current.x * nudge_scale * dt, 0.0),
        Axis::Y => Vec2::new(0.0, -current.y * nudge_scale * dt),
    };
    Bounce {
        direction: on_axis_flip(axis, current),
        nudge,
    }
}
