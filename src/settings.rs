//! Game settings
//!
//! Everything a level designer can tune: scales, paddle bounds, brick layout
//! and which collision layer each border lives on. Loaded from JSON; missing
//! fields fall back to the defaults below.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::{BorderKind, Layer};

/// A static border region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderSettings {
    pub kind: BorderKind,
    pub layer: Layer,
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl BorderSettings {
    pub fn new(kind: BorderKind, layer: Layer, center: Vec2, half_extents: Vec2) -> Self {
        Self {
            kind,
            layer,
            center,
            half_extents,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ball ===
    /// Multiplier applied to the ball collider radius
    pub ball_scale: f32,
    /// Unscaled ball collider radius
    pub ball_radius: f32,
    /// Ball speed (world units per second)
    pub ball_speed_scale: f32,
    /// Ball spawn / respawn position
    pub ball_start: Vec2,

    // === Paddle ===
    /// Paddle speed (world units per second)
    pub player_speed_scale: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub paddle_start: Vec2,
    pub paddle_half_extents: Vec2,
    /// Layer the paddle is queried on
    pub paddle_layer: Layer,

    // === Level ===
    pub brick_half_extents: Vec2,
    pub brick_positions: Vec<Vec2>,
    pub borders: Vec<BorderSettings>,

    /// Verbose per-tick logging
    pub logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_scale: BALL_SCALE,
            ball_radius: BALL_RADIUS,
            ball_speed_scale: BALL_SPEED_SCALE,
            ball_start: Vec2::new(0.0, -2.7),

            player_speed_scale: PLAYER_SPEED_SCALE,
            min_x: -(FIELD_HALF_WIDTH - PADDLE_HALF_WIDTH),
            max_x: FIELD_HALF_WIDTH - PADDLE_HALF_WIDTH,
            paddle_start: Vec2::new(0.0, -3.0),
            paddle_half_extents: Vec2::new(PADDLE_HALF_WIDTH, PADDLE_HALF_HEIGHT),
            paddle_layer: Layer::Vertical,

            brick_half_extents: Vec2::new(BRICK_HALF_WIDTH, BRICK_HALF_HEIGHT),
            brick_positions: default_brick_layout(),
            borders: default_borders(),

            logging: false,
        }
    }
}

/// Three rows of nine bricks across the top of the field
pub fn default_brick_layout() -> Vec<Vec2> {
    let mut positions = Vec::with_capacity(27);
    for row in 0..3 {
        let y = 3.5 - row as f32 * 0.5;
        for col in 0..9 {
            let x = -3.6 + col as f32 * 0.9;
            positions.push(Vec2::new(x, y));
        }
    }
    positions
}

/// Ceiling and respawn zone on the vertical layer, side walls on the horizontal one
pub fn default_borders() -> Vec<BorderSettings> {
    let edge = BORDER_HALF_THICKNESS;
    let span = FIELD_HALF_WIDTH + 2.0 * edge;
    vec![
        BorderSettings::new(
            BorderKind::Solid,
            Layer::Vertical,
            Vec2::new(0.0, FIELD_HALF_HEIGHT + edge),
            Vec2::new(span, edge),
        ),
        BorderSettings::new(
            BorderKind::Respawn,
            Layer::Vertical,
            Vec2::new(0.0, -(FIELD_HALF_HEIGHT + edge)),
            Vec2::new(span, edge),
        ),
        BorderSettings::new(
            BorderKind::Solid,
            Layer::Horizontal,
            Vec2::new(-(FIELD_HALF_WIDTH + edge), 0.0),
            Vec2::new(edge, FIELD_HALF_HEIGHT + 2.0 * edge),
        ),
        BorderSettings::new(
            BorderKind::Solid,
            Layer::Horizontal,
            Vec2::new(FIELD_HALF_WIDTH + edge, 0.0),
            Vec2::new(edge, FIELD_HALF_HEIGHT + 2.0 * edge),
        ),
    ]
}

fn positive(name: &'static str, value: f32) -> Result<(), GameError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::invalid(name, format!("must be positive, got {}", value)))
    }
}

fn positive_extents(name: &'static str, value: Vec2) -> Result<(), GameError> {
    if value.is_finite() && value.x > 0.0 && value.y > 0.0 {
        Ok(())
    } else {
        Err(GameError::invalid(name, format!("extents must be positive, got {}", value)))
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Swept box half extent of the ball
    pub fn ball_half_extent(&self) -> f32 {
        self.ball_radius * self.ball_scale
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), GameError> {
        positive("ball_scale", self.ball_scale)?;
        positive("ball_radius", self.ball_radius)?;
        positive("ball_speed_scale", self.ball_speed_scale)?;
        positive("player_speed_scale", self.player_speed_scale)?;
        positive_extents("paddle_half_extents", self.paddle_half_extents)?;
        positive_extents("brick_half_extents", self.brick_half_extents)?;

        if !(self.min_x.is_finite() && self.max_x.is_finite()) || self.min_x > self.max_x {
            return Err(GameError::invalid(
                "min_x",
                format!("bounds [{}, {}] are inverted", self.min_x, self.max_x),
            ));
        }
        if self.paddle_start.x < self.min_x || self.paddle_start.x > self.max_x {
            return Err(GameError::invalid(
                "paddle_start",
                format!(
                    "x = {} lies outside [{}, {}]",
                    self.paddle_start.x, self.min_x, self.max_x
                ),
            ));
        }
        if self.paddle_layer == Layer::Bricks {
            return Err(GameError::invalid("paddle_layer", "the brick layer holds bricks only"));
        }
        for border in &self.borders {
            if border.layer == Layer::Bricks {
                return Err(GameError::invalid("borders", "the brick layer holds bricks only"));
            }
            positive_extents("borders", border.half_extents)?;
        }
        if self.brick_positions.is_empty() {
            return Err(GameError::EmptyBrickLayout);
        }
        Ok(())
    }
}
