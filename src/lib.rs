//! Brickbreak - single-screen brick-breaker simulation core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (swept collisions, bounce rules, game state)
//! - `platform`: Host abstraction (scene lifecycle, input, entity factory)
//! - `audio`: Sound effect ids and the audio sink
//! - `ui`: Win/lose panels, life indicators and reload wiring
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use audio::{AudioSink, SoundEffect};
pub use error::GameError;
pub use platform::{EntityFactory, EntityHandle, EntityKind, HeadlessHost, Host, InputProvider, SceneLifecycle};
pub use settings::{BorderSettings, Settings};
pub use sim::{GamePhase, Outcome, Simulation, TickInput};
pub use ui::{Panel, ReloadHandle, UiSink};

/// Game configuration constants
pub mod consts {
    /// Fixed timestep used by the demo driver
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Max simulation steps per rendered frame
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Lives at the start of a session (also the number of life indicators)
    pub const INITIAL_LIVES: u8 = 3;

    /// Paddle bounce table zone edge (world units from paddle center)
    pub const PADDLE_ZONE_EDGE: f32 = 0.4;

    /// Nudge applied after a border bounce, per unit of previous direction per second
    pub const BORDER_NUDGE: f32 = 5.0;
    /// Nudge applied after a brick bounce (stronger, bricks are thin)
    pub const BRICK_NUDGE: f32 = 10.0;

    /// Lifetime of the brick-break visual effect
    pub const VFX_LIFETIME: f32 = 1.2;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.5;
    pub const BALL_SCALE: f32 = 0.3;
    pub const BALL_SPEED_SCALE: f32 = 4.0;

    /// Paddle defaults
    pub const PLAYER_SPEED_SCALE: f32 = 2.0;
    pub const PADDLE_HALF_WIDTH: f32 = 0.6;
    pub const PADDLE_HALF_HEIGHT: f32 = 0.1;

    /// Brick defaults
    pub const BRICK_HALF_WIDTH: f32 = 0.4;
    pub const BRICK_HALF_HEIGHT: f32 = 0.15;

    /// Playfield half width (inner face of the side walls)
    pub const FIELD_HALF_WIDTH: f32 = 4.5;
    /// Playfield half height (ceiling and respawn zone faces)
    pub const FIELD_HALF_HEIGHT: f32 = 4.5;
    /// Border slab thickness / 2
    pub const BORDER_HALF_THICKNESS: f32 = 0.5;
}
