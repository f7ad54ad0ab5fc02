//! Simulation module
//!
//! All gameplay logic lives here:
//! - Motion scaled by elapsed time, never by tick count
//! - Swept-box collision queries per layer
//! - Fixed bounce table, no free-angle physics
//! - No rendering; side effects go through `crate::platform::Host`

pub mod collision;
pub mod direction;
pub mod geometry;
pub mod state;
pub mod tick;

pub use collision::{
    ClassificationTable, ColliderId, Contact, FrameContacts, Layer, SurfaceKind, query_layer,
    resolve_frame_collisions,
};
pub use direction::{Axis, Bounce, axis_bounce, on_axis_flip, on_paddle_contact};
pub use geometry::{Aabb, SweepHit, sweep_box};
pub use state::{Ball, Border, BorderKind, Brick, BrickId, GamePhase, GameState, Outcome, Paddle, World};
pub use tick::{Simulation, TickInput};
