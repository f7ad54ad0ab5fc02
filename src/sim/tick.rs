//! Simulation loop
//!
//! `Simulation` owns the session: it spawns the world when the play scene
//! becomes active, advances it once per `tick`, and tears it down again.
//! Every consequence of a collision is requested from the host.

use glam::Vec2;

use super::collision::{ColliderId, Contact, Layer, SurfaceKind, resolve_frame_collisions};
use super::direction::{Axis, axis_bounce, on_paddle_contact};
use super::state::{Ball, Border, Brick, BrickId, GamePhase, GameState, Paddle, World};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::error::GameError;
use crate::platform::{EntityHandle, EntityKind, Host};
use crate::settings::Settings;
use crate::ui::{Panel, ReloadHandle};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Launch ball (space)
    pub launch: bool,
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
}

/// A brick-breaker session bound to a host
pub struct Simulation<H: Host> {
    settings: Settings,
    host: H,
    state: GameState,
    world: Option<World>,
    reload: ReloadHandle,
}

impl<H: Host> Simulation<H> {
    /// Build the simulation and wire the host's reload controls to it
    pub fn new(settings: Settings, mut host: H) -> Self {
        let reload = ReloadHandle::new();
        host.subscribe_reload(reload.clone());
        Self {
            settings,
            host,
            state: GameState::new(),
            world: None,
            reload,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Live entities, if a session is running
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Handle that requests a reload when fired
    pub fn reload_handle(&self) -> ReloadHandle {
        self.reload.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    /// One scheduler callback: follow the scene lifecycle, then tick
    pub fn frame(&mut self, dt: f32) -> Result<(), GameError> {
        if self.host.is_scene_active() {
            if !self.is_initialized() {
                self.initialize()?;
            }
            if self.reload.take() {
                self.reload()?;
            }
            self.tick(dt);
        } else {
            if self.is_initialized() {
                self.dispose();
            }
            if self.reload.take() {
                log::warn!("Reload requested while the play scene is inactive - ignored");
            }
        }
        Ok(())
    }

    /// Validate settings, spawn every entity and start running
    pub fn initialize(&mut self) -> Result<(), GameError> {
        if self.is_initialized() {
            return Ok(());
        }
        self.settings.validate()?;

        let mut spawned = Vec::new();
        let world = match spawn_world(&mut self.host, &self.settings, &mut spawned) {
            Ok(world) => world,
            Err(e) => {
                log::warn!("Initialize failed ({}), destroying {} spawned entities", e, spawned.len());
                for handle in spawned {
                    self.host.destroy(handle);
                }
                return Err(e);
            }
        };

        self.host.hide(Panel::Win);
        self.host.hide(Panel::Lose);
        for i in 0..INITIAL_LIVES as usize {
            self.host.set_life_indicator(i, true);
        }
        self.host.play(SoundEffect::Ambient);

        log::info!(
            "Session initialized: {} bricks, {} borders",
            world.bricks_remaining(),
            world.borders.len()
        );
        self.world = Some(world);
        self.state.start();
        Ok(())
    }

    /// Destroy every owned entity; a new session needs `initialize`
    pub fn dispose(&mut self) {
        if let Some(world) = self.world.take() {
            self.host.destroy(world.ball.handle);
            self.host.destroy(world.paddle.handle);
            for brick in &world.bricks {
                self.host.destroy(brick.handle);
            }
            for &fx in &world.effects {
                self.host.destroy(fx);
            }
            log::info!("Session disposed");
        }
        self.state.clear();
    }

    /// Reset everything to the configured start in one step
    pub fn reload(&mut self) -> Result<(), GameError> {
        log::info!("Reloading session");
        self.dispose();
        self.initialize()
    }

    /// Advance one step of `dt` time units
    pub fn tick(&mut self, dt: f32) {
        let Self {
            settings,
            host,
            state,
            world,
            ..
        } = self;
        let Some(world) = world.as_mut() else {
            return;
        };
        if state.is_ended() {
            return;
        }

        let input = host.sample();
        if input.launch {
            state.launch();
        }

        if state.launched {
            let move_vector = world.ball.integrate(dt);
            if settings.logging {
                log::debug!("Direction: {}", world.ball.direction);
            }

            let contacts = resolve_frame_collisions(world, &world.ball, move_vector);
            if contacts.any() {
                let mut step = Step {
                    settings: &*settings,
                    host: &mut *host,
                    state: &mut *state,
                    world: &mut *world,
                    dt,
                    respawned: false,
                };
                for (layer, contact) in [
                    (Layer::Vertical, contacts.vertical),
                    (Layer::Horizontal, contacts.horizontal),
                    (Layer::Bricks, contacts.brick),
                ] {
                    if let Some(contact) = contact {
                        step.apply(layer, contact);
                    }
                }
            }
        }

        if !state.is_ended() {
            world.paddle.steer(&input, dt);
        }
    }
}

/// Spawn ball, paddle and bricks, recording handles so a failure can be undone
fn spawn_world<H: Host>(
    host: &mut H,
    settings: &Settings,
    spawned: &mut Vec<EntityHandle>,
) -> Result<World, GameError> {
    let mut spawn = |kind: EntityKind, pos: Vec2| -> Result<EntityHandle, GameError> {
        let handle = host.spawn(kind, pos).ok_or(GameError::MissingResource(kind))?;
        spawned.push(handle);
        Ok(handle)
    };

    let ball = Ball::new(spawn(EntityKind::Ball, settings.ball_start)?, settings);
    let paddle = Paddle::new(spawn(EntityKind::Paddle, settings.paddle_start)?, settings);

    let mut bricks = Vec::with_capacity(settings.brick_positions.len());
    for (i, &pos) in settings.brick_positions.iter().enumerate() {
        bricks.push(Brick {
            id: BrickId(i as u32),
            handle: spawn(EntityKind::Brick, pos)?,
            pos,
            half_extents: settings.brick_half_extents,
        });
    }

    let borders = settings.borders.iter().map(Border::from).collect();
    Ok(World::new(ball, paddle, bricks, borders, settings.paddle_layer))
}

/// Borrowed view of the session while contacts are applied
struct Step<'a, H: Host> {
    settings: &'a Settings,
    host: &'a mut H,
    state: &'a mut GameState,
    world: &'a mut World,
    dt: f32,
    /// Ball went back to its start pose; later contacts are stale
    respawned: bool,
}

impl<H: Host> Step<'_, H> {
    fn apply(&mut self, layer: Layer, contact: Contact) {
        if self.state.is_ended() || self.respawned {
            return;
        }
        match contact.kind {
            SurfaceKind::Paddle => self.bounce_off_paddle(),
            SurfaceKind::Respawn => self.lose_ball(),
            SurfaceKind::Solid => {
                let axis = match layer {
                    Layer::Vertical => Axis::Y,
                    Layer::Horizontal => Axis::X,
                    Layer::Bricks => Axis::from_normal(contact.normal),
                };
                self.bounce(axis, BORDER_NUDGE);
            }
            SurfaceKind::Brick => self.break_brick(contact),
        }
    }

    fn bounce(&mut self, axis: Axis, nudge_scale: f32) {
        let ball = &mut self.world.ball;
        let bounce = axis_bounce(axis, ball.direction, nudge_scale, self.dt);
        ball.direction = bounce.direction;
        ball.pos += bounce.nudge;
    }

    fn bounce_off_paddle(&mut self) {
        self.host.play(SoundEffect::PaddleHit);
        let ball = &mut self.world.ball;
        ball.direction = on_paddle_contact(self.world.paddle.pos, ball.pos, ball.direction);
    }

    fn lose_ball(&mut self) {
        self.host.play(SoundEffect::Ambient);
        self.host.play(SoundEffect::Lose);
        self.world.ball.pos = self.settings.ball_start;
        self.world.paddle.pos = self.settings.paddle_start;
        self.respawned = true;

        let lost = self.state.lose_life();
        let lives = self.state.lives as usize;
        for i in 0..INITIAL_LIVES as usize {
            self.host.set_life_indicator(i, i < lives);
        }

        if lost {
            self.host.show(Panel::Lose);
            log::info!("Out of lives - game lost");
        } else {
            log::info!("Ball lost, {} lives left", lives);
        }
    }

    fn break_brick(&mut self, contact: Contact) {
        let ColliderId::Brick(id) = contact.collider else {
            return;
        };
        let Some(brick) = self.world.remove_brick(id) else {
            return;
        };

        match self.host.spawn(EntityKind::Vfx, brick.pos) {
            Some(fx) => {
                self.host.destroy_after(fx, VFX_LIFETIME);
                self.world.effects.push(fx);
            }
            None => log::warn!("No brick-break effect available"),
        }
        self.host.play(SoundEffect::BrickHit);
        if self.settings.logging {
            log::debug!("Brick contact normal: {}", contact.normal);
        }

        self.bounce(Axis::from_normal(contact.normal), BRICK_NUDGE);
        self.host.destroy(brick.handle);

        if self.state.brick_cleared(self.world.bricks_remaining()) {
            self.host.stop(SoundEffect::Ambient);
            self.host.play(SoundEffect::Win);
            self.host.show(Panel::Win);
            log::info!("All bricks destroyed - game won");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{AudioEvent, HeadlessHost};
    use crate::sim::Outcome;
    use crate::sim::geometry::direction;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn started(settings: Settings) -> Simulation<HeadlessHost> {
        let mut sim = Simulation::new(settings, HeadlessHost::new());
        sim.frame(DT).unwrap();
        sim
    }

    fn with_bricks(positions: &[Vec2]) -> Settings {
        Settings {
            brick_positions: positions.to_vec(),
            ..Default::default()
        }
    }

    /// Put the ball somewhere in flight
    fn place_ball(sim: &mut Simulation<HeadlessHost>, pos: Vec2, dir: Vec2) {
        let world = sim.world.as_mut().unwrap();
        world.ball.pos = pos;
        world.ball.direction = dir;
        sim.state.launched = true;
    }

    fn ball(sim: &Simulation<HeadlessHost>) -> &Ball {
        &sim.world().unwrap().ball
    }

    #[test]
    fn test_frame_initializes_session() {
        let sim = started(Settings::default());
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.state().lives, INITIAL_LIVES);
        assert!(!sim.state().launched);

        let host = sim.host();
        assert_eq!(host.count(EntityKind::Ball), 1);
        assert_eq!(host.count(EntityKind::Paddle), 1);
        assert_eq!(host.count(EntityKind::Brick), 27);
        assert!(host.played(SoundEffect::Ambient));
        assert!(!host.is_shown(Panel::Win));
        assert!(!host.is_shown(Panel::Lose));
        assert_eq!(host.life_indicators, vec![true; 3]);
    }

    #[test]
    fn test_tick_before_initialize_is_noop() {
        let mut sim = Simulation::new(Settings::default(), HeadlessHost::new());
        sim.tick(DT);
        assert!(!sim.is_initialized());
        assert_eq!(sim.phase(), GamePhase::Uninitialized);
    }

    #[test]
    fn test_ball_waits_for_launch_but_paddle_moves() {
        let mut sim = started(Settings::default());
        let start = ball(&sim).pos;
        sim.host_mut().input.right = true;
        for _ in 0..10 {
            sim.tick(DT);
        }
        assert_eq!(ball(&sim).pos, start);
        let paddle_x = sim.world().unwrap().paddle.pos.x;
        assert!((paddle_x - 10.0 * PLAYER_SPEED_SCALE * DT).abs() < 1e-4);
    }

    #[test]
    fn test_launch_moves_ball_and_sticks() {
        let mut sim = started(Settings::default());
        let start = ball(&sim).pos;

        sim.host_mut().input.launch = true;
        sim.tick(DT);
        assert!(sim.state().launched);
        let expected = start + direction(1.0, 1.0) * BALL_SPEED_SCALE * DT;
        assert!((ball(&sim).pos - expected).length() < 1e-5);

        sim.host_mut().input.launch = false;
        sim.tick(DT);
        assert!(sim.state().launched);
    }

    #[test]
    fn test_paddle_hit_right_of_center() {
        let mut sim = started(Settings::default());
        place_ball(&mut sim, Vec2::new(0.5, -2.65), Vec2::new(0.0, -1.0));
        sim.tick(DT);
        assert!((ball(&sim).direction - direction(2.0, 1.0)).length() < 1e-6);
        assert!(sim.host().played(SoundEffect::PaddleHit));
    }

    #[test]
    fn test_paddle_hit_left_of_center() {
        let mut sim = started(Settings::default());
        place_ball(&mut sim, Vec2::new(-0.2, -2.65), Vec2::new(0.0, -1.0));
        sim.tick(DT);
        assert!((ball(&sim).direction - direction(1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_ceiling_flips_y_with_nudge() {
        let mut sim = started(Settings::default());
        let dir = direction(1.0, 1.0);
        let start = Vec2::new(0.0, 4.28);
        place_ball(&mut sim, start, dir);
        sim.tick(DT);

        let ball = ball(&sim);
        assert!((ball.direction - Vec2::new(dir.x, -dir.y)).length() < 1e-6);
        let expected_y = start.y + dir.y * BALL_SPEED_SCALE * DT - dir.y * BORDER_NUDGE * DT;
        assert!((ball.pos.y - expected_y).abs() < 1e-5);
    }

    #[test]
    fn test_side_wall_flips_x() {
        let mut sim = started(Settings::default());
        place_ball(&mut sim, Vec2::new(4.28, 0.0), direction(1.0, 1.0));
        sim.tick(DT);
        let ball = ball(&sim);
        assert!(ball.direction.x < 0.0);
        assert!(ball.direction.y > 0.0);
    }

    #[test]
    fn test_brick_hit_destroys_brick() {
        let mut sim = started(with_bricks(&[Vec2::new(0.0, 1.0), Vec2::new(3.0, 3.5)]));
        let dir = direction(1.0, 1.0);
        place_ball(&mut sim, Vec2::new(0.0, 0.62), dir);
        sim.tick(DT);

        let host = sim.host();
        assert_eq!(host.count(EntityKind::Brick), 1);
        assert_eq!(host.positions(EntityKind::Brick), vec![Vec2::new(3.0, 3.5)]);
        assert_eq!(host.count(EntityKind::Vfx), 1);
        assert_eq!(host.pending_destroys().len(), 1);
        assert_eq!(host.pending_destroys()[0].1, VFX_LIFETIME);
        assert!(host.played(SoundEffect::BrickHit));

        assert_eq!(sim.world().unwrap().bricks_remaining(), 1);
        assert!((ball(&sim).direction - Vec2::new(dir.x, -dir.y)).length() < 1e-6);
        assert_eq!(sim.phase(), GamePhase::Running);
    }

    #[test]
    fn test_brick_effect_expires() {
        let mut sim = started(with_bricks(&[Vec2::new(0.0, 1.0), Vec2::new(3.0, 3.5)]));
        place_ball(&mut sim, Vec2::new(0.0, 0.62), direction(1.0, 1.0));
        sim.tick(DT);
        assert_eq!(sim.host().count(EntityKind::Vfx), 1);

        sim.host_mut().advance(1.0);
        assert_eq!(sim.host().count(EntityKind::Vfx), 1);
        sim.host_mut().advance(0.25);
        assert_eq!(sim.host().count(EntityKind::Vfx), 0);
    }

    #[test]
    fn test_dispose_destroys_effects() {
        let mut sim = started(with_bricks(&[Vec2::new(0.0, 1.0), Vec2::new(3.0, 3.5)]));
        place_ball(&mut sim, Vec2::new(0.0, 0.62), direction(1.0, 1.0));
        sim.tick(DT);

        sim.dispose();
        let host = sim.host();
        assert_eq!(host.count(EntityKind::Vfx), 0);
        assert!(host.pending_destroys().is_empty());
        assert_eq!(host.count(EntityKind::Brick), 0);
    }

    #[test]
    fn test_last_brick_wins() {
        let mut sim = started(with_bricks(&[Vec2::new(0.0, 1.0)]));
        place_ball(&mut sim, Vec2::new(0.0, 0.62), direction(1.0, 1.0));
        sim.tick(DT);

        assert_eq!(sim.phase(), GamePhase::Ended(Outcome::Won));
        assert!(sim.state().is_ended());
        assert!(!sim.state().launched);
        let host = sim.host();
        assert!(host.is_shown(Panel::Win));
        assert!(host.stopped(SoundEffect::Ambient));
        assert!(host.played(SoundEffect::Win));
    }

    #[test]
    fn test_respawn_costs_a_life() {
        let mut sim = started(Settings::default());
        sim.world.as_mut().unwrap().paddle.pos.x = 2.0;
        place_ball(&mut sim, Vec2::new(3.0, -4.32), direction(1.0, -1.0));
        sim.tick(DT);

        assert_eq!(sim.state().lives, 2);
        assert_eq!(sim.phase(), GamePhase::Running);
        assert!(!sim.state().launched);
        let world = sim.world().unwrap();
        assert_eq!(world.ball.pos, sim.settings().ball_start);
        assert_eq!(world.paddle.pos, sim.settings().paddle_start);
        assert_eq!(sim.host().life_indicators, vec![true, true, false]);
        assert!(sim.host().played(SoundEffect::Lose));
        assert!(!sim.host().is_shown(Panel::Lose));
    }

    #[test]
    fn test_respawn_with_last_life_loses() {
        let mut sim = started(Settings::default());
        sim.state.lives = 1;
        place_ball(&mut sim, Vec2::new(3.0, -4.32), direction(1.0, -1.0));
        sim.tick(DT);

        assert_eq!(sim.state().lives, 0);
        assert_eq!(sim.phase(), GamePhase::Ended(Outcome::Lost));
        assert!(sim.host().is_shown(Panel::Lose));
        assert_eq!(sim.host().life_indicators, vec![false; 3]);
    }

    #[test]
    fn test_brick_and_wall_in_same_tick() {
        let mut sim = started(with_bricks(&[Vec2::new(-4.1, 4.0), Vec2::new(3.0, 3.5)]));
        let dir = direction(-1.0, 1.0);
        let step = dir * BALL_SPEED_SCALE * DT;
        place_ball(&mut sim, Vec2::new(-4.32, 3.67) - step, dir);
        sim.tick(DT);

        // Side wall flips x, brick underside flips y
        assert!((ball(&sim).direction - direction(1.0, -1.0)).length() < 1e-6);
        assert_eq!(sim.world().unwrap().bricks_remaining(), 1);
        assert!(sim.host().played(SoundEffect::BrickHit));
    }

    #[test]
    fn test_respawn_in_corner_ignores_wall() {
        let mut sim = started(Settings::default());
        let dir = direction(1.0, -1.0);
        place_ball(&mut sim, Vec2::new(4.32, -4.32), dir);
        sim.tick(DT);

        assert_eq!(sim.state().lives, 2);
        let ball = ball(&sim);
        assert_eq!(ball.pos, sim.settings().ball_start);
        assert_eq!(ball.direction, dir);
    }

    #[test]
    fn test_respawn_beside_brick_keeps_brick() {
        let mut sim = started(with_bricks(&[Vec2::new(3.6, -4.2), Vec2::new(0.0, 3.0)]));
        let dir = direction(1.0, -1.0);
        place_ball(&mut sim, Vec2::new(3.0, -4.32), dir);
        sim.tick(DT);

        assert_eq!(sim.state().lives, 2);
        let ball = ball(&sim);
        assert_eq!(ball.pos, sim.settings().ball_start);
        assert_eq!(ball.direction, dir);
        assert_eq!(sim.world().unwrap().bricks_remaining(), 2);
        assert_eq!(sim.host().count(EntityKind::Brick), 2);
        assert_eq!(sim.host().count(EntityKind::Vfx), 0);
        assert!(!sim.host().played(SoundEffect::BrickHit));
    }

    #[test]
    fn test_ended_session_is_frozen() {
        let mut sim = started(with_bricks(&[Vec2::new(0.0, 1.0)]));
        place_ball(&mut sim, Vec2::new(0.0, 0.62), direction(1.0, 1.0));
        sim.tick(DT);
        assert!(sim.state().is_ended());

        let state = sim.state().clone();
        let ball_pos = ball(&sim).pos;
        let paddle_pos = sim.world().unwrap().paddle.pos;
        let audio = sim.host().audio_log.len();

        sim.host_mut().input = TickInput {
            launch: true,
            left: true,
            right: false,
        };
        for _ in 0..120 {
            sim.frame(DT).unwrap();
        }
        assert_eq!(sim.state(), &state);
        assert_eq!(ball(&sim).pos, ball_pos);
        assert_eq!(sim.world().unwrap().paddle.pos, paddle_pos);
        assert_eq!(sim.host().audio_log.len(), audio);
    }

    #[test]
    fn test_reload_after_loss_restores_everything() {
        let settings = Settings::default();
        let mut sim = started(settings.clone());
        sim.state.lives = 1;
        place_ball(&mut sim, Vec2::new(3.0, -4.32), direction(1.0, -1.0));
        sim.tick(DT);
        assert!(sim.state().is_ended());

        assert!(sim.host().click_reload());
        sim.frame(DT).unwrap();

        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.state().lives, INITIAL_LIVES);
        let host = sim.host();
        assert_eq!(host.life_indicators, vec![true; 3]);
        assert!(!host.is_shown(Panel::Lose));
        assert_eq!(host.count(EntityKind::Ball), 1);
        assert_eq!(host.count(EntityKind::Paddle), 1);
        assert_eq!(host.positions(EntityKind::Brick), settings.brick_positions);
    }

    #[test]
    fn test_reload_after_win_respawns_bricks() {
        let layout = [Vec2::new(0.0, 1.0)];
        let mut sim = started(with_bricks(&layout));
        place_ball(&mut sim, Vec2::new(0.0, 0.62), direction(1.0, 1.0));
        sim.tick(DT);
        assert_eq!(sim.phase(), GamePhase::Ended(Outcome::Won));
        assert_eq!(sim.host().count(EntityKind::Brick), 0);

        sim.reload_handle().request();
        sim.frame(DT).unwrap();

        assert_eq!(sim.phase(), GamePhase::Running);
        assert!(!sim.host().is_shown(Panel::Win));
        assert_eq!(sim.host().positions(EntityKind::Brick), layout.to_vec());
        assert_eq!(ball(&sim).direction, direction(1.0, 1.0));
    }

    #[test]
    fn test_inactive_scene_disposes() {
        let mut sim = started(Settings::default());
        sim.host_mut().scene_active = false;
        sim.frame(DT).unwrap();

        assert!(!sim.is_initialized());
        assert_eq!(sim.phase(), GamePhase::Uninitialized);
        let host = sim.host();
        assert_eq!(host.count(EntityKind::Ball), 0);
        assert_eq!(host.count(EntityKind::Paddle), 0);
        assert_eq!(host.count(EntityKind::Brick), 0);

        sim.host_mut().scene_active = true;
        sim.frame(DT).unwrap();
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.host().count(EntityKind::Brick), 27);
    }

    #[test]
    fn test_reload_while_inactive_is_dropped() {
        let mut sim = started(Settings::default());
        sim.host_mut().scene_active = false;
        sim.reload_handle().request();
        sim.frame(DT).unwrap();
        assert!(!sim.reload_handle().is_pending());
        assert!(!sim.is_initialized());
    }

    #[test]
    fn test_invalid_settings_fail_initialize() {
        let settings = Settings {
            ball_scale: 0.0,
            ..Default::default()
        };
        let mut sim = Simulation::new(settings, HeadlessHost::new());
        let err = sim.frame(DT).unwrap_err();
        assert!(matches!(err, GameError::InvalidSetting { name: "ball_scale", .. }));
        assert!(!sim.is_initialized());
        assert_eq!(sim.host().count(EntityKind::Ball), 0);
    }

    #[test]
    fn test_missing_resource_fails_initialize() {
        let mut host = HeadlessHost::new();
        host.missing.push(EntityKind::Brick);
        let mut sim = Simulation::new(Settings::default(), host);

        assert_eq!(sim.initialize(), Err(GameError::MissingResource(EntityKind::Brick)));
        // Ball and paddle were spawned before the failure and cleaned up
        assert_eq!(sim.host().count(EntityKind::Ball), 0);
        assert_eq!(sim.host().count(EntityKind::Paddle), 0);
        assert_eq!(sim.phase(), GamePhase::Uninitialized);
        assert!(!sim.host().audio_log.contains(&AudioEvent::Play(SoundEffect::Ambient)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_invariants_hold_every_tick(
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..600),
            dt in 0.004f32..0.04,
        ) {
            let mut sim = started(Settings::default());
            let mut lives = sim.state().lives;
            for (launch, left, right) in inputs {
                sim.host_mut().input = TickInput { launch, left, right };
                sim.tick(dt);

                let state = sim.state();
                prop_assert!(state.lives <= lives);
                prop_assert!(state.lives <= INITIAL_LIVES);
                lives = state.lives;

                let world = sim.world().unwrap();
                prop_assert!(world.paddle.pos.x >= world.paddle.min_x);
                prop_assert!(world.paddle.pos.x <= world.paddle.max_x);
                prop_assert!((world.ball.direction.length() - 1.0).abs() < 1e-4);

                let ended = state.lives == 0 || world.bricks_remaining() == 0;
                prop_assert_eq!(state.is_ended(), ended);
            }
        }
    }
}
