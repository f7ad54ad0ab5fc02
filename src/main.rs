//! Brickbreak entry point
//!
//! Runs headless sessions driven by a seeded autopilot and logs how they end.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use brickbreak::consts::*;
use brickbreak::{GameError, HeadlessHost, Outcome, Settings, Simulation, TickInput};

/// Give up on a round after ten minutes of simulated time
const MAX_FRAMES_PER_ROUND: u32 = 60 * 60 * 10;

#[derive(Parser, Debug)]
#[command(name = "brickbreak")]
#[command(about = "Headless brick-breaker sessions driven by an autopilot")]
struct Args {
    /// Settings JSON file (built-in defaults when omitted)
    settings: Option<PathBuf>,
    /// Autopilot RNG seed
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Rounds to play, replaying after each one ends
    #[arg(long, default_value_t = 1)]
    rounds: u32,
}

/// Steers toward the ball, aiming a little off-center and sometimes badly
struct Autopilot {
    rng: Pcg32,
    aim: f32,
    retarget_in: u32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            aim: 0.0,
            retarget_in: 0,
        }
    }

    fn input(&mut self, paddle_x: f32, ball_x: f32) -> TickInput {
        if self.retarget_in == 0 {
            self.aim = if self.rng.random_bool(0.1) {
                self.rng.random_range(-1.5..1.5)
            } else {
                self.rng.random_range(-0.45..0.45)
            };
            self.retarget_in = self.rng.random_range(20..90);
        }
        self.retarget_in -= 1;

        let target = ball_x + self.aim;
        TickInput {
            launch: true,
            left: paddle_x > target + 0.05,
            right: paddle_x < target - 0.05,
        }
    }

    /// Display frame time with some jitter
    fn frame_time(&mut self) -> f32 {
        self.rng.random_range(0.012..0.022)
    }
}

/// Fixed-step driver around the simulation
struct Demo {
    sim: Simulation<HeadlessHost>,
    pilot: Autopilot,
    accumulator: f32,
}

impl Demo {
    fn update(&mut self, dt: f32) -> Result<(), GameError> {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self
                .sim
                .world()
                .map(|world| self.pilot.input(world.paddle.pos.x, world.ball.pos.x))
                .unwrap_or_default();
            self.sim.host_mut().input = input;
            self.sim.frame(SIM_DT)?;
            self.sim.host_mut().advance(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        Ok(())
    }

    /// Play until the session ends or the frame budget runs out
    fn play_round(&mut self, round: u32) -> Result<Option<Outcome>, GameError> {
        for _ in 0..MAX_FRAMES_PER_ROUND {
            let dt = self.pilot.frame_time();
            self.update(dt)?;
            if let Some(outcome) = self.sim.state().outcome() {
                let bricks = self.sim.world().map_or(0, |w| w.bricks_remaining());
                log::info!(
                    "Round {} ended: {:?} ({} lives, {} bricks left)",
                    round,
                    outcome,
                    self.sim.state().lives,
                    bricks
                );
                return Ok(Some(outcome));
            }
        }
        log::warn!("Round {} hit the frame limit", round);
        Ok(None)
    }
}

fn run(args: Args) -> Result<(), GameError> {
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    log::info!("Brickbreak starting with seed {}", args.seed);

    let mut demo = Demo {
        sim: Simulation::new(settings, HeadlessHost::new()),
        pilot: Autopilot::new(args.seed),
        accumulator: 0.0,
    };

    let mut wins = 0;
    for round in 1..=args.rounds {
        if round > 1 && !demo.sim.host().click_reload() {
            log::warn!("Reload is not wired up");
            break;
        }
        if demo.play_round(round)? == Some(Outcome::Won) {
            wins += 1;
        }
    }
    log::info!("Won {} of {} rounds", wins, args.rounds);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
