//! Potato Runner -- headless demo loop and application entry point.
//!
//! Architecture: the binary hosts the simulation exactly the way a windowed
//! build would, minus the renderer. Each frame runs the **fixed-timestep**
//! model (see `TimeState`):
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed accumulator
//!   2. `while should_step()` -- consume fixed-dt slices, one `World::tick` each
//!   3. Drain the tick's `WorldEvent`s into the log
//!
//! Input comes from a scripted autopilot (hold right, pulse the jump key)
//! instead of a keyboard; a real host forwards its key transitions through
//! the same `on_key_down`/`on_key_up` calls the autopilot uses here.

mod items;
mod level;
mod levels;
mod player;
#[cfg(test)]
mod replay;
mod score;
mod tuning;
mod world;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use potato_core::{GameKey, TimeState};

use level::load_levels_from_path;
use levels::builtin_levels;
use tuning::Tuning;
use world::{World, WorldEvent, WorldPhase};

const MAX_TICKS: u32 = 7200;
const JUMP_PULSE_PERIOD: u32 = 45;
const JUMP_PULSE_HOLD: u32 = 6;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tuning = Tuning::default();
    let defs = match std::env::args().nth(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            let defs = load_levels_from_path(&path, &tuning).unwrap_or_else(|err| {
                panic!("Failed to load initial levels '{}': {}", path.display(), err)
            });
            log::info!("Levels loaded: {} from {}", defs.len(), path.display());
            defs
        }
        None => builtin_levels(),
    };
    let mut world = World::new(tuning, &defs)
        .unwrap_or_else(|err| panic!("Failed to build world: {}", err));

    log::info!(
        "Potato Runner starting: {} levels, field {}x{}",
        defs.len(),
        world.field_size().x,
        world.field_size().y
    );

    // Autopilot: hold right for the whole run and pulse the jump key. That
    // is enough to exercise traps, deaths, respawns, and on a good run the
    // finish flags.
    world.on_key_down(GameKey::MoveRight);

    let mut time = TimeState::new();
    let mut ticks: u32 = 0;
    while world.phase() == WorldPhase::Running && ticks < MAX_TICKS {
        time.begin_frame();
        while time.should_step() && world.phase() == WorldPhase::Running && ticks < MAX_TICKS {
            ticks += 1;
            if ticks % JUMP_PULSE_PERIOD == 0 {
                world.on_key_down(GameKey::Jump);
            }
            if ticks % JUMP_PULSE_PERIOD == JUMP_PULSE_HOLD {
                world.on_key_up(GameKey::Jump);
            }
            for event in world.tick() {
                log_event(&event);
            }
            if ticks % 600 == 0 {
                let visible = world
                    .current_level()
                    .visible_items(world.field_size())
                    .count();
                log::info!(
                    "tick {ticks}: level {}, player at {:?} facing {:?}, {visible} items in view",
                    world.current_level_index(),
                    world.player().position,
                    world.player().facing
                );
            }
        }
        thread::sleep(Duration::from_millis(1));
    }

    println!(
        "Run ended after {ticks} ticks: {:?}, score {}, high score {}",
        world.phase(),
        world.player().score,
        world.high_score()
    );
}

fn log_event(event: &WorldEvent) {
    match event {
        WorldEvent::TrapSprung { position } => log::info!("Trap sprung at {position:?}"),
        WorldEvent::LifeLost { lives_left } => log::info!("Life lost; {lives_left} remaining"),
        WorldEvent::Respawned { position } => log::info!("Respawned at {position:?}"),
        WorldEvent::LevelFinished { level, score } => {
            log::info!("Level {level} finished, score {score}")
        }
        WorldEvent::LevelAdvanced { level } => log::info!("Now playing level {level}"),
        WorldEvent::RunComplete { score, new_high } => {
            log::info!("Run complete: score {score} (new high: {new_high})")
        }
        WorldEvent::GameOver { score, new_high } => {
            log::info!("Game over: score {score} (new high: {new_high})")
        }
    }
}
