//! Deflection entry point
//!
//! Runs a headless autoplay session: the emitter fires at the target on a
//! fixed cadence and frames go to a logging renderer. Pass a JSON settings
//! file as the first argument to override the defaults; `RUST_LOG` controls
//! verbosity.

use std::error::Error;

use deflection::render::LogRenderer;
use deflection::sim::{GameState, TickOutcome, finish_frame, tick};
use deflection::{Command, CommandQueue, Renderer, Settings};

/// Frames to simulate before stopping
const FRAMES: u64 = 20_000;
/// Frames between autoplay shots
const FIRE_EVERY: u64 = 30;
/// Regenerate a level that has not been beaten in this many frames
const GIVE_UP_AFTER: u64 = 3_000;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Deflection (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut state = GameState::new(settings)?;
    let mut renderer = LogRenderer::new();
    let mut input = CommandQueue::new();
    let mut level_start = 0u64;

    for frame in 0..FRAMES {
        if frame - level_start >= GIVE_UP_AFTER {
            log::info!("Level {} unbeaten after {GIVE_UP_AFTER} frames, restarting", state.level);
            input.push(Command::Restart);
            level_start = frame;
        } else if frame % FIRE_EVERY == 0 {
            let aim = state.target.body.center();
            input.push(Command::Fire {
                x: aim.x.round() as i32,
                y: aim.y.round() as i32,
            });
        }

        if tick(&mut state, &mut input)? == TickOutcome::Quit {
            break;
        }

        renderer.present(&state.renderables())?;

        if let TickOutcome::LevelWon { levels_beaten } = finish_frame(&mut state)? {
            log::info!("Level won on frame {frame} ({levels_beaten} beaten)");
            level_start = frame;
        }
    }

    log::info!(
        "Session over: {} levels beaten in {} frames (seed {})",
        state.levels_beaten,
        renderer.frames(),
        state.seed
    );
    Ok(())
}
