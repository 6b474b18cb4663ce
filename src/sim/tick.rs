//! Fixed step simulation tick
//!
//! Projectiles move a fixed distance per tick regardless of frame time, so a
//! replay of the same commands against the same seed is identical.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{bounce, intersects};
use super::rect::OrientedRect;
use super::state::{GameState, Player, Projectile, Target, Wall};
use crate::error::LevelError;
use crate::input::{Command, InputSource};
use crate::normalize_l1;
use crate::settings::Settings;

/// What happened during one step of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing notable, keep going
    Continue,
    /// A projectile reached the target and a new level was generated
    LevelWon { levels_beaten: u32 },
    /// The player asked to leave
    Quit,
}

/// Apply a frame's commands and advance the simulation one step
///
/// Commands are drained in order until the source is empty. A `Quit` returns
/// immediately and leaves any later commands in the source. The win is not
/// checked here: the caller renders the frame first, then calls
/// [`finish_frame`].
pub fn tick(state: &mut GameState, input: &mut impl InputSource) -> Result<TickOutcome, LevelError> {
    while let Some(command) = input.poll() {
        match command {
            Command::Quit => {
                log::info!("Quit requested after {} ticks", state.time_ticks);
                return Ok(TickOutcome::Quit);
            }
            Command::Restart => {
                log::info!("Restart requested");
                state.start_new_game()?;
            }
            Command::Fire { x, y } => {
                state.player_fire(x as f64, y as f64);
            }
        }
    }

    state.update_state();
    state.time_ticks += 1;
    Ok(TickOutcome::Continue)
}

/// Close out a rendered frame: on a win, count it and start the next level
pub fn finish_frame(state: &mut GameState) -> Result<TickOutcome, LevelError> {
    if !state.check_game_won() {
        return Ok(TickOutcome::Continue);
    }

    state.start_new_game()?;
    state.levels_beaten += 1;
    log::info!("Beat level! Levels beaten: {}", state.levels_beaten);
    Ok(TickOutcome::LevelWon {
        levels_beaten: state.levels_beaten,
    })
}

/// Move one projectile by `delta`, bouncing off screen edges and walls
///
/// Screen edges are checked independently (a corner can trigger two), then
/// every overlapping wall is applied in order, then the position advances.
pub fn advance(
    projectile: &mut Projectile,
    delta: f64,
    walls: &[Wall],
    screen_width: f64,
    screen_height: f64,
) {
    let half = projectile.half_side();
    let mut pos = projectile.body.center();

    if pos.x < half {
        pos.x = 2.0 * half - pos.x;
        projectile.vel.x = -projectile.vel.x;
        projectile.collisions += 1;
    }
    if pos.y < half {
        pos.y = 2.0 * half - pos.y;
        projectile.vel.y = -projectile.vel.y;
        projectile.collisions += 1;
    }
    if pos.x > screen_width - half {
        pos.x = 2.0 * (screen_width - half) - pos.x;
        projectile.vel.x = -projectile.vel.x;
        projectile.collisions += 1;
    }
    if pos.y > screen_height - half {
        pos.y = 2.0 * (screen_height - half) - pos.y;
        projectile.vel.y = -projectile.vel.y;
        projectile.collisions += 1;
    }
    projectile.body.set_center(pos);

    // Simultaneous hits are resolved one wall at a time
    for wall in walls {
        if intersects(&projectile.body, &wall.body) {
            let reflected = bounce(&projectile.body, &wall.body, projectile.vel);
            projectile.vel = normalize_l1(reflected).unwrap_or(-projectile.vel);
            projectile.collisions += 1;
        }
    }

    projectile
        .body
        .set_center(projectile.body.center() + delta * projectile.vel);
}

/// Advance every projectile one step and remove the expired ones
pub fn update_projectiles(state: &mut GameState) {
    let settings = state.settings();
    let delta = settings.step_distance;
    let width = settings.screen_width as f64;
    let height = settings.screen_height as f64;
    let budget = settings.wall_count;

    for projectile in &mut state.projectiles {
        advance(projectile, delta, &state.walls, width, height);
    }

    let before = state.projectiles.len();
    state.projectiles.retain(|p| !p.is_expired(budget));
    let expired = before - state.projectiles.len();
    if expired > 0 {
        log::debug!("{expired} projectile(s) expired, {} live", state.projectiles.len());
    }
}

/// Uniform random pixel position on screen (edges included)
fn random_point(rng: &mut Pcg32, settings: &Settings) -> DVec2 {
    DVec2::new(
        rng.random_range(0..=settings.screen_width) as f64,
        rng.random_range(0..=settings.screen_height) as f64,
    )
}

/// Draw one wall candidate: random center, width and angle in [0, 180)
pub fn random_wall(rng: &mut Pcg32, settings: &Settings) -> Wall {
    let center = random_point(rng, settings);
    let width = rng.random_range(1..=settings.screen_width) as f64;
    let angle = rng.random_range(0..180) as f64;
    Wall::new(
        settings.sprites.wall,
        center,
        width,
        settings.wall_thickness,
        angle,
    )
}

/// Draw wall candidates until one clears every obstacle
///
/// Returns the wall and the number of draws it took, or `None` once
/// `settings.max_placement_attempts` draws have all been rejected.
pub fn place_wall(
    rng: &mut Pcg32,
    settings: &Settings,
    obstacles: &[OrientedRect],
) -> Option<(Wall, u32)> {
    (1..=settings.max_placement_attempts).find_map(|attempt| {
        let candidate = random_wall(rng, settings);
        let clear = !obstacles.iter().any(|o| intersects(&candidate.body, o));
        clear.then_some((candidate, attempt))
    })
}

/// Draw target positions until one clears the player
fn place_target(rng: &mut Pcg32, settings: &Settings, player: &Player) -> Option<Target> {
    (0..settings.max_placement_attempts).find_map(|_| {
        let candidate = Target::new(
            settings.sprites.target,
            random_point(rng, settings),
            settings.target_side,
        );
        (!intersects(&candidate.body, &player.body)).then_some(candidate)
    })
}

/// A complete level layout, not yet installed in a [`GameState`]
struct Layout {
    player: Player,
    target: Target,
    walls: Vec<Wall>,
    /// Candidate draws spent on walls
    draws: u64,
}

/// Lay out the player, the target clear of the player, then `wall_count`
/// walls clear of everything placed before them
fn layout_level(rng: &mut Pcg32, settings: &Settings) -> Result<Layout, LevelError> {
    let center = random_point(rng, settings);
    let player = Player::new(settings.sprites.player, center, settings.player_side);
    let target = place_target(rng, settings, &player).ok_or(LevelError::TargetPlacement {
        attempts: settings.max_placement_attempts,
    })?;

    let mut occupied = Vec::with_capacity(2 + settings.wall_count as usize);
    occupied.push(player.body);
    occupied.push(target.body);

    let mut walls = Vec::with_capacity(settings.wall_count as usize);
    let mut draws = 0u64;
    for placed in 0..settings.wall_count {
        let (wall, attempts) =
            place_wall(rng, settings, &occupied).ok_or(LevelError::WallPlacement {
                placed,
                requested: settings.wall_count,
                attempts: settings.max_placement_attempts,
            })?;
        draws += attempts as u64;
        occupied.push(wall.body);
        walls.push(wall);
    }

    Ok(Layout {
        player,
        target,
        walls,
        draws,
    })
}

/// Generate a new level by rejection sampling
///
/// The new layout replaces the player, target and walls only once every body
/// has been placed; live projectiles are discarded at the same time. On
/// failure the state is left exactly as it was, apart from the RNG having
/// advanced.
pub fn generate_level(state: &mut GameState) -> Result<(), LevelError> {
    let settings = state.settings().clone();
    let level = state.level + 1;

    let layout = layout_level(&mut state.rng, &settings).inspect_err(|err| {
        log::warn!("Level {level}: {err}");
    })?;

    state.player = layout.player;
    state.target = layout.target;
    state.walls = layout.walls;
    state.projectiles.clear();
    state.level = level;

    log::info!(
        "Level {level}: player at {}, target at {}, {} walls in {} draws",
        state.player.body.center(),
        state.target.body.center(),
        state.walls.len(),
        layout.draws
    );
    Ok(())
}
