//! Game state and core simulation types
//!
//! Player, target and walls are fixed for the lifetime of a level. Only
//! projectiles move.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::intersects;
use super::rect::OrientedRect;
use super::tick;
use crate::error::{GameError, LevelError};
use crate::normalize_l1;
use crate::render::{Drawable, SpriteId};
use crate::settings::Settings;

/// The emitter the player fires from (axis-aligned square)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: OrientedRect,
}

impl Player {
    pub fn new(sprite: SpriteId, center: DVec2, side: f64) -> Self {
        Self {
            body: OrientedRect::square(sprite, center, side),
        }
    }

    /// Launch a projectile from the emitter's center toward `aim`
    ///
    /// Returns `None` when `aim` is the emitter's own center, since there is
    /// no direction to fire in.
    pub fn fire(&self, aim: DVec2, sprite: SpriteId, side: f64) -> Option<Projectile> {
        let origin = self.body.center();
        let vel = normalize_l1(aim - origin)?;
        Some(Projectile::new(sprite, origin, vel, side))
    }
}

/// The square the player is trying to hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub body: OrientedRect,
}

impl Target {
    pub fn new(sprite: SpriteId, center: DVec2, side: f64) -> Self {
        Self {
            body: OrientedRect::square(sprite, center, side),
        }
    }
}

/// A rotated obstacle projectiles bounce off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub body: OrientedRect,
}

impl Wall {
    pub fn new(sprite: SpriteId, center: DVec2, width: f64, thickness: f64, angle: f64) -> Self {
        Self {
            body: OrientedRect::new(sprite, center, width, thickness, angle),
        }
    }
}

/// A bouncing square fired by the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: OrientedRect,
    /// Direction of travel, `|x| + |y| == 1`
    pub vel: DVec2,
    /// Screen edges and walls hit so far
    pub collisions: u32,
}

impl Projectile {
    pub fn new(sprite: SpriteId, center: DVec2, vel: DVec2, side: f64) -> Self {
        Self {
            body: OrientedRect::square(sprite, center, side),
            vel,
            collisions: 0,
        }
    }

    /// Half the side length
    #[inline]
    pub fn half_side(&self) -> f64 {
        self.body.width() / 2.0
    }

    /// True once the projectile has used up its bounce budget
    #[inline]
    pub fn is_expired(&self, budget: u32) -> bool {
        self.collisions > budget
    }
}

/// Complete level state
#[derive(Debug, Clone)]
pub struct GameState {
    settings: Settings,
    /// Seed the level RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub player: Player,
    pub target: Target,
    /// Placement order is preserved; bounces are applied in this order
    pub walls: Vec<Wall>,
    /// Firing order is preserved
    pub projectiles: Vec<Projectile>,
    /// Levels generated so far, including the current one
    pub level: u32,
    /// Levels won across the whole session (restarts do not reset it)
    pub levels_beaten: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a state and generate its first level
    ///
    /// Settings are validated first. Uses `settings.seed` when present,
    /// otherwise a fresh random seed.
    pub fn new(settings: Settings) -> Result<Self, GameError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        let sprites = settings.sprites;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(sprites.player, DVec2::ZERO, settings.player_side),
            target: Target::new(sprites.target, DVec2::ZERO, settings.target_side),
            walls: Vec::with_capacity(settings.wall_count as usize),
            projectiles: Vec::new(),
            level: 0,
            levels_beaten: 0,
            time_ticks: 0,
            settings,
        };
        log::info!("Starting session with seed {seed}");

        state.start_new_game()?;
        Ok(state)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[cfg(test)]
    pub(crate) fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Discard the current level and generate a fresh one
    pub fn start_new_game(&mut self) -> Result<(), LevelError> {
        tick::generate_level(self)
    }

    /// Fire from the player toward screen position (x, y)
    ///
    /// Returns false when nothing was fired (aiming at the emitter's center).
    pub fn player_fire(&mut self, x: f64, y: f64) -> bool {
        let fired = self.player.fire(
            DVec2::new(x, y),
            self.settings.sprites.projectile,
            self.settings.projectile_side,
        );
        match fired {
            Some(projectile) => {
                log::debug!("Fired toward ({x}, {y}) with velocity {}", projectile.vel);
                self.projectiles.push(projectile);
                true
            }
            None => {
                log::debug!("Ignored fire at the emitter's own center");
                false
            }
        }
    }

    /// Advance every projectile one tick and drop expired ones
    pub fn update_state(&mut self) {
        tick::update_projectiles(self);
    }

    /// True if any live projectile touches the target
    pub fn check_game_won(&self) -> bool {
        self.projectiles
            .iter()
            .any(|p| intersects(&p.body, &self.target.body))
    }

    /// Player, target, walls, then projectiles
    pub fn renderables(&self) -> Vec<Drawable> {
        let mut out = Vec::with_capacity(2 + self.walls.len() + self.projectiles.len());
        out.push(self.player.body.to_drawable());
        out.push(self.target.body.to_drawable());
        out.extend(self.walls.iter().map(|w| w.body.to_drawable()));
        out.extend(self.projectiles.iter().map(|p| p.body.to_drawable()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SettingsError;

    fn seeded(wall_count: u32) -> GameState {
        let settings = Settings {
            seed: Some(12345),
            ..Settings::with_walls(wall_count)
        };
        GameState::new(settings).unwrap()
    }

    #[test]
    fn test_new_generates_level() {
        let state = seeded(4);
        assert_eq!(state.walls.len(), 4);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.level, 1);
        assert_eq!(state.seed, 12345);
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = Settings {
            screen_width: 0,
            seed: Some(1),
            ..Settings::default()
        };
        assert!(matches!(
            GameState::new(settings),
            Err(GameError::Settings(SettingsError::Invalid { field: "screen_width", .. }))
        ));

        assert!(matches!(
            GameState::new(Settings::with_walls(11)),
            Err(GameError::Settings(SettingsError::Invalid { field: "wall_count", .. }))
        ));
    }

    #[test]
    fn test_fire_normalizes_direction() {
        let mut state = seeded(1);
        state.player = Player::new(SpriteId(0), DVec2::new(100.0, 100.0), 30.0);

        assert!(state.player_fire(130.0, 60.0));
        let p = &state.projectiles[0];
        assert_eq!(p.body.center(), DVec2::new(100.0, 100.0));
        assert!((p.vel.x - 30.0 / 70.0).abs() < 1e-12);
        assert!((p.vel.y + 40.0 / 70.0).abs() < 1e-12);
        assert_eq!(p.collisions, 0);
        assert_eq!(p.body.width(), state.settings().projectile_side);
        assert_eq!(p.body.sprite(), state.settings().sprites.projectile);
    }

    #[test]
    fn test_fire_at_own_center_does_nothing() {
        let mut state = seeded(1);
        state.player = Player::new(SpriteId(0), DVec2::new(50.0, 60.0), 30.0);
        assert!(!state.player_fire(50.0, 60.0));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_fire_appends_in_order() {
        let mut state = seeded(1);
        state.player = Player::new(SpriteId(0), DVec2::new(50.0, 50.0), 30.0);
        state.player_fire(100.0, 50.0);
        state.player_fire(50.0, 0.0);
        assert_eq!(state.projectiles.len(), 2);
        assert_eq!(state.projectiles[0].vel, DVec2::new(1.0, 0.0));
        assert_eq!(state.projectiles[1].vel, DVec2::new(0.0, -1.0));
    }

    #[test]
    fn test_win_detection() {
        let mut state = seeded(1);
        state.target = Target::new(SpriteId(1), DVec2::new(100.0, 100.0), 20.0);
        state.projectiles = vec![Projectile::new(
            SpriteId(3),
            DVec2::new(100.0, 100.0),
            DVec2::new(1.0, 0.0),
            10.0,
        )];
        assert!(state.check_game_won());

        state.projectiles[0].body.set_center(DVec2::new(500.0, 500.0));
        assert!(!state.check_game_won());
    }

    #[test]
    fn test_win_with_any_projectile() {
        let mut state = seeded(1);
        state.target = Target::new(SpriteId(1), DVec2::new(100.0, 100.0), 20.0);
        let hit = Projectile::new(SpriteId(3), DVec2::new(105.0, 95.0), DVec2::X, 10.0);
        let miss = Projectile::new(SpriteId(3), DVec2::new(400.0, 300.0), DVec2::X, 10.0);
        // The hitting projectile is not the last one
        state.projectiles = vec![hit, miss];
        assert!(state.check_game_won());
    }

    #[test]
    fn test_no_projectiles_no_win() {
        let state = seeded(2);
        assert!(!state.check_game_won());
    }

    #[test]
    fn test_renderables_order() {
        let mut state = seeded(3);
        state.player = Player::new(SpriteId(0), DVec2::new(200.0, 200.0), 30.0);
        state.player_fire(300.0, 200.0);

        let frame = state.renderables();
        assert_eq!(frame.len(), 2 + 3 + 1);
        assert_eq!(frame[0], state.player.body.to_drawable());
        assert_eq!(frame[1], state.target.body.to_drawable());
        for (drawable, wall) in frame[2..5].iter().zip(&state.walls) {
            assert_eq!(*drawable, wall.body.to_drawable());
        }
        assert_eq!(frame[5].sprite, state.settings().sprites.projectile);
        assert_eq!((frame[5].x, frame[5].y), (195, 195));
    }

    #[test]
    fn test_projectile_expiry_threshold() {
        let mut p = Projectile::new(SpriteId(3), DVec2::ZERO, DVec2::X, 10.0);
        p.collisions = 5;
        assert!(!p.is_expired(5));
        p.collisions = 6;
        assert!(p.is_expired(5));
    }
}
