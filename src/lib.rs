//! Deflection - bounce a projectile through a field of rotated walls
//!
//! Core modules:
//! - `sim`: Geometry, collision, reflection and level state
//! - `input`: Discrete player commands and the queue that carries them
//! - `render`: Drawable snapshot handed to a rendering front end
//! - `settings`: Construction-time configuration
//! - `error`: Error types surfaced by the core

pub mod error;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{GameError, LevelError, SettingsError};
pub use input::{Command, CommandQueue, InputSource};
pub use render::{Drawable, Renderer, SpriteId};
pub use settings::{Settings, Sprites};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Default screen dimensions (pixels)
    pub const SCREEN_WIDTH: u32 = 640;
    pub const SCREEN_HEIGHT: u32 = 480;

    /// Accepted wall count range
    pub const MIN_WALLS: u32 = 1;
    pub const MAX_WALLS: u32 = 10;
    pub const DEFAULT_WALLS: u32 = 5;

    /// Body sizes (pixels)
    pub const PLAYER_SIDE: f64 = 30.0;
    pub const TARGET_SIDE: f64 = 20.0;
    pub const PROJECTILE_SIDE: f64 = 10.0;
    pub const WALL_THICKNESS: f64 = 10.0;

    /// Distance a projectile travels per tick
    pub const STEP_DISTANCE: f64 = 5.0;

    /// Candidate draws allowed per wall before level generation gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Lengths below this are treated as degenerate
    pub const EPSILON: f64 = 1e-9;
}

/// Scale `v` so that `|x| + |y| == 1`
///
/// Returns `None` for the zero vector.
#[inline]
pub fn normalize_l1(v: DVec2) -> Option<DVec2> {
    let total = v.x.abs() + v.y.abs();
    if total > 0.0 && total.is_finite() {
        Some(v / total)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_l1() {
        let v = normalize_l1(DVec2::new(3.0, -1.0)).unwrap();
        assert!((v.x - 0.75).abs() < 1e-12);
        assert!((v.y + 0.25).abs() < 1e-12);
        assert!((v.x.abs() + v.y.abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_l1_zero() {
        assert!(normalize_l1(DVec2::ZERO).is_none());
    }
}
