//! Game settings
//!
//! Fixed at construction; a running level never re-reads them. Loaded from a
//! JSON file on disk, with every field optional.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::render::SpriteId;

/// Sprite handles for each kind of body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sprites {
    pub player: SpriteId,
    pub target: SpriteId,
    pub wall: SpriteId,
    pub projectile: SpriteId,
}

impl Default for Sprites {
    fn default() -> Self {
        Self {
            player: SpriteId(0),
            target: SpriteId(1),
            wall: SpriteId(2),
            projectile: SpriteId(3),
        }
    }
}

/// Level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    // === Arena ===
    /// Screen width (pixels)
    pub screen_width: u32,
    /// Screen height (pixels)
    pub screen_height: u32,
    /// Walls per level; also the bounce budget of each projectile
    pub wall_count: u32,

    // === Bodies ===
    pub player_side: f64,
    pub target_side: f64,
    pub projectile_side: f64,
    /// Fixed wall length (the short side)
    pub wall_thickness: f64,

    // === Motion ===
    /// Distance a projectile moves per tick
    pub step_distance: f64,

    // === Generation ===
    /// Candidate draws per wall before giving up on a level
    pub max_placement_attempts: u32,
    /// Fixed RNG seed; fresh entropy when absent
    pub seed: Option<u64>,

    pub sprites: Sprites,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            wall_count: DEFAULT_WALLS,

            player_side: PLAYER_SIDE,
            target_side: TARGET_SIDE,
            projectile_side: PROJECTILE_SIDE,
            wall_thickness: WALL_THICKNESS,

            step_distance: STEP_DISTANCE,

            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            seed: None,

            sprites: Sprites::default(),
        }
    }
}

impl Settings {
    /// Default settings with a different wall count
    pub fn with_walls(wall_count: u32) -> Self {
        Self {
            wall_count,
            ..Self::default()
        }
    }

    /// Parse settings from JSON text and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check ranges that the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(invalid("screen_width", "screen must be at least 1x1 pixels"));
        }
        if !(MIN_WALLS..=MAX_WALLS).contains(&self.wall_count) {
            return Err(invalid(
                "wall_count",
                format!("must be between {MIN_WALLS} and {MAX_WALLS}, got {}", self.wall_count),
            ));
        }
        for (field, value) in [
            ("player_side", self.player_side),
            ("target_side", self.target_side),
            ("projectile_side", self.projectile_side),
            ("wall_thickness", self.wall_thickness),
            ("step_distance", self.step_distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be a positive number, got {value}")));
            }
        }
        if self.max_placement_attempts == 0 {
            return Err(invalid("max_placement_attempts", "must allow at least one attempt"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.screen_width, 640);
        assert_eq!(settings.screen_height, 480);
        assert_eq!(settings.sprites.projectile, SpriteId(3));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "wall_count": 8, "seed": 42 }"#).unwrap();
        assert_eq!(settings.wall_count, 8);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.step_distance, STEP_DISTANCE);
        assert_eq!(settings.sprites, Sprites::default());
    }

    #[test]
    fn test_nested_sprites() {
        let settings = Settings::from_json(r#"{ "sprites": { "wall": 9 } }"#).unwrap();
        assert_eq!(settings.sprites.wall, SpriteId(9));
        assert_eq!(settings.sprites.player, SpriteId(0));
    }

    #[test]
    fn test_wall_count_range() {
        assert!(Settings::with_walls(0).validate().is_err());
        assert!(Settings::with_walls(1).validate().is_ok());
        assert!(Settings::with_walls(10).validate().is_ok());
        assert!(matches!(
            Settings::with_walls(11).validate(),
            Err(SettingsError::Invalid { field: "wall_count", .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let settings = Settings {
            projectile_side: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "projectile_side", .. })
        ));

        let settings = Settings {
            step_distance: f64::NAN,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            Settings::from_json(r#"{ "walls": 3 }"#),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here/deflection.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(7),
            ..Settings::with_walls(3)
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
