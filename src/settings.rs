//! Tuning configuration
//!
//! Every gameplay constant lives here so levels can be retuned from a RON
//! file without recompiling. All fields default to the values the game
//! ships with, so a settings file only needs the keys it overrides.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings loading
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Fox movement parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Horizontal speed while grounded (px/s)
    pub ground_speed: f32,
    /// Horizontal speed while airborne (px/s), lower for reduced air control
    pub air_speed: f32,
    /// Upward impulse applied by a jump or double jump (px/s)
    pub jump_power: f32,
    /// Horizontal drag applied by the body when no input is held
    pub drag: f32,
    /// Hit box size, anchored bottom-centre
    pub body_size: Vec2,
    /// Horizontal speed above which the run animation plays instead of idle
    pub run_threshold: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            ground_speed: 400.0,
            air_speed: 300.0,
            jump_power: 600.0,
            drag: 600.0,
            body_size: Vec2::new(60.0, 100.0),
            run_threshold: 4.0,
        }
    }
}

/// Mouse patrol and aggro parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    /// Patrol speed (px/s)
    pub speed: f32,
    pub drag: f32,
    pub body_size: Vec2,
    /// Patrol steps taken before turning around
    pub patrol_step_limit: u32,
    /// Distance below which the mouse stops to swing at the fox
    pub aggro_radius: f32,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            speed: 200.0,
            drag: 600.0,
            body_size: Vec2::new(60.0, 80.0),
            patrol_step_limit: 90,
            aggro_radius: 210.0,
        }
    }
}

/// Level-wide physics and pickup parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Downward acceleration handed to the physics backend (px/s²)
    pub gravity: f32,
    pub coin_size: Vec2,
    pub door_size: Vec2,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: 800.0,
            coin_size: Vec2::new(32.0, 32.0),
            door_size: Vec2::new(64.0, 96.0),
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub player: PlayerSettings,
    pub enemy: EnemySettings,
    pub world: WorldSettings,
    /// Level the game session starts on
    pub first_level: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            player: PlayerSettings::default(),
            enemy: EnemySettings::default(),
            world: WorldSettings::default(),
            first_level: "level1".to_string(),
        }
    }
}

fn check_positive(name: &str, value: f32) -> Result<(), SettingsError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SettingsError::Invalid(format!("{} must be positive, got {}", name, value)));
    }
    Ok(())
}

fn check_size(name: &str, size: Vec2) -> Result<(), SettingsError> {
    check_positive(&format!("{}.x", name), size.x)?;
    check_positive(&format!("{}.y", name), size.y)
}

impl GameSettings {
    /// Parse settings from RON text and validate them
    pub fn from_ron_str(source: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings = ron::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the controllers cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let p = &self.player;
        check_positive("player.ground_speed", p.ground_speed)?;
        check_positive("player.air_speed", p.air_speed)?;
        check_positive("player.jump_power", p.jump_power)?;
        check_positive("player.drag", p.drag)?;
        check_size("player.body_size", p.body_size)?;
        if !p.run_threshold.is_finite() || p.run_threshold < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "player.run_threshold must be non-negative, got {}", p.run_threshold
            )));
        }

        let e = &self.enemy;
        check_positive("enemy.speed", e.speed)?;
        check_positive("enemy.drag", e.drag)?;
        check_size("enemy.body_size", e.body_size)?;
        check_positive("enemy.aggro_radius", e.aggro_radius)?;
        if e.patrol_step_limit == 0 {
            return Err(SettingsError::Invalid(
                "enemy.patrol_step_limit must be at least 1".to_string(),
            ));
        }

        let w = &self.world;
        check_positive("world.gravity", w.gravity)?;
        check_size("world.coin_size", w.coin_size)?;
        check_size("world.door_size", w.door_size)?;

        if self.first_level.is_empty() {
            return Err(SettingsError::Invalid("first_level must name a level".to_string()));
        }
        Ok(())
    }
}

/// Load settings from a RON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<GameSettings, SettingsError> {
    let contents = fs::read_to_string(path.as_ref())?;
    GameSettings::from_ron_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_tuning() {
        let settings = GameSettings::default();
        assert_eq!(settings.player.ground_speed, 400.0);
        assert_eq!(settings.player.air_speed, 300.0);
        assert_eq!(settings.player.jump_power, 600.0);
        assert_eq!(settings.enemy.patrol_step_limit, 90);
        assert_eq!(settings.enemy.aggro_radius, 210.0);
        assert_eq!(settings.world.gravity, 800.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_shipped_settings_file() {
        let settings = GameSettings::from_ron_str(include_str!("../assets/settings.ron")).unwrap();
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = GameSettings::from_ron_str("(enemy: (aggro_radius: 150.0))").unwrap();
        assert_eq!(settings.enemy.aggro_radius, 150.0);
        assert_eq!(settings.enemy.speed, 200.0);
        assert_eq!(settings.player, PlayerSettings::default());
    }

    #[test]
    fn test_rejects_zero_step_limit() {
        let err = GameSettings::from_ron_str("(enemy: (patrol_step_limit: 0))").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let err = GameSettings::from_ron_str("(player: (air_speed: -1.0))").unwrap_err();
        assert!(err.to_string().contains("player.air_speed"));
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "(first_level: \"intro\", world: (gravity: 900.0))").unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.first_level, "intro");
        assert_eq!(settings.world.gravity, 900.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
