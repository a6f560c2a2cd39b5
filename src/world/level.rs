//! Level loading
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! Every loaded level is validated before it reaches a session: a level
//! that would only partially start (no player spawn, short tile data)
//! is rejected here.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use super::{LevelLayout, SpawnKind};

/// Validation limits to keep malformed files from exhausting memory
pub mod limits {
    /// Maximum grid dimension (width or height) in tiles
    pub const MAX_GRID_SIZE: usize = 4096;
    /// Maximum number of spawn points in one level
    pub const MAX_SPAWNS: usize = 4096;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// Error type for level loading
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("level '{0}' has no player spawn")]
    MissingPlayerSpawn(String),
    #[error("level '{level}' has {count} player spawns")]
    DuplicatePlayerSpawn { level: String, count: usize },
    #[error("unknown level '{0}'")]
    UnknownLevel(String),
}

/// Check if a float is valid (not NaN or Inf)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

/// Validate a parsed layout
pub fn validate_level(level: &LevelLayout) -> Result<(), LevelError> {
    let tiles = &level.tiles;

    if tiles.width == 0 || tiles.height == 0 {
        return Err(LevelError::Validation(format!(
            "{}: empty tile grid ({}x{})", level.name, tiles.width, tiles.height
        )));
    }
    if tiles.width > limits::MAX_GRID_SIZE || tiles.height > limits::MAX_GRID_SIZE {
        return Err(LevelError::Validation(format!(
            "{}: grid too large ({}x{} > {})",
            level.name, tiles.width, tiles.height, limits::MAX_GRID_SIZE
        )));
    }
    if tiles.data.len() != tiles.width * tiles.height {
        return Err(LevelError::Validation(format!(
            "{}: tile data length mismatch ({} != {}x{})",
            level.name, tiles.data.len(), tiles.width, tiles.height
        )));
    }
    if !is_valid_float(tiles.tile_size) || tiles.tile_size <= 0.0 {
        return Err(LevelError::Validation(format!(
            "{}: invalid tile size {}", level.name, tiles.tile_size
        )));
    }
    for (i, range) in tiles.solid.iter().enumerate() {
        if range.first > range.last {
            return Err(LevelError::Validation(format!(
                "{}: solid range[{}] is reversed ({} > {})",
                level.name, i, range.first, range.last
            )));
        }
    }

    if level.spawns.len() > limits::MAX_SPAWNS {
        return Err(LevelError::Validation(format!(
            "{}: too many spawns ({} > {})", level.name, level.spawns.len(), limits::MAX_SPAWNS
        )));
    }
    for (i, spawn) in level.spawns.iter().enumerate() {
        if !is_valid_float(spawn.position.x) || !is_valid_float(spawn.position.y) {
            return Err(LevelError::Validation(format!(
                "{}: spawn[{}] has invalid position ({}, {})",
                level.name, i, spawn.position.x, spawn.position.y
            )));
        }
        if spawn.target.is_some() && spawn.kind != SpawnKind::Door {
            warn!("{}: spawn[{}] ({:?}) has a target but is not a door", level.name, i, spawn.kind);
        }
    }

    match level.spawns_of(SpawnKind::Player).count() {
        0 => Err(LevelError::MissingPlayerSpawn(level.name.clone())),
        1 => Ok(()),
        count => Err(LevelError::DuplicatePlayerSpawn {
            level: level.name.clone(),
            count,
        }),
    }
}

/// Parse and validate a level from RON text
pub fn parse_level(contents: &str) -> Result<LevelLayout, LevelError> {
    let level: LevelLayout = ron::from_str(contents)?;
    validate_level(&level)?;
    debug!(
        "parsed level '{}' ({}x{} tiles, {} spawns)",
        level.name, level.tiles.width, level.tiles.height, level.spawns.len()
    );
    Ok(level)
}

/// Load a level from a RON file
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<LevelLayout, LevelError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_level(&contents).map_err(|e| {
        warn!("failed to load {}: {}", path.display(), e);
        e
    })
}

/// Serialize a level to pretty RON
pub fn serialize_level(level: &LevelLayout) -> Result<String, LevelError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(level, config)?)
}

/// Save a level to a RON file
pub fn save_level<P: AsRef<Path>>(level: &LevelLayout, path: P) -> Result<(), LevelError> {
    let contents = serialize_level(level)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{SpawnPoint, TileGrid, TileRange};
    use glam::Vec2;

    fn sample_level() -> LevelLayout {
        let mut tiles = TileGrid::empty(8, 4, 64.0);
        tiles.solid.push(TileRange::new(6, 25));
        for col in 0..8 {
            tiles.set_tile(col, 3, 6);
        }
        LevelLayout {
            name: "sample".to_string(),
            next: Some("level2".to_string()),
            tiles,
            spawns: vec![
                SpawnPoint::new(SpawnKind::Player, Vec2::new(64.0, 192.0)),
                SpawnPoint::new(SpawnKind::Enemy, Vec2::new(320.0, 192.0)),
                SpawnPoint::new(SpawnKind::Coin, Vec2::new(200.0, 150.0)),
                SpawnPoint::door_to(Vec2::new(480.0, 192.0), "level2"),
            ],
        }
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.ron");
        let level = sample_level();

        save_level(&level, &path).unwrap();
        let loaded = load_level(&path).unwrap();
        assert_eq!(loaded, level);
    }

    #[test]
    fn test_missing_player_spawn_is_fatal() {
        let mut level = sample_level();
        level.spawns.retain(|s| s.kind != SpawnKind::Player);

        let err = validate_level(&level).unwrap_err();
        assert!(matches!(err, LevelError::MissingPlayerSpawn(name) if name == "sample"));
    }

    #[test]
    fn test_two_player_spawns_rejected() {
        let mut level = sample_level();
        level.spawns.push(SpawnPoint::new(SpawnKind::Player, Vec2::new(0.0, 0.0)));

        let err = validate_level(&level).unwrap_err();
        assert!(matches!(err, LevelError::DuplicatePlayerSpawn { count: 2, .. }));
    }

    #[test]
    fn test_short_tile_data_rejected() {
        let mut level = sample_level();
        level.tiles.data.pop();
        assert!(matches!(validate_level(&level), Err(LevelError::Validation(_))));
    }

    #[test]
    fn test_nan_spawn_rejected() {
        let mut level = sample_level();
        level.spawns[1].position.x = f32::NAN;
        assert!(matches!(validate_level(&level), Err(LevelError::Validation(_))));
    }

    #[test]
    fn test_reversed_solid_range_rejected() {
        let mut level = sample_level();
        level.tiles.solid.push(TileRange::new(30, 10));
        assert!(matches!(validate_level(&level), Err(LevelError::Validation(_))));
    }

    #[test]
    fn test_parse_error_reported() {
        let err = parse_level("(name: \"broken\", tiles: ").unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }
}
