//! Level layout types
//!
//! A level is a tile grid plus a list of typed spawn points. Positions are
//! in pixels with y growing downward, matching the tile grid rows.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Inclusive range of tile ids that the physics backend treats as solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRange {
    pub first: u16,
    pub last: u16,
}

impl TileRange {
    pub fn new(first: u16, last: u16) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, id: u16) -> bool {
        id >= self.first && id <= self.last
    }
}

/// Row-major tile grid. Tile id 0 is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Edge length of one tile in pixels
    pub tile_size: f32,
    /// Tile ids, `width * height` entries
    pub data: Vec<u16>,
    /// Tile id ranges that block movement
    #[serde(default)]
    pub solid: Vec<TileRange>,
}

impl TileGrid {
    /// An all-empty grid
    pub fn empty(width: usize, height: usize, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            data: vec![0; width * height],
            solid: Vec::new(),
        }
    }

    /// Tile id at a grid cell, `None` outside the grid
    pub fn tile(&self, col: usize, row: usize) -> Option<u16> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Overwrite a tile id. Out-of-range cells are ignored.
    pub fn set_tile(&mut self, col: usize, row: usize, id: u16) {
        if col < self.width && row < self.height {
            if let Some(slot) = self.data.get_mut(row * self.width + col) {
                *slot = id;
            }
        }
    }

    pub fn is_solid_id(&self, id: u16) -> bool {
        self.solid.iter().any(|range| range.contains(id))
    }

    /// Cells outside the grid are not solid; the backend bounds the world.
    pub fn is_solid_at(&self, col: usize, row: usize) -> bool {
        self.tile(col, row).map(|id| self.is_solid_id(id)).unwrap_or(false)
    }

    /// Grid cell containing a pixel position
    pub fn cell_at(&self, position: Vec2) -> Option<(usize, usize)> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let col = (position.x / self.tile_size) as usize;
        let row = (position.y / self.tile_size) as usize;
        if col < self.width && row < self.height {
            Some((col, row))
        } else {
            None
        }
    }

    /// World size in pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }
}

/// What a spawn point creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnKind {
    /// The fox (exactly one per level)
    Player,
    /// A patrolling mouse
    Enemy,
    /// A coin pickup
    Coin,
    /// A door leading to another level
    Door,
}

/// A typed, positioned spawn marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub kind: SpawnKind,
    /// Bottom-centre of the spawned entity
    pub position: Vec2,
    /// Doors only: the level this door leads to
    #[serde(default)]
    pub target: Option<String>,
}

impl SpawnPoint {
    pub fn new(kind: SpawnKind, position: Vec2) -> Self {
        Self { kind, position, target: None }
    }

    pub fn door_to(position: Vec2, target: impl Into<String>) -> Self {
        Self {
            kind: SpawnKind::Door,
            position,
            target: Some(target.into()),
        }
    }
}

/// A complete playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    /// Level entered through a door with no explicit target
    #[serde(default)]
    pub next: Option<String>,
    pub tiles: TileGrid,
    #[serde(default)]
    pub spawns: Vec<SpawnPoint>,
}

impl LevelLayout {
    /// Spawn points of one kind, in file order
    pub fn spawns_of(&self, kind: SpawnKind) -> impl Iterator<Item = &SpawnPoint> {
        self.spawns.iter().filter(move |s| s.kind == kind)
    }

    /// The player spawn, if the layout has one
    pub fn player_spawn(&self) -> Option<&SpawnPoint> {
        self.spawns_of(SpawnKind::Player).next()
    }
}
