//! Level sources
//!
//! A [`LevelSource`] resolves a level name to a validated layout. The game
//! session asks for levels by name when it starts and whenever the fox walks
//! through a door.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::level::{load_level, parse_level, validate_level, LevelError};
use super::LevelLayout;

mod bundled {
    include!(concat!(env!("OUT_DIR"), "/bundled_levels.rs"));
}

/// Something that can hand out levels by name
pub trait LevelSource {
    fn load(&mut self, name: &str) -> Result<LevelLayout, LevelError>;
}

/// Levels stored as `<root>/<name>.ron`
#[derive(Debug, Clone)]
pub struct LevelDirectory {
    root: PathBuf,
}

impl LevelDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File for a level name. `None` for names that would leave `root`.
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        let plain = !name.is_empty()
            && name != "."
            && !name.contains("..")
            && !name.contains(['/', '\\'])
            && !Path::new(name).is_absolute();
        plain.then(|| self.root.join(format!("{}.ron", name)))
    }
}

impl LevelSource for LevelDirectory {
    fn load(&mut self, name: &str) -> Result<LevelLayout, LevelError> {
        let path = match self.path_for(name) {
            Some(path) if path.exists() => path,
            Some(_) => return Err(LevelError::UnknownLevel(name.to_string())),
            None => {
                warn!("rejected level name '{}'", name);
                return Err(LevelError::UnknownLevel(name.to_string()));
            }
        };
        let level = load_level(&path)?;
        info!("loaded level '{}' from {}", name, path.display());
        Ok(level)
    }
}

/// In-memory level collection
#[derive(Debug, Clone, Default)]
pub struct LevelLibrary {
    levels: HashMap<String, LevelLayout>,
}

impl LevelLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The levels embedded from `assets/levels/` at build time
    pub fn bundled() -> Result<Self, LevelError> {
        let mut library = Self::new();
        for (file_name, contents) in bundled::BUNDLED_LEVELS {
            let level = parse_level(contents).map_err(|e| {
                LevelError::Validation(format!("bundled level '{}': {}", file_name, e))
            })?;
            library.levels.insert(file_name.to_string(), level);
        }
        Ok(library)
    }

    /// Add a level under its own name, replacing any previous one
    pub fn insert(&mut self, level: LevelLayout) -> Result<(), LevelError> {
        validate_level(&level)?;
        self.levels.insert(level.name.clone(), level);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.levels.contains_key(name)
    }

    /// Level names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.levels.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelSource for LevelLibrary {
    fn load(&mut self, name: &str) -> Result<LevelLayout, LevelError> {
        self.levels
            .get(name)
            .cloned()
            .ok_or_else(|| LevelError::UnknownLevel(name.to_string()))
    }
}
