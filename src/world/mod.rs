//! Level data
//!
//! Tile grids, typed spawn points and the sources that load them.

mod layout;
mod level;
mod library;

pub use layout::*;
pub use level::{
    limits, load_level, parse_level, save_level, serialize_level, validate_level, LevelError,
};
pub use library::{LevelDirectory, LevelLibrary, LevelSource};
