//! Content checks for the fox platformer
//!
//! Usage:
//!   cargo xtask check-levels                 # Validate assets/levels/*.ron
//!   cargo xtask check-levels --dir other/    # Validate another level folder
//!   cargo xtask check-settings FILE          # Validate a settings file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use foxrun::world::{load_level, LevelLayout, SpawnKind};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Content checks for the fox platformer")]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every level file and the links between levels
    CheckLevels {
        /// Level folder (defaults to assets/levels)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Validate a settings file
    CheckSettings {
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    foxrun::logging::init(cli.verbose);

    match cli.command {
        Commands::CheckLevels { dir } => check_levels(dir),
        Commands::CheckSettings { file } => check_settings(&file),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Level files in a folder, sorted by name
fn level_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().map_or(false, |ext| ext == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Every level a layout can lead to, with where the link comes from
fn links(level: &LevelLayout) -> Vec<(String, &str)> {
    let mut out = Vec::new();
    if let Some(next) = &level.next {
        out.push(("next".to_string(), next.as_str()));
    }
    for (i, door) in level.spawns_of(SpawnKind::Door).enumerate() {
        if let Some(target) = &door.target {
            out.push((format!("door[{}]", i), target.as_str()));
        }
    }
    out
}

fn check_levels(dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => project_root()?.join("assets/levels"),
    };
    let files = level_files(&dir)?;
    if files.is_empty() {
        anyhow::bail!("No level files in {}", dir.display());
    }

    let mut levels = BTreeMap::new();
    let mut failures = 0;

    for path in &files {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
        match load_level(path) {
            Ok(level) => {
                if level.name != stem {
                    warn!(
                        "{}: level name '{}' does not match file name",
                        path.display(),
                        level.name
                    );
                }
                debug!("{}: {} spawns", path.display(), level.spawns.len());
                levels.insert(stem, level);
            }
            Err(e) => {
                println!("FAIL {}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    for (stem, level) in &levels {
        for (origin, target) in links(level) {
            if !levels.contains_key(target) {
                println!("FAIL {}: {} leads to unknown level '{}'", stem, origin, target);
                failures += 1;
            }
        }
        let coins = level.spawns_of(SpawnKind::Coin).count();
        let mice = level.spawns_of(SpawnKind::Enemy).count();
        let doors = level.spawns_of(SpawnKind::Door).count();
        if doors == 0 {
            warn!("{}: no door, the level cannot be finished", stem);
        }
        println!("ok   {} ({} coins, {} mice, {} doors)", stem, coins, mice, doors);
    }

    if failures > 0 {
        anyhow::bail!("{} level problem(s) in {}", failures, dir.display());
    }
    println!("{} level(s) checked", levels.len());
    Ok(())
}

fn check_settings(file: &Path) -> Result<()> {
    let settings = foxrun::settings::load_settings(file)
        .with_context(|| format!("Invalid settings in {}", file.display()))?;
    println!("ok   {} (first level '{}')", file.display(), settings.first_level);
    Ok(())
}
