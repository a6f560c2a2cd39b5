//! Build script to embed the bundled level files
//!
//! Scans assets/levels/ and generates a table of (name, contents) pairs
//! so the library can ship its levels without touching the filesystem
//! at runtime.

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=assets/levels");

    let levels_dir = Path::new("assets/levels");
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let out_path = Path::new(&out_dir).join("bundled_levels.rs");

    let mut names: Vec<String> = Vec::new();

    if levels_dir.exists() {
        let mut entries: Vec<_> = fs::read_dir(levels_dir)
            .expect("assets/levels is readable")
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext.to_ascii_lowercase() == "ron")
                    .unwrap_or(false)
            })
            .collect();

        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().to_string());
            }
        }
    }

    let mut source = String::from("pub const BUNDLED_LEVELS: &[(&str, &str)] = &[\n");
    for name in &names {
        source.push_str(&format!(
            "    ({:?}, include_str!(concat!(env!(\"CARGO_MANIFEST_DIR\"), \"/assets/levels/{}.ron\"))),\n",
            name, name
        ));
    }
    source.push_str("];\n");

    fs::write(&out_path, source).expect("bundled level table is writable");
}
