//! Native wrapper generator library
//!
//! Generates typed Rust wrappers from the declarations in
//! `natives/include/<side>/*.rs` into `natives/src/<side>.rs`.

pub mod generators;
pub mod model;
pub mod parser;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Declaration root, relative to the workspace root
pub const INCLUDE_DIR: &str = "natives/include";

/// Sides with declarations (subdirectories of `natives/include`)
pub fn get_sides(workspace_root: &Path) -> Result<Vec<String>> {
    let include_dir = workspace_root.join(INCLUDE_DIR);

    let mut sides = Vec::new();
    for entry in std::fs::read_dir(&include_dir)
        .with_context(|| format!("Failed to read {}", include_dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            sides.push(entry.file_name().to_string_lossy().to_string());
        }
    }

    sides.sort();
    Ok(sides)
}

fn source_dir(workspace_root: &Path, side: &str) -> PathBuf {
    workspace_root.join(INCLUDE_DIR).join(side)
}

/// Path of the generated wrapper module for `side`.
pub fn output_path(workspace_root: &Path, side: &str) -> PathBuf {
    workspace_root
        .join("natives/src")
        .join(format!("{}.rs", side))
}

/// Parse the declarations and render the wrapper module for `side`.
pub fn render_side(workspace_root: &Path, side: &str) -> Result<String> {
    let model = parser::parse_native_dir(source_dir(workspace_root, side))
        .with_context(|| format!("Failed to parse declarations for '{}'", side))?;

    tracing::info!(
        side,
        natives = model.natives.len(),
        categories = model.categories.len(),
        "parsed declarations"
    );

    generators::rust::generate_rust_wrappers(&model, side)
        .with_context(|| format!("Failed to generate wrappers for '{}'", side))
}

/// Generate and write the wrapper module for `side`.
pub fn generate_for_side(workspace_root: &Path, side: &str) -> Result<PathBuf> {
    let code = render_side(workspace_root, side)?;
    let output = output_path(workspace_root, side);

    std::fs::write(&output, code)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(path = %output.display(), "generated wrappers");

    Ok(output)
}

/// Check whether the checked-in wrapper module matches its declarations.
pub fn check_for_side(workspace_root: &Path, side: &str) -> Result<bool> {
    let fresh = render_side(workspace_root, side)?;
    let output = output_path(workspace_root, side);

    let existing = std::fs::read_to_string(&output)
        .with_context(|| format!("Failed to read {}", output.display()))?;

    let in_sync = fresh == existing;
    if in_sync {
        tracing::info!(path = %output.display(), "wrappers in sync");
    } else {
        tracing::warn!(path = %output.display(), "wrappers out of sync");
    }
    Ok(in_sync)
}

/// Parsed model for `side`, for listing.
pub fn model_for_side(workspace_root: &Path, side: &str) -> Result<model::NativeModel> {
    parser::parse_native_dir(source_dir(workspace_root, side))
}

/// Find the workspace root: the nearest ancestor with a Cargo.toml and
/// a `natives/include` directory.
pub fn find_workspace_root() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;

    loop {
        if current.join("Cargo.toml").exists() && current.join(INCLUDE_DIR).exists() {
            return Ok(current);
        }

        if !current.pop() {
            anyhow::bail!(
                "Could not find workspace root (no {} directory)",
                INCLUDE_DIR
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYERS: &str = r#"
        //! Player natives

        extern "C" {
            /// Gets the name of a player.
            #[native(0x00000000, 0x406b4b20)]
            pub fn get_player_name(player: &str) -> Ret<Str>;
        }
    "#;

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[workspace]\n").unwrap();
        std::fs::create_dir_all(dir.path().join("natives/include/server")).unwrap();
        std::fs::create_dir_all(dir.path().join("natives/src")).unwrap();
        let players = dir.path().join("natives/include/server/players.rs");
        std::fs::write(players, PLAYERS).unwrap();
        dir
    }

    #[test]
    fn test_get_sides() {
        let dir = workspace();
        std::fs::create_dir_all(dir.path().join("natives/include/client")).unwrap();
        assert_eq!(get_sides(dir.path()).unwrap(), ["client", "server"]);
    }

    #[test]
    fn test_generate_then_check() {
        let dir = workspace();
        let root = dir.path();

        let output = generate_for_side(root, "server").unwrap();
        assert_eq!(output, root.join("natives/src/server.rs"));

        let code = std::fs::read_to_string(&output).unwrap();
        let signature = "pub fn get_player_name(invoker: &Invoker, player: &str) \
                         -> Result<Option<String>, InvokeError>";
        assert!(code.contains(signature));
        assert!(check_for_side(root, "server").unwrap());
    }

    #[test]
    fn test_check_detects_stale_output() {
        let dir = workspace();
        let root = dir.path();
        generate_for_side(root, "server").unwrap();

        std::fs::write(
            root.join("natives/include/server/blips.rs"),
            r#"extern "C" { #[native(0, 0xfaa3d236)] pub fn delete_entity(entity: i32); }"#,
        )
        .unwrap();
        assert!(!check_for_side(root, "server").unwrap());
    }

    #[test]
    fn test_check_without_output_fails() {
        let dir = workspace();
        assert!(check_for_side(dir.path(), "server").is_err());
    }
}
