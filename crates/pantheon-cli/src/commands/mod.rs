pub mod companions;
pub mod deck;
pub mod modifiers;
pub mod play;
pub mod rank;
pub mod ranks;
pub mod talents;
pub mod unlock;

use std::path::Path;

use pantheon_core::{Catalog, PlayerProgress};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Load the catalog at `path`, or the built-in sample catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, String> {
    match path {
        Some(path) => Catalog::load(path)
            .map_err(|e| format!("failed to load catalog {}: {e}", path.display())),
        None => Catalog::from_json_str(BUILTIN_CATALOG)
            .map_err(|e| format!("built-in catalog is invalid: {e}")),
    }
}

/// Read a profile file. A missing path means a fresh profile.
fn load_profile(path: Option<&Path>) -> Result<PlayerProgress, String> {
    let Some(path) = path else {
        return Ok(PlayerProgress::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read profile {}: {e}", path.display()))?;
    serde_json::from_str(&json)
        .map_err(|e| format!("invalid profile {}: {e}", path.display()))
}

/// Read a profile file that a command will write back, starting fresh if it
/// does not exist yet.
fn load_or_fresh_profile(path: &Path) -> Result<PlayerProgress, String> {
    if path.exists() {
        load_profile(Some(path))
    } else {
        log::info!("profile {} not found, starting fresh", path.display());
        Ok(PlayerProgress::default())
    }
}

/// Write a profile file as pretty JSON.
fn save_profile(path: &Path, progress: &PlayerProgress) -> Result<(), String> {
    let json = serde_json::to_string_pretty(progress).map_err(|e| e.to_string())?;
    std::fs::write(path, json)
        .map_err(|e| format!("failed to write profile {}: {e}", path.display()))
}

/// Yes/no marker for table cells.
fn mark(flag: bool) -> &'static str {
    if flag { "yes" } else { "-" }
}
