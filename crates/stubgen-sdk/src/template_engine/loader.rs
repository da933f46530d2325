//! Load override `.tera` files from a directory.

use std::path::Path;

use tera::Tera;

use super::EngineError;

/// Load all `.tera` files from a directory, registered by file name.
///
/// A directory with no `.tera` files yields an empty instance.
pub(crate) fn load_templates_from_dir(dir: &Path) -> Result<Tera, EngineError> {
    if !dir.is_dir() {
        return Err(EngineError::MissingDir(dir.to_path_buf()));
    }

    let glob_pattern = dir.join("*.tera").to_string_lossy().to_string();
    Tera::new(&glob_pattern).map_err(|e| EngineError::Load {
        origin: dir.display().to_string(),
        source: e,
    })
}
