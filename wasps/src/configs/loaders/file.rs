use std::{fs, path::Path};

/// Reads a seed document from disk. Content is returned verbatim.
pub fn load(path: &Path) -> Result<String, String> {
    if path.is_dir() {
        return Err(format!("Seed path '{}' is a directory", path.display()));
    }
    fs::read_to_string(path)
        .map_err(|e| format!("Cannot read seed file '{}': {}", path.display(), e))
}
