//! Cross-platform path normalization for tool-call parameters.
//!
//! Tool parameters arrive as untrusted strings. Before a path is used in a
//! scope check or a fingerprint lookup it needs lexical cleanup: `./`, `../`
//! and repeated separators resolved away, and Windows UNC prefixes stripped
//! so the same relative path compares equal across platforms.

use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Clean and platform-normalize a path.
///
/// Uses `path-clean` for component normalization (`.`/`..`/double separators)
/// and `dunce::simplified` so a canonicalized Windows path doesn't carry a
/// `\\?\` prefix into a string comparison against a relative scope pattern.
pub fn normalize_path(path: &Path) -> PathBuf {
    let cleaned = path.clean();
    dunce::simplified(&cleaned).to_path_buf()
}
