//! Glob-based scope matching, shared by owned-scope checks and `.intentignore`.

use globset::{Glob, GlobBuilder};
use std::path::Path;

use crate::error::Result;

/// Compile `pattern` with the semantics the policy file expects: `*` matches
/// a single path segment, `**` matches any number of segments, and leading
/// dots in a segment are matched like any other character.
pub fn compile(pattern: &str) -> Result<Glob> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?;
    Ok(glob)
}

/// True if `relative_path` (POSIX-separated, workspace-relative) matches any
/// of `patterns`.
pub fn matches_any(patterns: &[String], relative_path: &str) -> bool {
    patterns.iter().any(|pattern| {
        compile(pattern)
            .map(|g| g.compile_matcher().is_match(relative_path))
            .unwrap_or(false)
    })
}

/// Convert an absolute or mixed-separator path into a POSIX-separated path
/// relative to `workspace`. Paths outside the workspace are returned
/// unchanged (as their absolute POSIX form).
pub fn relativize(workspace: &Path, absolute: &Path) -> String {
    let relative = absolute.strip_prefix(workspace).unwrap_or(absolute);
    relative.to_string_lossy().replace('\\', "/")
}
