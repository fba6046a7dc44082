//! Best-effort version-control probe. Every operation returns `None` on
//! failure instead of propagating an error. A missing or broken `git`
//! binary degrades the mediator's behavior, it never blocks it.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

use crate::config::VcsConfig;

/// Shells out to the `git` binary, bounded by a hard timeout.
#[derive(Debug, Clone, Copy)]
pub struct VcsProbe {
    timeout: Duration,
}

impl VcsProbe {
    pub fn new(config: &VcsConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.probe_timeout_ms),
        }
    }

    async fn run_git(&self, workspace: &Path, args: &[&str]) -> Option<String> {
        let future = Command::new("git")
            .arg("-C")
            .arg(workspace)
            .args(args)
            .output();

        let output = tokio::time::timeout(self.timeout, future).await.ok()?.ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8(output.stdout).ok()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Head commit identifier, or `None` if not a git repository / git
    /// missing / the probe timed out.
    pub async fn current_revision(&self, workspace: &Path) -> Option<String> {
        self.run_git(workspace, &["rev-parse", "HEAD"]).await
    }

    /// Object id of a tracked file at HEAD, or `None` if untracked.
    pub async fn file_revision_at_head(
        &self,
        workspace: &Path,
        relative_path: &str,
    ) -> Option<String> {
        self.run_git(workspace, &["rev-parse", &format!("HEAD:{relative_path}")])
            .await
    }

    /// POSIX-normalized workspace-relative path. Paths outside the workspace
    /// are returned as their absolute, POSIX-separated form.
    pub fn to_relative_path(&self, workspace: &Path, absolute: &Path) -> String {
        let relative: PathBuf = absolute
            .strip_prefix(workspace)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| absolute.to_path_buf());
        relative.to_string_lossy().replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relativizes_paths_under_workspace() {
        let probe = VcsProbe::new(&VcsConfig::default());
        let ws = PathBuf::from("/workspace");
        let abs = PathBuf::from("/workspace/src/main.ts");
        assert_eq!(probe.to_relative_path(&ws, &abs), "src/main.ts");
    }

    #[test]
    fn leaves_foreign_paths_absolute() {
        let probe = VcsProbe::new(&VcsConfig::default());
        let ws = PathBuf::from("/workspace");
        let abs = PathBuf::from("/other/file.ts");
        assert_eq!(probe.to_relative_path(&ws, &abs), "/other/file.ts");
    }

    #[tokio::test]
    async fn probing_non_repository_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let probe = VcsProbe::new(&VcsConfig::default());
        assert!(probe.current_revision(dir.path()).await.is_none());
    }
}
