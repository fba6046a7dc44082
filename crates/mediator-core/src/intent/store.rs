//! The policy store: the single reader (and sole writer) of the workspace
//! intent file and `.intentignore`. Every public call re-reads from disk,
//! humans may edit the intent file while the agent is mid-session.

use chrono::Utc;
use std::path::{Path, PathBuf};

use super::model::{Intent, IntentFile, IntentStatus};
use super::scope::{matches_any, relativize};
use crate::error::{MediatorError, PolicyError, Result};

const HEADER: &str = "\
# Managed by the mediator. Do not hand-edit the `active_intents` list below
# while an agent session is running. Your edits may be overwritten by the
# next status update. Comments outside this header are not preserved.
#\n";

/// Reads and writes `<workspace>/.orchestration/active_intents.yaml` and
/// `<workspace>/.intentignore`. Stateless: holds no cache between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct PolicyStore;

impl PolicyStore {
    pub fn new() -> Self {
        Self
    }

    fn intent_file_path(&self, workspace: &Path) -> PathBuf {
        workspace.join(".orchestration/active_intents.yaml")
    }

    fn ignore_file_path(&self, workspace: &Path) -> PathBuf {
        workspace.join(".intentignore")
    }

    /// Load all intents. Returns an empty list if the file does not exist.
    pub fn load_intents(&self, workspace: &Path) -> Result<Vec<Intent>> {
        let path = self.intent_file_path(workspace);
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let raw = std::fs::read_to_string(&path)?;
        let parsed: IntentFile = serde_yaml::from_str(&raw).map_err(|e| {
            MediatorError::Policy(PolicyError::MalformedIntents {
                reason: e.to_string(),
            })
        })?;
        Ok(parsed.active_intents)
    }

    /// Find a single intent by id.
    pub fn find_intent(&self, workspace: &Path, id: &str) -> Result<Option<Intent>> {
        Ok(self
            .load_intents(workspace)?
            .into_iter()
            .find(|intent| intent.id == id))
    }

    /// Rewrite the intent file with `id`'s status updated, preserving the
    /// header comment. Fails if `id` is not present.
    pub fn update_intent_status(
        &self,
        workspace: &Path,
        id: &str,
        status: IntentStatus,
    ) -> Result<()> {
        let mut intents = self.load_intents(workspace)?;
        let intent = intents
            .iter_mut()
            .find(|intent| intent.id == id)
            .ok_or_else(|| {
                MediatorError::Policy(PolicyError::UnknownIntent { id: id.to_string() })
            })?;
        intent.status = status;
        intent.updated_at = Utc::now();

        let body = serde_yaml::to_string(&IntentFile {
            active_intents: intents,
        })?;
        let path = self.intent_file_path(workspace);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, format!("{HEADER}{body}"))?;
        Ok(())
    }

    /// True if `absolute_path` falls under `intent`'s owned scope.
    pub fn is_file_in_scope(&self, workspace: &Path, intent: &Intent, absolute_path: &Path) -> bool {
        let relative = relativize(workspace, absolute_path);
        matches_any(&intent.owned_scope, &relative)
    }

    /// True if `absolute_path` matches a pattern in `.intentignore`.
    pub fn is_file_ignored(&self, workspace: &Path, absolute_path: &Path) -> bool {
        let patterns = match self.read_ignore_patterns(workspace) {
            Ok(patterns) => patterns,
            Err(_) => return false,
        };
        let relative = relativize(workspace, absolute_path);
        matches_any(&patterns, &relative)
    }

    fn read_ignore_patterns(&self, workspace: &Path) -> Result<Vec<String>> {
        let path = self.ignore_file_path(workspace);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }
}
