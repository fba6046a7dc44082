//! Data model for the workspace intent policy file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an [`Intent`]. Transitions are monotone and only ever
/// happen through [`crate::intent::PolicyStore::update_intent_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentStatus {
    Pending,
    InProgress,
    Blocked,
    Complete,
}

impl IntentStatus {
    /// The canonical SCREAMING_SNAKE_CASE form used in the policy YAML and
    /// everywhere else this status is surfaced to an agent or the ledger.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentStatus::Pending => "PENDING",
            IntentStatus::InProgress => "IN_PROGRESS",
            IntentStatus::Blocked => "BLOCKED",
            IntentStatus::Complete => "COMPLETE",
        }
    }
}

impl std::fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of actor attributed to an intent or a trace conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Ai,
    Human,
}

/// A participant who has worked under an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub entity_type: EntityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
}

/// A declarative unit of authorized work, loaded from the workspace's
/// `active_intents.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub id: String,
    pub name: String,
    pub status: IntentStatus,
    #[serde(default)]
    pub owned_scope: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub blocked_reason: Option<String>,
}

/// Top-level shape of `active_intents.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentFile {
    #[serde(default)]
    pub active_intents: Vec<Intent>,
}
