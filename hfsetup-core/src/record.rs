//! The setup record persisted as `hf_config.json`
//!
//! Written fresh on every run. The only in-place update is
//! [`SetupRecord::mark_completed`], which edits the raw JSON object so that
//! keys it does not know about, and keys that are absent, stay that way.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{SetupEnv, DEFAULT_DATASET_NAME};
use crate::error::Result;
use crate::hub::{RepoId, RepoKind};

/// Database location recorded for the application
pub const DATABASE_PATH: &str = "./database/teracharacter.db";

/// Setup state shared with the rest of the application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupRecord {
    pub hf_token: String,
    pub hf_dataset_name: String,
    pub hf_repo_type: RepoKind,
    pub setup_completed: bool,
    pub database_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_id: Option<String>,
    /// Keys written by someone else, carried through rewrites
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SetupRecord {
    fn default() -> Self {
        Self {
            hf_token: String::new(),
            hf_dataset_name: DEFAULT_DATASET_NAME.to_string(),
            hf_repo_type: RepoKind::Dataset,
            setup_completed: false,
            database_path: DATABASE_PATH.to_string(),
            repo_id: None,
            extra: Map::new(),
        }
    }
}

impl SetupRecord {
    /// Fresh, not yet completed record for this environment
    pub fn from_env(env: &SetupEnv) -> Self {
        Self {
            hf_token: env.token.clone().unwrap_or_default(),
            hf_dataset_name: env.dataset_name.clone(),
            ..Default::default()
        }
    }

    /// Read a record from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the record, replacing whatever is at `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "Setup record written");
        Ok(())
    }

    /// Record a successful repository creation in the file at `path`
    ///
    /// Returns `Ok(false)` without touching anything when no record exists.
    /// Only `setup_completed` and `repo_id` change; every other key, known
    /// or not, is written back as found and in the same order.
    pub fn mark_completed(path: &Path, repo_id: &RepoId) -> Result<bool> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "No setup record to update");
            return Ok(false);
        }

        let content = fs::read_to_string(path)?;
        let mut fields: Map<String, Value> = serde_json::from_str(&content)?;
        fields.insert("setup_completed".to_string(), Value::Bool(true));
        fields.insert("repo_id".to_string(), Value::String(repo_id.to_string()));

        fs::write(path, serde_json::to_string_pretty(&fields)?)?;
        tracing::debug!(path = %path.display(), repo_id = %repo_id, "Setup record marked completed");
        Ok(true)
    }

    pub fn has_token(&self) -> bool {
        !self.hf_token.is_empty()
    }
}
