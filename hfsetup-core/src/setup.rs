//! Setup orchestration
//!
//! A run is three sequential steps: write the setup record, establish the
//! local layout, and (optionally) create the dataset repository on the Hub.
//! Local I/O failures propagate. Remote failures never do; they come back
//! as a [`RemoteOutcome`].

use std::path::PathBuf;

use crate::config::{HubConfig, SetupEnv};
use crate::error::{Error, Result};
use crate::hub::{RepoId, RepoKind};
use crate::layout::Layout;
use crate::record::SetupRecord;

/// Which steps a run performs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetupOptions {
    /// Create the dataset repository on the Hub
    pub create_dataset: bool,
    /// Only write local files, never touch the Hub
    pub config_only: bool,
}

impl SetupOptions {
    /// Remote creation runs only when asked for and not suppressed
    pub fn wants_remote(&self) -> bool {
        self.create_dataset && !self.config_only
    }
}

/// Result of the remote creation step
#[derive(Debug)]
pub enum RemoteOutcome {
    /// Repository created or confirmed to exist
    Created {
        repo_id: RepoId,
        url: String,
        /// Whether the setup record was updated
        record_updated: bool,
    },
    /// Built without Hub client support
    MissingDependency,
    /// `HF_TOKEN` unset or empty
    MissingCredential,
    /// Authentication, request, or record update failed
    Failed(Error),
}

impl RemoteOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, RemoteOutcome::Created { .. })
    }
}

/// Runs the setup steps against one working directory
pub struct Setup {
    layout: Layout,
    env: SetupEnv,
    #[cfg_attr(not(feature = "hub"), allow(dead_code))]
    hub: HubConfig,
}

impl Setup {
    pub fn new(layout: Layout, env: SetupEnv, hub: HubConfig) -> Self {
        Self { layout, env, hub }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn env(&self) -> &SetupEnv {
        &self.env
    }

    /// Repository this setup targets
    pub fn repo_id(&self) -> RepoId {
        RepoId::for_dataset(&self.env.dataset_name)
    }

    /// Write a fresh setup record, replacing any existing one
    pub fn build_configuration(&self) -> Result<(PathBuf, SetupRecord)> {
        let record = SetupRecord::from_env(&self.env);
        let path = self.layout.config_path();
        record.save(&path)?;
        tracing::info!(
            path = %path.display(),
            dataset = %record.hf_dataset_name,
            token_set = record.has_token(),
            "Setup record created"
        );
        Ok((path, record))
    }

    /// Create local directories and the dataset README
    pub fn establish_layout(&self) -> Result<Vec<PathBuf>> {
        let dirs = self.layout.establish()?;
        tracing::info!(
            root = %self.layout.root().display(),
            directories = dirs.len(),
            "Local layout ready"
        );
        Ok(dirs)
    }

    /// Create the dataset repository on the Hub and record success
    pub fn create_remote_dataset(&self) -> RemoteOutcome {
        if !crate::hub::client_available() {
            tracing::warn!("Hub client not compiled in, skipping dataset creation");
            return RemoteOutcome::MissingDependency;
        }

        let Some(token) = self.env.usable_token() else {
            tracing::warn!("HF_TOKEN not set, skipping dataset creation");
            return RemoteOutcome::MissingCredential;
        };

        let repo_id = self.repo_id();
        match self.create_and_record(token, &repo_id) {
            Ok((url, record_updated)) => {
                tracing::info!(repo_id = %repo_id, url = %url, record_updated, "Dataset ready");
                RemoteOutcome::Created {
                    repo_id,
                    url,
                    record_updated,
                }
            }
            Err(e) => {
                tracing::error!(repo_id = %repo_id, error = %e, "Dataset creation failed");
                RemoteOutcome::Failed(e)
            }
        }
    }

    #[cfg(feature = "hub")]
    fn create_and_record(&self, token: &str, repo_id: &RepoId) -> Result<(String, bool)> {
        let client = crate::hub::BlockingHubClient::new(&self.hub, token)?;

        let account = client.whoami()?;
        tracing::info!(account = %account.name, "Authenticated with the Hub");

        let url = client.create_repo(repo_id, RepoKind::Dataset, true)?;
        let record_updated = SetupRecord::mark_completed(&self.layout.config_path(), repo_id)?;
        Ok((url, record_updated))
    }

    #[cfg(not(feature = "hub"))]
    fn create_and_record(&self, _token: &str, repo_id: &RepoId) -> Result<(String, bool)> {
        Err(Error::Hub(format!(
            "cannot create {} {}: hub client not compiled in",
            RepoKind::Dataset,
            repo_id
        )))
    }
}
