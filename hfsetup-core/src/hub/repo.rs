//! Repository identifiers on the Hugging Face Hub

use std::fmt;

use serde::{Deserialize, Serialize};

/// Owner every TeraCharacter dataset is created under
pub const REPO_NAMESPACE: &str = "terastudio";

/// Kind of Hub repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoKind {
    Model,
    Dataset,
    Space,
}

impl RepoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoKind::Model => "model",
            RepoKind::Dataset => "dataset",
            RepoKind::Space => "space",
        }
    }

    /// Path segment the Hub puts in front of repository URLs
    pub fn url_prefix(&self) -> &'static str {
        match self {
            RepoKind::Model => "",
            RepoKind::Dataset => "datasets/",
            RepoKind::Space => "spaces/",
        }
    }
}

impl fmt::Display for RepoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `namespace/name` pair identifying a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub namespace: String,
    pub name: String,
}

impl RepoId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Repository for a dataset under [`REPO_NAMESPACE`]
    pub fn for_dataset(dataset_name: &str) -> Self {
        Self::new(REPO_NAMESPACE, dataset_name)
    }

    /// Public URL of this repository on the given endpoint
    pub fn url(&self, endpoint: &str, kind: RepoKind) -> String {
        format!(
            "{}/{}{}",
            endpoint.trim_end_matches('/'),
            kind.url_prefix(),
            self
        )
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
