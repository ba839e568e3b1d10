//! Hugging Face Hub integration
//!
//! Repository identifiers are always available. The HTTP client is only
//! compiled with the `hub` feature; without it, setup reports the client
//! as a missing dependency and skips remote work.

#[cfg(feature = "hub")]
mod client;
mod repo;

#[cfg(feature = "hub")]
pub use client::{BlockingHubClient, HubClient, WhoAmI};
pub use repo::{RepoId, RepoKind, REPO_NAMESPACE};

/// Whether this build can talk to the Hub
pub const fn client_available() -> bool {
    cfg!(feature = "hub")
}
