//! # hfsetup-core
//!
//! Core library for hfsetup - Hugging Face integration setup for TeraCharacter.
//!
//! This library provides:
//! - The setup record persisted as `hf_config.json`
//! - The local directory layout used by the sync tooling
//! - A Hugging Face Hub client (behind the `hub` feature)
//! - Configuration management and logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use hfsetup_core::{Config, Layout, Setup, SetupEnv};
//!
//! let config = Config::load().expect("failed to load config");
//! let setup = Setup::new(Layout::new("."), SetupEnv::from_env(), config.hub);
//!
//! setup.build_configuration().expect("failed to write hf_config.json");
//! setup.establish_layout().expect("failed to create directories");
//!
//! if setup.create_remote_dataset().succeeded() {
//!     println!("dataset ready: {}", setup.repo_id());
//! }
//! ```

// Re-export commonly used items at the crate root
pub use config::{Config, HubConfig, SetupEnv};
pub use error::{Error, Result};
pub use hub::{RepoId, RepoKind};
pub use layout::Layout;
pub use record::SetupRecord;
pub use setup::{RemoteOutcome, Setup, SetupOptions};

// Public modules
pub mod config;
pub mod error;
pub mod hub;
pub mod layout;
pub mod logging;
pub mod record;
pub mod setup;
