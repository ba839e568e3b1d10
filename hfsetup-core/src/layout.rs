//! Local directory layout used by the Hub sync tooling

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Setup record file name, relative to the layout root
pub const CONFIG_FILE: &str = "hf_config.json";

/// Directories created on every run, relative to the layout root
pub const DIRECTORIES: [&str; 4] = [
    "database",
    "hf_sync/characters",
    "hf_sync/avatars",
    "hf_sync/exports",
];

/// Dataset README location, relative to the layout root
pub const README_FILE: &str = "hf_sync/README.md";

/// Dataset card written to [`README_FILE`]
pub const README_CONTENT: &str = "# TeraCharacter Database

This dataset contains character data from the TeraCharacter application.

## Structure

- `data/characters/`: JSON files containing character information
- `data/avatars/`: Character avatar images
- `data/exports/`: Database exports and backups

## Usage

This dataset is automatically synced with the TeraCharacter application and can be used for:
- Character data backup and restore
- Data analysis and insights
- Character sharing and discovery

## License

This dataset is maintained by TeraStudio.
";

/// Paths of a setup rooted at a working directory
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn directories(&self) -> Vec<PathBuf> {
        DIRECTORIES.iter().map(|dir| self.root.join(dir)).collect()
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join(README_FILE)
    }

    /// Create every directory, then (re)write the README
    ///
    /// Existing directories are left alone. Returns the directories in
    /// creation order.
    pub fn establish(&self) -> Result<Vec<PathBuf>> {
        let dirs = self.directories();
        for dir in &dirs {
            fs::create_dir_all(dir)?;
            tracing::debug!(path = %dir.display(), "Directory ready");
        }

        let readme = self.readme_path();
        fs::write(&readme, README_CONTENT)?;
        tracing::debug!(path = %readme.display(), "README written");

        Ok(dirs)
    }

    /// Which layout entries are present on disk, in creation order
    pub fn inspect(&self) -> Vec<(PathBuf, bool)> {
        let mut entries: Vec<(PathBuf, bool)> = self
            .directories()
            .into_iter()
            .map(|dir| {
                let present = dir.is_dir();
                (dir, present)
            })
            .collect();
        let readme = self.readme_path();
        let present = readme.is_file();
        entries.push((readme, present));
        entries
    }
}
