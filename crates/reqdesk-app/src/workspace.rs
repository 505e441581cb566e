// Rust guideline compliant 2026-10-14

//! Workspace discovery and path management utilities.

use crate::error::{AppError, Result};
use reqdesk_core::{Config, JsonlStorage, Store};
use std::path::{Path, PathBuf};

/// Name of the data directory inside a workspace root.
pub const DATA_DIR: &str = ".reqdesk";

/// Path metadata for a Reqdesk workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    root: PathBuf,
    data_dir: PathBuf,
    requests_path: PathBuf,
    legacy_path: PathBuf,
    config_path: PathBuf,
}

impl WorkspaceContext {
    fn at(root: PathBuf) -> Self {
        let data_dir = root.join(DATA_DIR);
        Self {
            requests_path: data_dir.join("requests.jsonl"),
            legacy_path: data_dir.join("issues.jsonl"),
            config_path: data_dir.join("config.toml"),
            data_dir,
            root,
        }
    }

    fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
        match root {
            Some(root) => Ok(root.to_path_buf()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Discovers a workspace starting from an optional root.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The current directory cannot be resolved
    /// - The `.reqdesk` directory is missing
    pub fn discover(root: Option<&Path>) -> Result<Self> {
        let context = Self::at(Self::resolve_root(root)?);
        if !context.data_dir.exists() {
            return Err(AppError::WorkspaceNotInitialized {
                path: context.data_dir,
            });
        }
        Ok(context)
    }

    /// Creates the `.reqdesk` directory and a default config if missing.
    ///
    /// Existing files are left untouched, so running it twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or config file cannot be written.
    pub fn init(root: Option<&Path>) -> Result<Self> {
        let context = Self::at(Self::resolve_root(root)?);
        std::fs::create_dir_all(&context.data_dir)?;
        if !context.config_path.exists() {
            Config::default().save(&context.data_dir)?;
        }
        tracing::info!(path = %context.data_dir.display(), "Initialized workspace");
        Ok(context)
    }

    /// Returns the workspace root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Returns the `.reqdesk` directory path.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_path()
    }

    /// Returns the requests JSONL path.
    #[must_use]
    pub fn requests_path(&self) -> &Path {
        self.requests_path.as_path()
    }

    /// Returns the legacy issues JSONL path.
    #[must_use]
    pub fn legacy_path(&self) -> &Path {
        self.legacy_path.as_path()
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        self.config_path.as_path()
    }

    /// Opens JSONL storage for the requests file, with the legacy file attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be initialized.
    pub fn open_storage(&self) -> Result<JsonlStorage> {
        Ok(JsonlStorage::new(self.requests_path.clone())?.with_legacy(self.legacy_path.clone())?)
    }

    /// Loads workspace configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(self.data_dir())?)
    }

    /// Opens the store over this workspace's storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be initialized.
    pub fn open_store(&self, config: &Config) -> Result<Store<JsonlStorage>> {
        Ok(Store::open(self.open_storage()?, config))
    }
}
