// Rust guideline compliant 2026-10-14

//! Snapshot storage for service requests.
//!
//! The store persists its whole canonical list after every mutation and
//! reads it back once at startup. [`JsonlStorage`] keeps one JSON object per
//! line on disk; [`MemoryStorage`] keeps the snapshot in process.

use crate::models::{LegacyIssue, Record};
use crate::{Error, Result};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Persistence collaborator of the [`Store`](crate::Store).
pub trait SnapshotStore: Send + Sync {
    /// Loads the current snapshot.
    ///
    /// # Returns
    ///
    /// `None` if no snapshot has been written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read.
    fn load(&self) -> Result<Option<Vec<Record>>>;

    /// Replaces the snapshot with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, records: &[Arc<Record>]) -> Result<()>;

    /// Loads issues in the legacy format, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if legacy data exists but cannot be read.
    fn load_legacy(&self) -> Result<Vec<LegacyIssue>> {
        Ok(Vec::new())
    }
}

/// JSONL file storage.
///
/// Saves are atomic (temp file + rename) and serialized across processes
/// by an advisory lock on a sibling `.lock` file.
#[derive(Debug, Clone)]
pub struct JsonlStorage {
    /// Path to the requests JSONL file.
    path: PathBuf,
    /// Path to the legacy issues JSONL file, if any.
    legacy_path: Option<PathBuf>,
}

impl JsonlStorage {
    /// Creates a storage backed by the JSONL file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        Self::validate_path(&path)?;
        Ok(Self {
            path,
            legacy_path: None,
        })
    }

    /// Adds a legacy issues file read when no snapshot exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn with_legacy(mut self, legacy_path: PathBuf) -> Result<Self> {
        Self::validate_path(&legacy_path)?;
        self.legacy_path = Some(legacy_path);
        Ok(self)
    }

    fn validate_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path cannot be empty",
            )));
        }
        Ok(())
    }

    /// Returns the requests file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the legacy issues file path, if configured.
    #[must_use]
    pub fn legacy_path(&self) -> Option<&Path> {
        self.legacy_path.as_deref()
    }

    /// Loads every record from the requests file.
    ///
    /// A missing file yields an empty list. Malformed lines are skipped with
    /// a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn load_all(&self) -> Result<Vec<Record>> {
        read_jsonl(&self.path)
    }

    /// Writes every record to the requests file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock is held by another process
    /// - The temp file cannot be written or renamed
    pub fn save_all<R: AsRef<Record>>(&self, records: &[R]) -> Result<()> {
        use std::fs::File;
        use std::io::{BufWriter, Write};

        self.with_lock(|| {
            // Same directory, so the rename stays atomic.
            let temp_path = self.path.with_extension("jsonl.tmp");
            {
                let mut writer = BufWriter::new(File::create(&temp_path)?);
                for record in records {
                    serde_json::to_writer(&mut writer, record.as_ref())?;
                    writer.write_all(b"\n")?;
                }
                let file = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
                file.sync_all()?;
            }
            std::fs::rename(&temp_path, &self.path)?;
            tracing::debug!(path = %self.path.display(), count = records.len(), "Saved snapshot");
            Ok(())
        })
    }

    /// Executes a closure with an exclusive lock on the storage file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock cannot be acquired
    /// - The closure returns an error
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;
        use std::fs::OpenOptions;

        let lock_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file
            .try_lock_exclusive()
            .map_err(|e| Error::Lock(format!("{}: {}", lock_path.display(), e)))?;

        let result = f();

        // Released on drop as well; an unlock failure must not mask `result`.
        let _ = lock_file.unlock();

        result
    }
}

impl SnapshotStore for JsonlStorage {
    fn load(&self) -> Result<Option<Vec<Record>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        self.load_all().map(Some)
    }

    fn save(&self, records: &[Arc<Record>]) -> Result<()> {
        self.save_all(records)
    }

    fn load_legacy(&self) -> Result<Vec<LegacyIssue>> {
        match &self.legacy_path {
            Some(path) => read_jsonl(path),
            None => Ok(Vec::new()),
        }
    }
}

fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    use std::fs::File;
    use std::io::BufReader;

    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut items = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = number + 1,
                    error = %e,
                    "Skipping malformed JSON line"
                );
            }
        }
    }

    Ok(items)
}

/// In-process snapshot storage.
///
/// Useful for tests and ephemeral stores. Can be seeded with legacy issues
/// and switched into a failing mode to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Option<Vec<Record>>>,
    legacy: Mutex<Vec<LegacyIssue>>,
    saves: Mutex<usize>,
    failing: Mutex<bool>,
}

impl MemoryStorage {
    /// Creates an empty storage with no snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage whose snapshot already holds `records`.
    #[must_use]
    pub fn with_records(records: Vec<Record>) -> Self {
        let storage = Self::new();
        *storage.snapshot.lock() = Some(records);
        storage
    }

    /// Creates a storage with no snapshot and the given legacy issues.
    #[must_use]
    pub fn with_legacy(issues: Vec<LegacyIssue>) -> Self {
        let storage = Self::new();
        *storage.legacy.lock() = issues;
        storage
    }

    /// Makes every subsequent load and save fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    /// Returns the number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<Vec<Record>> {
        self.snapshot.lock().clone()
    }

    fn check(&self) -> Result<()> {
        if *self.failing.lock() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "memory storage set to fail",
            )));
        }
        Ok(())
    }
}

impl SnapshotStore for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Record>>> {
        self.check()?;
        Ok(self.snapshot.lock().clone())
    }

    fn save(&self, records: &[Arc<Record>]) -> Result<()> {
        self.check()?;
        *self.snapshot.lock() = Some(records.iter().map(|r| Record::clone(r)).collect());
        *self.saves.lock() += 1;
        Ok(())
    }

    fn load_legacy(&self) -> Result<Vec<LegacyIssue>> {
        self.check()?;
        Ok(self.legacy.lock().clone())
    }
}
