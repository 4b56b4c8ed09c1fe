//! Sentinel-file persistence for per-account time status.
//!
//! The working directory holds up to four files per account: a usage
//! counter (`<user>.time`) containing a decimal integer as text, and
//! three zero-length markers (`<user>.lock`, `<user>.logout`,
//! `<user>.late`) whose presence encodes one lock reason each. The layout
//! is shared with the time-tracking daemon that produces the markers, so
//! it must not change shape.
//!
//! # Lost updates
//!
//! [`StatusStore::write`] is an unlocked read-merge-write: two concurrent
//! writers for the same account (or a write racing the daemon) can
//! interleave and lose one side's update. The markers and the counter are
//! also not written atomically as a pair. Both limitations are inherited
//! from the filesystem-as-database layout and are accepted rather than
//! papered over with a lock the daemon would not honor.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use st_core::{LockReason, LockReasons, StatusUpdate, TimeStatus, Username};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A sentinel file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A marker file could not be removed.
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Filesystem-backed store for per-account time status.
#[derive(Debug, Clone)]
pub struct StatusStore {
    work_dir: PathBuf,
}

impl StatusStore {
    #[must_use]
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    fn user_file(&self, username: &Username, suffix: &str) -> PathBuf {
        self.work_dir.join(format!("{username}.{suffix}"))
    }

    fn marker_path(&self, username: &Username, reason: LockReason) -> PathBuf {
        self.user_file(username, reason.suffix())
    }

    fn time_path(&self, username: &Username) -> PathBuf {
        self.user_file(username, "time")
    }

    /// Reads the set of lock-reason markers currently present.
    pub fn lock_reasons(&self, username: &Username) -> LockReasons {
        LockReason::ALL
            .into_iter()
            .filter(|&reason| self.marker_path(username, reason).is_file())
            .collect()
    }

    /// Reads the current status, degrading to defaults.
    ///
    /// A missing usage file means no usage has been recorded yet. A file
    /// whose content is not a non-negative decimal integer (after
    /// trimming whitespace) is treated the same way: corrupt state must
    /// not break reads.
    pub fn read(&self, username: &Username) -> TimeStatus {
        let path = self.time_path(username);
        let time = match std::fs::read_to_string(&path) {
            Ok(content) => content.trim().parse::<u64>().unwrap_or_else(|e| {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "unparsable usage counter, treating as zero"
                );
                0
            }),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::debug!(
                        path = %path.display(),
                        error = %e,
                        "unreadable usage counter, treating as zero"
                    );
                }
                0
            }
        };
        TimeStatus {
            time,
            locked: self.lock_reasons(username).is_locked(),
        }
    }

    /// Merges a partial update over the current on-disk status and
    /// persists the result, returning the merged status.
    ///
    /// The current status is re-read from disk first, never taken from a
    /// cache. Markers are resolved before the usage counter is written:
    /// locking creates only the explicit-lock marker (the other reasons
    /// belong to other subsystems and are left alone), while unlocking
    /// removes every marker, since a cleared `locked` means no reason
    /// remains. Removing an absent marker is not an error.
    pub fn write(
        &self,
        username: &Username,
        update: &StatusUpdate,
    ) -> Result<TimeStatus, StoreError> {
        let current = self.read(username);
        let merged = current.merged(update);
        tracing::debug!(user = %username, ?current, ?merged, "updating time status");

        if merged.locked {
            let path = self.marker_path(username, LockReason::Explicit);
            std::fs::write(&path, b"").map_err(|source| StoreError::Write { path, source })?;
        } else {
            for reason in LockReason::ALL {
                remove_if_present(&self.marker_path(username, reason))?;
            }
        }

        let path = self.time_path(username);
        std::fs::write(&path, merged.time.to_string())
            .map_err(|source| StoreError::Write { path, source })?;

        Ok(merged)
    }
}

/// Removes a marker, treating "already absent" as success.
fn remove_if_present(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StoreError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}
