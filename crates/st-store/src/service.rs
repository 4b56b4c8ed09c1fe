//! The status service facade the HTTP layer calls.

use thiserror::Error;

use st_core::{Account, StatusUpdate, TimeStatus, Username, UsernameError};

use crate::{DirectoryError, StatusStore, StoreError, UserDirectory};

/// Errors surfaced to the API boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The username cannot name state files.
    #[error(transparent)]
    InvalidUsername(#[from] UsernameError),
}

/// Facade over the user directory and the status store.
///
/// Reads consult the directory so an unknown account surfaces as `None`.
/// Updates deliberately do not: the original service wrote state for any
/// name it was given, and the cooperating daemon may materialize the
/// account afterwards.
#[derive(Debug, Clone)]
pub struct StatusService {
    directory: UserDirectory,
    store: StatusStore,
}

impl StatusService {
    #[must_use]
    pub const fn new(directory: UserDirectory, store: StatusStore) -> Self {
        Self { directory, store }
    }

    /// Every trackable account, in account-database order.
    pub fn list_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        Ok(self.directory.list()?)
    }

    /// One account by username, or `None` if it is unknown or filtered.
    pub fn get_account(&self, username: &str) -> Result<Option<Account>, ServiceError> {
        Ok(self.directory.find(username)?)
    }

    /// The time status for an account.
    ///
    /// `None` only when the account itself does not exist; missing status
    /// files degrade to the defaults instead.
    pub fn get_time_status(&self, username: &str) -> Result<Option<TimeStatus>, ServiceError> {
        let Ok(name) = Username::new(username) else {
            // A name that cannot exist on disk cannot have status.
            return Ok(None);
        };
        Ok(self
            .directory
            .find(username)?
            .map(|_| self.store.read(&name)))
    }

    /// Applies a partial update to an account's time status.
    pub fn update_time_status(
        &self,
        username: &str,
        update: &StatusUpdate,
    ) -> Result<TimeStatus, ServiceError> {
        let name = Username::new(username)?;
        Ok(self.store.write(&name, update)?)
    }
}
