//! Account enumeration from the system account database.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use st_core::{Account, AccountFilter, UidLookupError, UidRange};

/// Errors from enumerating the account database.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The shadow or passwd file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// An enumerated username has no UID in the passwd file.
    #[error(transparent)]
    UidLookup(#[from] UidLookupError),
}

/// Enumerates the accounts eligible for time tracking.
///
/// Usernames come from the shadow file in file order (no re-sorting);
/// UIDs are resolved against the passwd file. The UID bounds are re-read
/// from `login.defs` on every call so configuration changes take effect
/// without a restart.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    shadow_path: PathBuf,
    passwd_path: PathBuf,
    login_defs_path: PathBuf,
    operator: Option<String>,
}

impl UserDirectory {
    #[must_use]
    pub fn new(
        shadow_path: impl Into<PathBuf>,
        passwd_path: impl Into<PathBuf>,
        login_defs_path: impl Into<PathBuf>,
        operator: Option<String>,
    ) -> Self {
        Self {
            shadow_path: shadow_path.into(),
            passwd_path: passwd_path.into(),
            login_defs_path: login_defs_path.into(),
            operator,
        }
    }

    /// Lists every normal account, in account-database order.
    pub fn list(&self) -> Result<Vec<Account>, DirectoryError> {
        let range = UidRange::load(&self.login_defs_path);
        let filter = AccountFilter::new(range, self.operator.clone());
        let uids = self.uid_table()?;

        let mut accounts = Vec::new();
        for username in self.shadow_usernames()? {
            if filter.is_normal(&username, || uids.get(&username).copied())? {
                accounts.push(Account::new(username));
            }
        }
        Ok(accounts)
    }

    /// Finds a single account by exact username.
    ///
    /// A linear scan over [`Self::list`]; usernames are unique, so the
    /// first match is the only one. O(n) per call is fine at
    /// single-machine scale.
    pub fn find(&self, username: &str) -> Result<Option<Account>, DirectoryError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|account| account.username == username))
    }

    /// Usernames from the shadow file, in file order.
    fn shadow_usernames(&self) -> Result<Vec<String>, DirectoryError> {
        let content = read_file(&self.shadow_path)?;
        Ok(content
            .lines()
            .filter_map(|line| {
                let name = line.split(':').next().unwrap_or("");
                (!name.is_empty()).then(|| name.to_string())
            })
            .collect())
    }

    /// Username → UID from the passwd file. Malformed lines are skipped.
    fn uid_table(&self) -> Result<HashMap<String, u32>, DirectoryError> {
        let content = read_file(&self.passwd_path)?;
        let mut table = HashMap::new();
        for line in content.lines() {
            let mut fields = line.split(':');
            let (Some(name), _passwd, Some(uid)) = (fields.next(), fields.next(), fields.next())
            else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let Ok(uid) = uid.parse::<u32>() else {
                tracing::debug!(name, "skipping passwd line with non-numeric UID");
                continue;
            };
            table.entry(name.to_string()).or_insert(uid);
        }
        Ok(table)
    }
}

fn read_file(path: &Path) -> Result<String, DirectoryError> {
    std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
        path: path.to_path_buf(),
        source,
    })
}
