//! Filesystem-backed state for the screen-time service.
//!
//! Three pieces: [`StatusStore`] persists per-account status as sentinel
//! files in the working directory, [`UserDirectory`] enumerates trackable
//! accounts from the system account database, and [`StatusService`] is
//! the facade the HTTP layer calls.
//!
//! # Concurrency
//!
//! All operations are synchronous blocking file I/O, scoped per call.
//! There is no locking around the read-merge-write sequence in
//! [`StatusStore::write`]: the time-tracking daemon that shares the
//! working directory is the primary writer and this service a secondary
//! editor, and the shared on-disk layout has no lock file to take.
//! Concurrent writers can therefore lose an update; see the module
//! documentation in [`store`].

pub mod directory;
pub mod service;
pub mod store;

pub use directory::{DirectoryError, UserDirectory};
pub use service::{ServiceError, StatusService};
pub use store::{StatusStore, StoreError};
