//! Account identity types with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for usernames.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The provided value was empty.
    #[error("username cannot be empty")]
    Empty,

    /// The value contained a character that could escape the working
    /// directory when used as a file name.
    #[error("username contains a path separator or NUL: {value:?}")]
    UnsafeCharacter { value: String },

    /// The value was a relative path component.
    #[error("username cannot be a relative path component: {value:?}")]
    RelativeComponent { value: String },
}

/// A validated OS account name.
///
/// Usernames name sentinel files inside the working directory, so values
/// that could resolve outside it (`/`, NUL bytes, `.` and `..`) are
/// rejected before any path is built from them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Creates a new username after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, UsernameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(UsernameError::Empty);
        }
        if name.contains('/') || name.contains('\0') {
            return Err(UsernameError::UnsafeCharacter { value: name });
        }
        if name == "." || name == ".." {
            return Err(UsernameError::RelativeComponent { value: name });
        }
        Ok(Self(name))
    }

    /// Returns the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An OS-level user account eligible for time tracking.
///
/// Accounts are produced by enumerating the system account database and
/// are never created or destroyed by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
}

impl Account {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
