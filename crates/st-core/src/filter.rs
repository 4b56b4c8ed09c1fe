//! Normal-user classification.

use thiserror::Error;

use crate::UidRange;

/// The username could not be resolved to a UID.
///
/// Callers are expected to pass only usernames already known to exist in
/// the account database, so a failed lookup is a contract violation
/// rather than a data issue, and it propagates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no UID found for user {username}")]
pub struct UidLookupError {
    pub username: String,
}

/// Decides which accounts are "normal" (trackable) users.
///
/// Holds the loaded [`UidRange`] and the optional operator username. The
/// operator is passed in explicitly rather than read from the ambient
/// environment so the filter stays pure and testable.
#[derive(Debug, Clone)]
pub struct AccountFilter {
    range: UidRange,
    operator: Option<String>,
}

impl AccountFilter {
    #[must_use]
    pub const fn new(range: UidRange, operator: Option<String>) -> Self {
        Self { range, operator }
    }

    /// Whether `username` is a normal user.
    ///
    /// The operator's own account is never normal, even inside the range.
    /// With an [`UidRange::Unknown`] range every other username is normal
    /// and `resolve_uid` is never invoked; otherwise the lookup must
    /// produce a UID, and `None` propagates as [`UidLookupError`].
    pub fn is_normal<F>(&self, username: &str, resolve_uid: F) -> Result<bool, UidLookupError>
    where
        F: FnOnce() -> Option<u32>,
    {
        // Hides the account that elevated privileges to run this service,
        // so the administrator cannot lock themselves out.
        if self.operator.as_deref() == Some(username) {
            return Ok(false);
        }
        match self.range {
            UidRange::Unknown => Ok(true),
            range @ UidRange::Bounded { .. } => {
                let uid = resolve_uid().ok_or_else(|| UidLookupError {
                    username: username.to_string(),
                })?;
                Ok(range.contains(uid))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded_filter(operator: Option<&str>) -> AccountFilter {
        AccountFilter::new(UidRange::bounded(1000, 60000), operator.map(String::from))
    }

    #[test]
    fn uid_inside_range_is_normal() {
        let filter = bounded_filter(None);
        assert_eq!(filter.is_normal("alice", || Some(1001)), Ok(true));
    }

    #[test]
    fn uid_outside_range_is_not_normal() {
        let filter = bounded_filter(None);
        assert_eq!(filter.is_normal("root", || Some(0)), Ok(false));
        assert_eq!(filter.is_normal("nobody", || Some(65534)), Ok(false));
    }

    #[test]
    fn operator_is_excluded_even_inside_range() {
        let filter = bounded_filter(Some("alice"));
        assert_eq!(filter.is_normal("alice", || Some(1001)), Ok(false));
        assert_eq!(filter.is_normal("bob", || Some(1002)), Ok(true));
    }

    #[test]
    fn unknown_range_reports_everyone_normal() {
        let filter = AccountFilter::new(UidRange::Unknown, None);
        assert_eq!(filter.is_normal("root", || Some(0)), Ok(true));
    }

    #[test]
    fn unknown_range_never_resolves_uids() {
        let filter = AccountFilter::new(UidRange::Unknown, None);
        let result = filter.is_normal("ghost", || panic!("should not resolve"));
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn operator_exclusion_wins_over_unknown_range() {
        let filter = AccountFilter::new(UidRange::Unknown, Some("alice".to_string()));
        assert_eq!(filter.is_normal("alice", || Some(1001)), Ok(false));
    }

    #[test]
    fn unresolvable_uid_is_an_error() {
        let filter = bounded_filter(None);
        let err = filter.is_normal("ghost", || None).unwrap_err();
        assert_eq!(err.username, "ghost");
        assert_eq!(err.to_string(), "no UID found for user ghost");
    }
}
