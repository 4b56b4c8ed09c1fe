//! Per-account time status and partial updates.

use serde::{Deserialize, Serialize};

/// The mutable time-accounting state for one account.
///
/// Lazily materialized: an account with no state on disk reads as the
/// default (no usage recorded, not locked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeStatus {
    /// Seconds of usage already accounted.
    pub time: u64,
    /// Whether any lock reason is currently present.
    pub locked: bool,
}

impl TimeStatus {
    /// Applies a partial update, keeping fields the update leaves unset.
    #[must_use]
    pub fn merged(self, update: &StatusUpdate) -> Self {
        Self {
            time: update.time.unwrap_or(self.time),
            locked: update.locked.unwrap_or(self.locked),
        }
    }
}

/// A partial update to a [`TimeStatus`].
///
/// Both fields are independently optional; an unset field leaves the
/// on-disk value unchanged. `time` deserializes as `u64`, so negative or
/// non-integer values are rejected at the JSON boundary and a decoded
/// update is always well-typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unset_fields() {
        let current = TimeStatus {
            time: 300,
            locked: true,
        };

        let merged = current.merged(&StatusUpdate {
            time: Some(120),
            locked: None,
        });
        assert_eq!(merged.time, 120);
        assert!(merged.locked);

        let merged = current.merged(&StatusUpdate {
            time: None,
            locked: Some(false),
        });
        assert_eq!(merged.time, 300);
        assert!(!merged.locked);
    }

    #[test]
    fn empty_update_is_identity() {
        let current = TimeStatus {
            time: 42,
            locked: false,
        };
        assert_eq!(current.merged(&StatusUpdate::default()), current);
    }

    #[test]
    fn update_deserializes_partial_bodies() {
        let update: StatusUpdate = serde_json::from_str(r#"{"time": 120}"#).unwrap();
        assert_eq!(update.time, Some(120));
        assert_eq!(update.locked, None);

        let update: StatusUpdate = serde_json::from_str(r#"{"locked": true}"#).unwrap();
        assert_eq!(update.time, None);
        assert_eq!(update.locked, Some(true));

        let update: StatusUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(update, StatusUpdate::default());
    }

    #[test]
    fn update_rejects_ill_typed_fields() {
        assert!(serde_json::from_str::<StatusUpdate>(r#"{"time": -1}"#).is_err());
        assert!(serde_json::from_str::<StatusUpdate>(r#"{"time": "120"}"#).is_err());
        assert!(serde_json::from_str::<StatusUpdate>(r#"{"locked": 1}"#).is_err());
    }

    #[test]
    fn update_ignores_unknown_fields() {
        let update: StatusUpdate =
            serde_json::from_str(r#"{"time": 5, "@type": "TimeStatus"}"#).unwrap();
        assert_eq!(update.time, Some(5));
    }

    #[test]
    fn default_status_is_zero_and_unlocked() {
        let status = TimeStatus::default();
        assert_eq!(status.time, 0);
        assert!(!status.locked);
    }
}
