//! "Recently added" highlighting.

use chrono::Duration;

use crate::types::Timestamp;

/// Window within which a selection is highlighted as recently added.
pub const RECENT_WINDOW_HOURS: i64 = 24;

/// Whether `created_at` falls within the recent window of `now`.
///
/// Pure derivation from the two timestamps; nothing is stored.
pub fn is_recently_added(created_at: Timestamp, now: Timestamp) -> bool {
    now.signed_duration_since(created_at) < Duration::hours(RECENT_WINDOW_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn just_created_is_recent() {
        let now = Utc::now();
        assert!(is_recently_added(now, now));
    }

    #[test]
    fn yesterday_is_not_recent() {
        let now = Utc::now();
        assert!(!is_recently_added(now - Duration::hours(25), now));
    }

    #[test]
    fn within_window_is_recent() {
        let now = Utc::now();
        assert!(is_recently_added(now - Duration::hours(23), now));
    }
}
