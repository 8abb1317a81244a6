//! Status classification for stored policies.
//!
//! A policy only stores its coverage window and whether it was claimed; the
//! status shown to users is recomputed from those on every read.

use chrono::{DateTime, Duration, Utc};

use super::enums::policy_statuses::PolicyStatus;

/// Days after the end of coverage during which a claim may still be filed.
pub const GRACE_PERIOD_DAYS: i64 = 30;

/// Saturates at the latest representable instant.
pub fn grace_period_end(ends_at: DateTime<Utc>) -> DateTime<Utc> {
    ends_at
        .checked_add_signed(Duration::days(GRACE_PERIOD_DAYS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Rules are checked in order: claimed, past the grace window, inside the
/// coverage window, anything else.
///
/// A policy inside the grace window (ended, not yet closed, not claimed)
/// classifies as `Inactive`, the same as a policy that has not started.
pub fn derive_status(
    now: DateTime<Utc>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    claimed: bool,
) -> PolicyStatus {
    if claimed {
        PolicyStatus::Claimed
    } else if now > grace_period_end(ends_at) {
        PolicyStatus::Closed
    } else if starts_at <= now && now <= ends_at {
        PolicyStatus::Active
    } else {
        PolicyStatus::Inactive
    }
}

/// A claim can be filed once coverage has started and until the grace window closes.
pub fn is_claimable(
    now: DateTime<Utc>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    claimed: bool,
) -> bool {
    match derive_status(now, starts_at, ends_at, claimed) {
        PolicyStatus::Active => true,
        PolicyStatus::Inactive => now >= starts_at && now <= grace_period_end(ends_at),
        PolicyStatus::Claimed | PolicyStatus::Closed => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        let starts_at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        (starts_at, starts_at + Duration::days(1))
    }

    #[test]
    fn claimed_wins_regardless_of_dates() {
        let (starts_at, ends_at) = window();
        for now in [
            starts_at - Duration::days(5),
            starts_at,
            ends_at + Duration::days(90),
        ] {
            assert_eq!(
                derive_status(now, starts_at, ends_at, true),
                PolicyStatus::Claimed
            );
        }
    }

    #[test]
    fn closed_after_grace_window() {
        let (starts_at, ends_at) = window();
        let now = ends_at + Duration::days(31);
        assert_eq!(
            derive_status(now, starts_at, ends_at, false),
            PolicyStatus::Closed
        );
    }

    #[test]
    fn active_inside_coverage_window_inclusive() {
        let (starts_at, ends_at) = window();
        for now in [starts_at, starts_at + Duration::hours(12), ends_at] {
            assert_eq!(
                derive_status(now, starts_at, ends_at, false),
                PolicyStatus::Active
            );
        }
    }

    #[test]
    fn inactive_before_start() {
        let (starts_at, ends_at) = window();
        let now = starts_at - Duration::minutes(1);
        assert_eq!(
            derive_status(now, starts_at, ends_at, false),
            PolicyStatus::Inactive
        );
    }

    #[test]
    fn inactive_inside_grace_window() {
        let (starts_at, ends_at) = window();
        for now in [
            ends_at + Duration::seconds(1),
            ends_at + Duration::days(15),
            grace_period_end(ends_at),
        ] {
            assert_eq!(
                derive_status(now, starts_at, ends_at, false),
                PolicyStatus::Inactive
            );
        }
    }

    #[test]
    fn grace_window_saturates_near_the_end_of_time() {
        let ends_at = DateTime::<Utc>::MAX_UTC - Duration::days(1);
        assert_eq!(grace_period_end(ends_at), DateTime::<Utc>::MAX_UTC);
        assert_eq!(
            derive_status(Utc::now(), ends_at - Duration::days(1), ends_at, false),
            PolicyStatus::Inactive
        );
    }

    #[test]
    fn claimable_while_active_or_in_grace_window() {
        let (starts_at, ends_at) = window();
        assert!(is_claimable(starts_at, starts_at, ends_at, false));
        assert!(is_claimable(ends_at + Duration::days(10), starts_at, ends_at, false));
        assert!(is_claimable(grace_period_end(ends_at), starts_at, ends_at, false));
    }

    #[test]
    fn not_claimable_before_start_after_close_or_when_claimed() {
        let (starts_at, ends_at) = window();
        assert!(!is_claimable(starts_at - Duration::hours(1), starts_at, ends_at, false));
        assert!(!is_claimable(ends_at + Duration::days(31), starts_at, ends_at, false));
        assert!(!is_claimable(starts_at, starts_at, ends_at, true));
    }
}
