//! Milestone thresholds and rewards

/// Streak thresholds and their rewards in VERY tokens
///
/// A closed enumeration: adding a threshold means adding a row here, nothing
/// else changes.
pub const MILESTONE_REWARDS: [(u32, u32); 6] = [
    (7, 100),
    (14, 180),
    (30, 300),
    (60, 480),
    (100, 700),
    (365, 2000),
];

/// Reward amount for an exact threshold, 0 for anything else
pub fn reward_for(days: u32) -> u32 {
    MILESTONE_REWARDS
        .iter()
        .find(|(threshold, _)| *threshold == days)
        .map(|(_, reward)| *reward)
        .unwrap_or(0)
}

/// True iff this streak length is exactly a configured threshold
///
/// Exact match only: a streak that skips past a threshold (e.g. backfilled
/// data jumping 5 -> 8) does not retroactively trigger it.
pub fn is_new_milestone(streak_after_checkin: u32) -> bool {
    MILESTONE_REWARDS
        .iter()
        .any(|(threshold, _)| *threshold == streak_after_checkin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_table_matches_configuration() {
        assert_eq!(reward_for(7), 100);
        assert_eq!(reward_for(14), 180);
        assert_eq!(reward_for(30), 300);
        assert_eq!(reward_for(60), 480);
        assert_eq!(reward_for(100), 700);
        assert_eq!(reward_for(365), 2000);
    }

    #[test]
    fn non_thresholds_pay_nothing() {
        for days in [0, 1, 6, 8, 29, 31, 99, 101, 364, 366] {
            assert_eq!(reward_for(days), 0);
            assert!(!is_new_milestone(days));
        }
    }

    #[test]
    fn exact_match_only() {
        assert!(is_new_milestone(7));
        // Jumping from 5 to 8 never lands on 7, so nothing fires
        assert!(!is_new_milestone(8));
    }
}
