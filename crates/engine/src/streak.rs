//! Streak calculation over a habit's check-in history
//!
//! Pure and deterministic: the same history and reference day always produce
//! the same summary. All arithmetic is on date-only values, so time zones and
//! partial days cannot introduce off-by-one errors.

use chrono::NaiveDate;
use constrix_core::{Error, Result, StreakSummary};

/// Compute the current and longest streak from a check-in history
///
/// `dates` must be strictly descending with at most one entry per calendar
/// day (the persistence layer's ordering plus its UNIQUE constraint provide
/// exactly that). Anything else is a precondition violation, not a value to
/// be silently repaired.
///
/// The current streak anchors on the most recent check-in: it counts only if
/// that check-in is `today` or yesterday, and extends backwards through gaps
/// of exactly one day. The longest streak is the maximum consecutive-day run
/// anywhere in the history.
pub fn compute_streak(dates: &[NaiveDate], today: NaiveDate) -> Result<StreakSummary> {
    let Some(&latest) = dates.first() else {
        return Ok(StreakSummary::empty());
    };

    if latest > today {
        return Err(Error::Validation(format!(
            "Check-in date {} is after today {}",
            latest, today
        )));
    }

    for pair in dates.windows(2) {
        if pair[0] <= pair[1] {
            return Err(Error::Validation(format!(
                "Check-in history must be strictly descending, got {} before {}",
                pair[0], pair[1]
            )));
        }
    }

    // Current streak: anchored at today or yesterday, broken by any gap > 1
    let mut current = 0u32;
    if (today - latest).num_days() <= 1 {
        current = 1;
        for pair in dates.windows(2) {
            if (pair[0] - pair[1]).num_days() == 1 {
                current += 1;
            } else {
                break;
            }
        }
    }

    // Longest streak: track runs of exact 1-day gaps across the whole history
    let mut longest = 0u32;
    let mut run = 1u32;
    for pair in dates.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            run += 1;
        } else {
            longest = longest.max(run);
            run = 1;
        }
    }
    longest = longest.max(run);

    Ok(StreakSummary {
        current_streak: current,
        longest_streak: longest,
        last_checkin_date: Some(latest),
        is_active: current > 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    #[test]
    fn empty_history_is_all_zero() {
        let summary = compute_streak(&[], d(26)).unwrap();
        assert_eq!(summary, StreakSummary::empty());
    }

    #[test]
    fn single_checkin_today() {
        let summary = compute_streak(&[d(26)], d(26)).unwrap();
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.longest_streak, 1);
        assert_eq!(summary.last_checkin_date, Some(d(26)));
        assert!(summary.is_active);
    }

    #[test]
    fn yesterday_still_counts_as_active() {
        let summary = compute_streak(&[d(25), d(24), d(23)], d(26)).unwrap();
        assert_eq!(summary.current_streak, 3);
        assert!(summary.is_active);
    }

    #[test]
    fn two_day_old_history_has_zero_current_regardless_of_length() {
        let dates: Vec<NaiveDate> = (1..=24).rev().map(d).collect();
        let summary = compute_streak(&dates, d(26)).unwrap();
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.longest_streak, 24);
        assert!(!summary.is_active);
        assert_eq!(summary.last_checkin_date, Some(d(24)));
    }

    #[test]
    fn gap_breaks_current_but_longest_survives() {
        // Check-ins on days 1,2,3, gap on day 4, check-in on day 5
        let summary = compute_streak(&[d(5), d(3), d(2), d(1)], d(5)).unwrap();
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.longest_streak, 3);
    }

    #[test]
    fn longest_is_never_below_current() {
        let histories: [&[NaiveDate]; 4] = [
            &[],
            &[d(26)],
            &[d(26), d(25), d(24)],
            &[d(26), d(24), d(23), d(22), d(20)],
        ];
        for dates in histories {
            let summary = compute_streak(dates, d(26)).unwrap();
            assert!(summary.longest_streak >= summary.current_streak);
        }
    }

    #[test]
    fn is_idempotent() {
        let dates = [d(26), d(25), d(23), d(22), d(21), d(10)];
        let first = compute_streak(&dates, d(26)).unwrap();
        let second = compute_streak(&dates, d(26)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_unsorted_input() {
        let err = compute_streak(&[d(24), d(25)], d(26)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn rejects_duplicate_days() {
        let err = compute_streak(&[d(25), d(25)], d(26)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn rejects_future_checkin() {
        let err = compute_streak(&[d(27)], d(26)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn streak_across_month_boundary() {
        let dates = [
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        ];
        let summary = compute_streak(&dates, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()).unwrap();
        assert_eq!(summary.current_streak, 3);
        assert_eq!(summary.longest_streak, 3);
    }
}
