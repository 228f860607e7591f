//! Per-user analytics over check-in activity

use chrono::{Days, Months, NaiveDate};
use constrix_core::{Error, Result};
use constrix_persistence::sqlite::{checkins, habits, milestones};
use constrix_persistence::Database;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Reporting window for the analytics summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    SevenDays,
    ThirtyDays,
    SixMonths,
    OneYear,
}

impl Period {
    /// First day of the window ending at `today` (inclusive)
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Period::SevenDays => today - Days::new(7),
            Period::ThirtyDays => today - Days::new(30),
            Period::SixMonths => today - Months::new(6),
            Period::OneYear => today - Months::new(12),
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::ThirtyDays
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "7d" => Ok(Period::SevenDays),
            "30d" => Ok(Period::ThirtyDays),
            "6m" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            other => Err(Error::Validation(format!(
                "Period must be one of 7d, 30d, 6m, 1y, got '{}'",
                other
            ))),
        }
    }
}

/// Aggregate view of a user's habits for one period
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_checkins: u32,
    pub total_habits: u32,
    pub active_streaks: u32,
    /// Share of habits with a live streak, in whole percent
    pub completion_rate: u32,
    pub milestones_achieved: u32,
    /// Check-in count per day, for activity heatmaps
    pub activity: BTreeMap<NaiveDate, u32>,
}

/// Build the analytics summary for a user
pub async fn user_analytics(
    db: &Database,
    user_id: i64,
    period: Period,
    today: NaiveDate,
) -> Result<AnalyticsSummary> {
    let user_habits = habits::list_for_user(db.pool(), user_id).await?;
    let total_habits = user_habits.len() as u32;
    let active_streaks = user_habits.iter().filter(|h| h.current_streak > 0).count() as u32;
    let completion_rate = if total_habits > 0 {
        (active_streaks * 100 + total_habits / 2) / total_habits
    } else {
        0
    };

    let activity: BTreeMap<NaiveDate, u32> =
        checkins::activity_for_user(db.pool(), user_id, period.start(today), today)
            .await?
            .into_iter()
            .collect();
    let total_checkins = activity.values().sum();

    let milestones_achieved = milestones::count_for_user(db.pool(), user_id).await?;

    Ok(AnalyticsSummary {
        total_checkins,
        total_habits,
        active_streaks,
        completion_rate,
        milestones_achieved,
        activity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use constrix_core::HabitType;
    use constrix_persistence::sqlite::users;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    #[test]
    fn period_parses_known_tags_only() {
        assert_eq!("7d".parse::<Period>().unwrap(), Period::SevenDays);
        assert_eq!("1y".parse::<Period>().unwrap(), Period::OneYear);
        assert!("90d".parse::<Period>().is_err());
    }

    #[tokio::test]
    async fn summary_counts_only_the_window() {
        let db = Database::connect_in_memory().await.unwrap();
        let user = users::get_or_create(db.pool(), "0x00000000000000000000000000000000000000aa")
            .await
            .unwrap();
        let habit = habits::create(db.pool(), user.id, HabitType::Study)
            .await
            .unwrap();

        // Two recent check-ins plus one far outside a 7-day window
        checkins::insert(db.pool(), habit.id, d(26), None).await.unwrap();
        checkins::insert(db.pool(), habit.id, d(25), None).await.unwrap();
        checkins::insert(db.pool(), habit.id, d(1), None).await.unwrap();
        habits::update_streak(db.pool(), habit.id, 2, 2, Some(d(26)))
            .await
            .unwrap();

        let summary = user_analytics(&db, user.id, Period::SevenDays, d(26))
            .await
            .unwrap();
        assert_eq!(summary.total_checkins, 2);
        assert_eq!(summary.total_habits, 1);
        assert_eq!(summary.active_streaks, 1);
        assert_eq!(summary.completion_rate, 100);
        assert_eq!(summary.activity.get(&d(26)), Some(&1));
        assert!(!summary.activity.contains_key(&d(1)));
    }

    #[tokio::test]
    async fn empty_user_has_zeroes() {
        let db = Database::connect_in_memory().await.unwrap();
        let user = users::get_or_create(db.pool(), "0x00000000000000000000000000000000000000bb")
            .await
            .unwrap();

        let summary = user_analytics(&db, user.id, Period::default(), d(26))
            .await
            .unwrap();
        assert_eq!(summary.total_checkins, 0);
        assert_eq!(summary.completion_rate, 0);
        assert!(summary.activity.is_empty());
    }
}
