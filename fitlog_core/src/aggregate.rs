//! Day-based aggregations over already-loaded workout records.
//!
//! Calendar days are resolved in a caller-supplied time zone: the binary
//! passes `chrono::Local`, tests pass `Utc`. A day covers
//! `[start of day, start of next day)`.

use crate::{
    CategoryCalories, DailySummary, DailyWorkouts, Dashboard, WeeklySeries, WorkoutRecord,
};
use chrono::{DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use indexmap::IndexMap;

/// Number of days in the trailing window, reference day included
pub const WINDOW_DAYS: u64 = 7;

/// Instant at which `day` starts in `tz`
///
/// When local midnight does not exist (a DST gap) the naive midnight is
/// read as UTC.
pub fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&midnight),
    }
}

/// Half-open `[start, end)` range covering `day` in `tz`
pub fn day_bounds<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(day, tz);
    let end = match day.checked_add_days(Days::new(1)) {
        Some(next) => start_of_day(next, tz),
        None => start + chrono::Duration::days(1),
    };
    (start, end)
}

fn in_range<'a>(
    records: &'a [WorkoutRecord],
    user: &'a str,
    (start, end): (DateTime<Utc>, DateTime<Utc>),
) -> impl Iterator<Item = &'a WorkoutRecord> + 'a {
    records
        .iter()
        .filter(move |w| w.user == user && w.date >= start && w.date < end)
}

/// The user's workouts on `day`, oldest first, with their summed calories
pub fn workouts_on_day<Tz: TimeZone>(
    records: &[WorkoutRecord],
    user: &str,
    day: NaiveDate,
    tz: &Tz,
) -> DailyWorkouts {
    let mut todays_workouts: Vec<WorkoutRecord> =
        in_range(records, user, day_bounds(day, tz)).cloned().collect();
    todays_workouts.sort_by(|a, b| a.date.cmp(&b.date));

    let total_calories_burnt: f64 = todays_workouts.iter().map(|w| w.calories_burned).sum();

    DailyWorkouts {
        todays_workouts,
        total_calories_burnt,
    }
}

/// Totals, average and per-category breakdown for `day`
pub fn daily_summary<Tz: TimeZone>(
    records: &[WorkoutRecord],
    user: &str,
    day: NaiveDate,
    tz: &Tz,
) -> DailySummary {
    let mut total_calories_burnt = 0.0;
    let mut total_workouts: usize = 0;
    let mut by_category: IndexMap<&str, f64> = IndexMap::new();

    for workout in in_range(records, user, day_bounds(day, tz)) {
        total_calories_burnt += workout.calories_burned;
        total_workouts += 1;
        *by_category.entry(workout.category.as_str()).or_insert(0.0) += workout.calories_burned;
    }

    let avg_calories_burnt_per_workout = if total_workouts > 0 {
        total_calories_burnt / total_workouts as f64
    } else {
        0.0
    };

    let pie_chart_data = by_category
        .into_iter()
        .enumerate()
        .map(|(id, (category, total))| CategoryCalories {
            id,
            category: category.to_string(),
            total,
        })
        .collect();

    DailySummary {
        total_calories_burnt,
        total_workouts,
        avg_calories_burnt_per_workout,
        pie_chart_data,
    }
}

/// Calories per day for `reference` and the six days before it, oldest first
///
/// Labels are the day of month followed by a literal "th" ("1th", "22th").
pub fn weekly_series<Tz: TimeZone>(
    records: &[WorkoutRecord],
    user: &str,
    reference: NaiveDate,
    tz: &Tz,
) -> WeeklySeries {
    let mut weeks = Vec::with_capacity(WINDOW_DAYS as usize);
    let mut calories_burned = Vec::with_capacity(WINDOW_DAYS as usize);

    for offset in (0..WINDOW_DAYS).rev() {
        let day = reference
            .checked_sub_days(Days::new(offset))
            .unwrap_or(NaiveDate::MIN);

        let total: f64 = in_range(records, user, day_bounds(day, tz))
            .map(|w| w.calories_burned)
            .sum();

        weeks.push(format!("{}th", day.day()));
        calories_burned.push(total);
    }

    WeeklySeries {
        weeks,
        calories_burned,
    }
}

/// Daily summary for `today` plus the trailing weekly series
pub fn dashboard<Tz: TimeZone>(
    records: &[WorkoutRecord],
    user: &str,
    today: NaiveDate,
    tz: &Tz,
) -> Dashboard {
    let summary = daily_summary(records, user, today, tz);
    let total_weeks_calories_burnt = weekly_series(records, user, today, tz);

    tracing::debug!(
        "Dashboard for {} on {}: {} workouts, {} kcal",
        user,
        today,
        summary.total_workouts,
        summary.total_calories_burnt
    );

    Dashboard {
        summary,
        total_weeks_calories_burnt,
    }
}
