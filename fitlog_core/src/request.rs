//! Typed request schemas for creating and querying workouts.
//!
//! Loose JSON bodies are deserialized into these structs first, so absent
//! fields are explicit `None`s rather than values that turn into NaN later.

use crate::aggregate::start_of_day;
use crate::error::ValidationError;
use crate::{NewWorkout, WorkoutMetrics};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

/// Body of a "create workout" request
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    pub category: Option<String>,
    pub workout_name: Option<String>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration: Option<f64>,
    pub date: Option<String>,
}

impl CreateWorkoutRequest {
    /// Validate the request into a workout candidate
    ///
    /// Missing numeric fields read as 0, which the range checks then reject.
    /// A date-only `date` means midnight of that day in `tz`; without a date
    /// the workout is dated `now`.
    pub fn into_new_workout<Tz: TimeZone>(
        self,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<NewWorkout, ValidationError> {
        let category = required(self.category, "category")?;
        let workout_name = required(self.workout_name, "workoutName")?;

        let date = match self.date.as_deref() {
            Some(raw) => parse_instant(raw, tz)?,
            None => now,
        };

        let metrics = WorkoutMetrics::new(
            self.sets.unwrap_or(0),
            self.reps.unwrap_or(0),
            self.weight.unwrap_or(0.0),
            self.duration.unwrap_or(0.0),
        )?;

        Ok(NewWorkout {
            category,
            workout_name,
            metrics,
            date,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ValidationError::MissingRequiredField(field)),
    }
}

/// Date-only formats accepted in requests, tried in order
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

fn parse_date_only(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Calendar day named by `raw`
///
/// Accepts `MM/DD/YYYY`, `YYYY-MM-DD`, or an RFC 3339 timestamp, which is
/// converted to `tz` before taking its date.
pub fn parse_day<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if let Some(day) = parse_date_only(raw) {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(tz).date_naive())
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Instant named by `raw`; date-only forms mean the start of that day in `tz`
pub fn parse_instant<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if let Some(day) = parse_date_only(raw) {
        return Ok(start_of_day(day, tz));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}
