//! Free-text workout parser.
//!
//! Two layouts are accepted:
//!
//! ```text
//! Bench Press          Bench Press
//! 4 sets x 10 reps     4
//! 50 kg                10
//! 30 min               50
//!                      30
//! ```
//!
//! The compact four-line form packs sets and reps into one line; five or
//! more lines carry one number each. Anything past the fifth line is ignored.

use crate::error::{ValidationError, WorkoutField};
use crate::{NewWorkout, WorkoutMetrics};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static SETS_REPS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*sets?\s*x\s*(\d+)\s*reps?").expect("valid sets/reps pattern")
});

static FIRST_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number pattern"));

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid integer pattern"));

static LEADING_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+))").expect("valid decimal pattern")
});

/// Minimum number of lines in a workout description
pub const MIN_LINES: usize = 4;

/// Parse one workout from its lines
///
/// `category` comes from the caller and `now` becomes the workout date.
pub fn parse_workout<S: AsRef<str>>(
    lines: &[S],
    category: &str,
    now: DateTime<Utc>,
) -> Result<NewWorkout, ValidationError> {
    let (name, sets, reps, weight, duration) = match lines {
        [] | [_] | [_, _] | [_, _, _] => {
            tracing::debug!("Rejecting workout for {}: {} lines", category, lines.len());
            return Err(ValidationError::InsufficientData { lines: lines.len() });
        }
        [name, sets_reps, weight, duration] => {
            let (sets, reps) = parse_sets_reps(sets_reps.as_ref())?;
            let weight = first_number(WorkoutField::Weight, weight.as_ref())?;
            let duration = first_number(WorkoutField::Duration, duration.as_ref())?;
            (name, sets, reps, weight, duration)
        }
        [name, sets, reps, weight, duration, ..] => (
            name,
            leading_integer(WorkoutField::Sets, sets.as_ref())?,
            leading_integer(WorkoutField::Reps, reps.as_ref())?,
            leading_decimal(WorkoutField::Weight, weight.as_ref())?,
            leading_decimal(WorkoutField::Duration, duration.as_ref())?,
        ),
    };

    let metrics = WorkoutMetrics::new(sets, reps, weight, duration)?;

    Ok(NewWorkout {
        category: category.to_string(),
        workout_name: name.as_ref().trim().to_string(),
        metrics,
        date: now,
    })
}

/// Split a block of text into lines and parse it, skipping blank lines
pub fn parse_workout_text(
    text: &str,
    category: &str,
    now: DateTime<Utc>,
) -> Result<NewWorkout, ValidationError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    parse_workout(&lines, category, now)
}

/// Extract sets and reps from a line like `5 setsX15 reps`
fn parse_sets_reps(line: &str) -> Result<(i64, i64), ValidationError> {
    let caps = SETS_REPS
        .captures(line)
        .ok_or_else(|| ValidationError::InvalidSetsRepsFormat {
            line: line.to_string(),
        })?;

    let sets = parse_integer(WorkoutField::Sets, &caps[1])?;
    let reps = parse_integer(WorkoutField::Reps, &caps[2])?;
    Ok((sets, reps))
}

/// First numeric token in the line; a line without one reads as zero
fn first_number(field: WorkoutField, line: &str) -> Result<f64, ValidationError> {
    match FIRST_NUMBER.find(line) {
        Some(m) => parse_decimal(field, m.as_str()),
        None => Ok(0.0),
    }
}

/// Leading integer prefix of the line (`"10 reps"` → 10)
fn leading_integer(field: WorkoutField, line: &str) -> Result<i64, ValidationError> {
    let caps = LEADING_INTEGER
        .captures(line)
        .ok_or_else(|| non_numeric(field, line))?;
    parse_integer(field, &caps[1])
}

/// Leading decimal prefix of the line (`"22.5kg"` → 22.5)
fn leading_decimal(field: WorkoutField, line: &str) -> Result<f64, ValidationError> {
    let caps = LEADING_DECIMAL
        .captures(line)
        .ok_or_else(|| non_numeric(field, line))?;
    parse_decimal(field, &caps[1])
}

fn parse_integer(field: WorkoutField, token: &str) -> Result<i64, ValidationError> {
    token.parse::<i64>().map_err(|_| non_numeric(field, token))
}

fn parse_decimal(field: WorkoutField, token: &str) -> Result<f64, ValidationError> {
    token.parse::<f64>().map_err(|_| non_numeric(field, token))
}

fn non_numeric(field: WorkoutField, value: &str) -> ValidationError {
    ValidationError::NonNumericField {
        field,
        value: value.to_string(),
    }
}
