//! Workout field validation.
//!
//! Every workout passes through here before it can be estimated or
//! persisted, whichever path (free text or structured request) created it.

use crate::error::{ValidationError, WorkoutField};
use crate::WorkoutMetrics;

impl WorkoutMetrics {
    /// Validate raw numeric fields
    ///
    /// Rules:
    /// 1. weight and duration must not be NaN or infinite
    /// 2. sets > 0, reps > 0, weight >= 0, duration > 0
    pub fn new(
        sets: i64,
        reps: i64,
        weight_kg: f64,
        duration_min: f64,
    ) -> Result<Self, ValidationError> {
        ensure_finite(WorkoutField::Weight, weight_kg)?;
        ensure_finite(WorkoutField::Duration, duration_min)?;

        let sets = positive_count(WorkoutField::Sets, sets)?;
        let reps = positive_count(WorkoutField::Reps, reps)?;

        if weight_kg < 0.0 {
            return Err(out_of_range(WorkoutField::Weight, weight_kg));
        }
        if duration_min <= 0.0 {
            return Err(out_of_range(WorkoutField::Duration, duration_min));
        }

        Ok(WorkoutMetrics {
            sets,
            reps,
            weight_kg,
            duration_min,
        })
    }
}

fn ensure_finite(field: WorkoutField, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonNumericField {
            field,
            value: value.to_string(),
        })
    }
}

fn positive_count(field: WorkoutField, value: i64) -> Result<u32, ValidationError> {
    match u32::try_from(value) {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(out_of_range(field, value)),
    }
}

fn out_of_range(field: WorkoutField, value: impl ToString) -> ValidationError {
    ValidationError::OutOfRangeField {
        field,
        value: value.to_string(),
    }
}
