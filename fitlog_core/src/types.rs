//! Core domain types for fitlog.
//!
//! This module defines the fundamental types used throughout the system:
//! - Validated workout metrics and workout candidates
//! - Persisted workout records
//! - Aggregation results for the daily dashboard and weekly series

use crate::config::EstimatorConfig;
use crate::error::{ValidationError, WorkoutField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Workout Types
// ============================================================================

/// Numeric workout parameters that passed validation.
///
/// Build these through [`WorkoutMetrics::new`], which enforces
/// `sets>0, reps>0, weight>=0, duration>0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkoutMetrics {
    pub sets: u32,
    pub reps: u32,
    pub weight_kg: f64,
    pub duration_min: f64,
}

/// A workout that has been parsed or mapped from a request but not yet
/// assigned an owner or a calorie estimate.
#[derive(Clone, Debug, PartialEq)]
pub struct NewWorkout {
    pub category: String,
    pub workout_name: String,
    pub metrics: WorkoutMetrics,
    pub date: DateTime<Utc>,
}

/// A persisted workout.
///
/// `calories_burned` is computed once at creation and never recomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub user: String,
    pub category: String,
    pub workout_name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub duration: f64,
    pub date: DateTime<Utc>,
    pub calories_burned: f64,
}

impl WorkoutRecord {
    /// Assign an id and owner to a candidate and estimate its calories
    ///
    /// Fails when the estimate overflows, so every stored record carries a
    /// finite calorie value.
    pub fn create(
        user: &str,
        workout: NewWorkout,
        estimator: &EstimatorConfig,
    ) -> Result<Self, ValidationError> {
        let m = workout.metrics;
        let calories_burned =
            crate::estimator::estimate(m.sets, m.reps, m.weight_kg, m.duration_min, estimator);
        if !calories_burned.is_finite() {
            return Err(ValidationError::OutOfRangeField {
                field: WorkoutField::Duration,
                value: m.duration_min.to_string(),
            });
        }

        tracing::debug!(
            "Created workout '{}' ({}) for {}: {} kcal",
            workout.workout_name,
            workout.category,
            user,
            calories_burned
        );

        Ok(WorkoutRecord {
            id: Uuid::new_v4(),
            user: user.to_string(),
            category: workout.category,
            workout_name: workout.workout_name,
            sets: m.sets,
            reps: m.reps,
            weight: m.weight_kg,
            duration: m.duration_min,
            date: workout.date,
            calories_burned,
        })
    }
}

// ============================================================================
// Aggregation Types
// ============================================================================

/// Workouts logged on one calendar day
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWorkouts {
    pub todays_workouts: Vec<WorkoutRecord>,
    pub total_calories_burnt: f64,
}

/// Calories for one category, in first-appearance order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryCalories {
    pub id: usize,
    pub category: String,
    pub total: f64,
}

/// Totals for one calendar day
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub total_calories_burnt: f64,
    pub total_workouts: usize,
    pub avg_calories_burnt_per_workout: f64,
    pub pie_chart_data: Vec<CategoryCalories>,
}

/// Seven-day trailing calorie series, oldest first
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySeries {
    pub weeks: Vec<String>,
    pub calories_burned: Vec<f64>,
}

/// Everything the dashboard shows for one user
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(flatten)]
    pub summary: DailySummary,
    pub total_weeks_calories_burnt: WeeklySeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_workout(weight_kg: f64, duration_min: f64) -> NewWorkout {
        NewWorkout {
            category: "Push".into(),
            workout_name: "Bench Press".into(),
            metrics: WorkoutMetrics::new(4, 10, weight_kg, duration_min).unwrap(),
            date: Utc::now(),
        }
    }

    #[test]
    fn test_create_estimates_calories() {
        let record =
            WorkoutRecord::create("ana", new_workout(50.0, 30.0), &EstimatorConfig::default())
                .unwrap();
        assert_eq!(record.user, "ana");
        assert_eq!(record.sets, 4);
        assert_eq!(record.calories_burned, 245.0);
    }

    #[test]
    fn test_create_rejects_overflowing_estimate() {
        let result =
            WorkoutRecord::create("ana", new_workout(50.0, 1e308), &EstimatorConfig::default());
        assert!(matches!(
            result,
            Err(ValidationError::OutOfRangeField {
                field: WorkoutField::Duration,
                ..
            })
        ));
    }

    #[test]
    fn test_huge_finite_weight_still_estimates() {
        let record =
            WorkoutRecord::create("ana", new_workout(1e300, 60.0), &EstimatorConfig::default())
                .unwrap();
        assert_eq!(record.calories_burned, 560.0);
    }
}
