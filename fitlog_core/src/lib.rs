#![forbid(unsafe_code)]

//! Core domain model and business logic for fitlog.
//!
//! This crate provides:
//! - Domain types (workout metrics, records, dashboard aggregates)
//! - Validation and free-text workout parsing
//! - Calorie-burn estimation and daily calorie-needs calculation
//! - Day, dashboard and weekly aggregations
//! - Persistence (JSONL workout log, CSV export)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod validate;
pub mod parser;
pub mod estimator;
pub mod aggregate;
pub mod request;
pub mod calculator;
pub mod store;
pub mod history;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result, ValidationError, WorkoutField};
pub use types::*;
pub use config::{Config, EstimatorConfig};
pub use parser::{parse_workout, parse_workout_text};
pub use estimator::estimate;
pub use aggregate::{daily_summary, dashboard, weekly_series, workouts_on_day};
pub use request::CreateWorkoutRequest;
pub use calculator::{calorie_targets, BodyProfile, CalorieTargets};
pub use store::{JsonlStore, WorkoutSink};
pub use history::load_user_workouts;
pub use export::export_csv;
