//! CSV export of workout history.
//!
//! The CSV is written to a temp file next to the destination, synced,
//! then renamed over it, so readers never see a half-written export.

use crate::{Error, Result, WorkoutRecord};
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: String,
    date: String,
    category: &'a str,
    workout_name: &'a str,
    sets: u32,
    reps: u32,
    weight_kg: f64,
    duration_min: f64,
    calories_burned: f64,
}

impl<'a> From<&'a WorkoutRecord> for CsvRow<'a> {
    fn from(workout: &'a WorkoutRecord) -> Self {
        CsvRow {
            id: workout.id.to_string(),
            date: workout.date.to_rfc3339(),
            category: &workout.category,
            workout_name: &workout.workout_name,
            sets: workout.sets,
            reps: workout.reps,
            weight_kg: workout.weight,
            duration_min: workout.duration,
            calories_burned: workout.calories_burned,
        }
    }
}

/// Write workouts to `csv_path`, replacing any previous export
///
/// Returns the number of rows written.
pub fn export_csv(workouts: &[WorkoutRecord], csv_path: &Path) -> Result<usize> {
    let dir = match csv_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::Writer::from_writer(temp.as_file());
        for workout in workouts {
            writer.serialize(CsvRow::from(workout))?;
        }
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(csv_path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} workouts to {:?}", workouts.len(), csv_path);
    Ok(workouts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn create_test_workout(name: &str, calories: f64) -> WorkoutRecord {
        WorkoutRecord {
            id: Uuid::new_v4(),
            user: "ana".into(),
            category: "Pull".into(),
            workout_name: name.into(),
            sets: 4,
            reps: 8,
            weight: 40.0,
            duration: 25.0,
            date: Utc.with_ymd_and_hms(2024, 3, 14, 7, 0, 0).unwrap(),
            calories_burned: calories,
        }
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("out").join("workouts.csv");

        let workouts = vec![
            create_test_workout("Rows", 204.17),
            create_test_workout("Pull-ups, weighted", 116.67),
        ];
        let count = export_csv(&workouts, &csv_path).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[3], "workout_name");

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][3], "Pull-ups, weighted");
        assert_eq!(&records[0][8], "204.17");
    }

    #[test]
    fn test_export_replaces_previous_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("workouts.csv");

        export_csv(&[create_test_workout("a", 1.0), create_test_workout("b", 2.0)], &csv_path)
            .unwrap();
        export_csv(&[create_test_workout("c", 3.0)], &csv_path).unwrap();

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 1);
    }

    #[test]
    fn test_export_empty_history() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("workouts.csv");

        assert_eq!(export_csv(&[], &csv_path).unwrap(), 0);
        assert!(csv_path.exists());
    }
}
