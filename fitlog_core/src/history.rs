//! Workout history loading for one user.
//!
//! The aggregations in [`crate::aggregate`] never touch the filesystem; this
//! module fetches the slice of the log they need.

use crate::{Result, WorkoutRecord};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;

/// Load a user's workouts dated at or after `since`, oldest first
///
/// `None` loads the whole history. Records repeated under the same id are
/// kept once.
pub fn load_user_workouts(
    log_path: &Path,
    user: &str,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<WorkoutRecord>> {
    let mut seen_ids = HashSet::new();
    let mut workouts: Vec<WorkoutRecord> = crate::store::read_workouts(log_path)?
        .into_iter()
        .filter(|w| w.user == user)
        .filter(|w| since.map_or(true, |cutoff| w.date >= cutoff))
        .filter(|w| {
            let fresh = seen_ids.insert(w.id);
            if !fresh {
                tracing::warn!("Skipping duplicate workout {}", w.id);
            }
            fresh
        })
        .collect();

    workouts.sort_by(|a, b| a.date.cmp(&b.date));

    tracing::info!("Loaded {} workouts for {}", workouts.len(), user);

    Ok(workouts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonlStore, WorkoutSink};
    use chrono::Duration;
    use uuid::Uuid;

    fn create_test_workout(user: &str, name: &str, days_ago: i64) -> WorkoutRecord {
        WorkoutRecord {
            id: Uuid::new_v4(),
            user: user.into(),
            category: "Legs".into(),
            workout_name: name.into(),
            sets: 3,
            reps: 8,
            weight: 60.0,
            duration: 20.0,
            date: Utc::now() - Duration::days(days_ago),
            calories_burned: 93.33,
        }
    }

    #[test]
    fn test_filters_by_user_and_cutoff() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = JsonlStore::in_dir(temp_dir.path());

        store.append(&create_test_workout("ana", "recent", 1)).unwrap();
        store.append(&create_test_workout("ana", "older", 3)).unwrap();
        store.append(&create_test_workout("ana", "too old", 10)).unwrap();
        store.append(&create_test_workout("ben", "other user", 1)).unwrap();

        let cutoff = Utc::now() - Duration::days(7);
        let workouts = load_user_workouts(store.path(), "ana", Some(cutoff)).unwrap();
        assert_eq!(workouts.len(), 2);

        let all = load_user_workouts(store.path(), "ana", None).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_sorted_oldest_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = JsonlStore::in_dir(temp_dir.path());

        store.append(&create_test_workout("ana", "new", 1)).unwrap();
        store.append(&create_test_workout("ana", "old", 5)).unwrap();

        let workouts = load_user_workouts(store.path(), "ana", None).unwrap();
        assert_eq!(workouts[0].workout_name, "old");
        assert_eq!(workouts[1].workout_name, "new");
    }

    #[test]
    fn test_duplicate_ids_kept_once() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = JsonlStore::in_dir(temp_dir.path());

        let workout = create_test_workout("ana", "twice", 0);
        store.append(&workout).unwrap();
        store.append(&workout).unwrap();

        let workouts = load_user_workouts(store.path(), "ana", None).unwrap();
        assert_eq!(workouts.len(), 1);
    }

    #[test]
    fn test_missing_log_is_empty_history() {
        let temp_dir = tempfile::tempdir().unwrap();
        let workouts =
            load_user_workouts(&temp_dir.path().join("workouts.jsonl"), "ana", None).unwrap();
        assert!(workouts.is_empty());
    }
}
