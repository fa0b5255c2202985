//! Calorie-burn estimation.
//!
//! Estimation rules:
//! - Intensity score = (sets × reps × weight) / duration
//! - Intensity picks a MET bucket: >100 → 8.0, >50 → 7.0, >25 → 6.0, else 4.0
//! - Calories = MET × body weight × hours, rounded to 2 decimals

use crate::config::EstimatorConfig;

/// Intensity score used only to choose a MET bucket
///
/// `duration_min` must be positive; callers validate it upstream.
pub fn intensity(sets: u32, reps: u32, weight_kg: f64, duration_min: f64) -> f64 {
    debug_assert!(duration_min > 0.0, "duration must be validated before estimating");
    f64::from(sets) * f64::from(reps) * weight_kg / duration_min
}

/// Metabolic equivalent for an intensity score
pub fn met_for_intensity(intensity: f64) -> f64 {
    if intensity > 100.0 {
        8.0
    } else if intensity > 50.0 {
        7.0
    } else if intensity > 25.0 {
        6.0
    } else {
        4.0
    }
}

/// Estimate calories burned by a workout
pub fn estimate(
    sets: u32,
    reps: u32,
    weight_kg: f64,
    duration_min: f64,
    config: &EstimatorConfig,
) -> f64 {
    let met = met_for_intensity(intensity(sets, reps, weight_kg, duration_min));
    let hours = duration_min / 60.0;
    let calories = met * config.assumed_body_weight_kg * hours;

    tracing::trace!(met, calories, "Estimated workout calories");

    round_to_hundredths(calories)
}

/// Round half away from zero at 2 decimal places
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EstimatorConfig {
        EstimatorConfig::default()
    }

    #[test]
    fn test_bench_press_example() {
        // (4*10*50)/30 = 66.67 → MET 7.0 → 7 * 70 * 0.5
        assert!((intensity(4, 10, 50.0, 30.0) - 66.666).abs() < 0.01);
        assert_eq!(estimate(4, 10, 50.0, 30.0, &cfg()), 245.0);
    }

    #[test]
    fn test_bucket_boundaries_are_strict() {
        assert_eq!(met_for_intensity(100.0), 7.0);
        assert_eq!(met_for_intensity(100.01), 8.0);
        assert_eq!(met_for_intensity(50.0), 6.0);
        assert_eq!(met_for_intensity(25.0), 4.0);
        assert_eq!(met_for_intensity(25.5), 6.0);
        assert_eq!(met_for_intensity(0.0), 4.0);
    }

    #[test]
    fn test_boundary_through_estimate() {
        // intensity exactly 100: 10*10*10/10
        assert_eq!(estimate(10, 10, 10.0, 10.0, &cfg()), 81.67);
        // intensity exactly 50: 5*10*10/10 → MET 6
        assert_eq!(estimate(5, 10, 10.0, 10.0, &cfg()), 70.0);
    }

    #[test]
    fn test_bodyweight_is_low_intensity() {
        // 4 * 70 * 0.25
        assert_eq!(estimate(3, 15, 0.0, 15.0, &cfg()), 70.0);
    }

    #[test]
    fn test_linear_in_duration_within_bucket() {
        // Scale weight with duration so intensity stays 66.67
        let short = estimate(4, 10, 50.0, 30.0, &cfg());
        let long = estimate(4, 10, 100.0, 60.0, &cfg());
        assert_eq!(long, short * 2.0);
    }

    #[test]
    fn test_deterministic_and_non_negative() {
        for &(s, r, w, d) in &[(1, 1, 0.0, 0.5), (5, 5, 200.0, 3.0), (12, 8, 22.5, 47.0)] {
            let a = estimate(s, r, w, d, &cfg());
            let b = estimate(s, r, w, d, &cfg());
            assert_eq!(a, b);
            assert!(a >= 0.0);
        }
    }

    #[test]
    fn test_body_weight_is_injected() {
        let heavy = EstimatorConfig {
            assumed_body_weight_kg: 90.0,
        };
        // 7 * 90 * 0.5
        assert_eq!(estimate(4, 10, 50.0, 30.0, &heavy), 315.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 4 * 70 * (7/60) = 32.6666…
        assert_eq!(estimate(1, 1, 0.0, 7.0, &cfg()), 32.67);
    }
}
