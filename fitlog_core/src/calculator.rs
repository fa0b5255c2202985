//! Daily calorie needs from body measurements.
//!
//! BMR uses the Mifflin-St Jeor equation:
//! - Men: `10 × kg + 6.25 × cm − 5 × age + 5`
//! - Women: `10 × kg + 6.25 × cm − 5 × age − 161`
//!
//! TDEE is BMR times an activity multiplier. Weight-loss targets never go
//! below 1.2 × BMR.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const LB_TO_KG: f64 = 0.453592;
const IN_TO_CM: f64 = 2.54;
const BMR_FLOOR_FACTOR: f64 = 1.2;

/// Biological sex used by the BMR equation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

/// Weekly activity level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little to no exercise, desk job
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise, physical job
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Unit system of the weight/height inputs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Kilograms and centimetres
    #[default]
    Metric,
    /// Pounds and inches
    Imperial,
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(format!("unknown sex '{}': expected male or female", other)),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            other => Err(format!(
                "unknown activity level '{}': expected sedentary, light, moderate, active or very_active",
                other
            )),
        }
    }
}

/// Calculator input
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub weight: f64,
    pub height: f64,
    pub age: f64,
    pub sex: Sex,
    pub activity: ActivityLevel,
    #[serde(default)]
    pub unit: UnitSystem,
}

/// Daily targets while losing weight
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeightLossTargets {
    /// About 0.5 lb/week
    pub mild: i64,
    /// About 1 lb/week
    pub moderate: i64,
    /// About 1.5 lb/week
    pub aggressive: i64,
}

/// Daily targets while gaining weight
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeightGainTargets {
    pub mild: i64,
    pub moderate: i64,
}

/// Calculator output, all values in whole kcal/day
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieTargets {
    pub bmr: i64,
    pub maintenance: i64,
    pub weight_loss: WeightLossTargets,
    pub weight_gain: WeightGainTargets,
}

impl BodyProfile {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(ValidationError::InvalidProfile {
                field: "weight",
                message: "please enter a valid weight",
            });
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ValidationError::InvalidProfile {
                field: "height",
                message: "please enter a valid height",
            });
        }
        if !(self.age > 0.0 && self.age <= 120.0) {
            return Err(ValidationError::InvalidProfile {
                field: "age",
                message: "please enter a valid age (1-120)",
            });
        }
        Ok(())
    }

    /// Weight in kilograms and height in centimetres
    fn metric(&self) -> (f64, f64) {
        match self.unit {
            UnitSystem::Metric => (self.weight, self.height),
            UnitSystem::Imperial => (self.weight * LB_TO_KG, self.height * IN_TO_CM),
        }
    }
}

/// Basal metabolic rate (Mifflin-St Jeor), unrounded
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: f64, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Compute daily calorie targets for a profile
pub fn calorie_targets(profile: &BodyProfile) -> Result<CalorieTargets, ValidationError> {
    profile.validate()?;

    let (weight_kg, height_cm) = profile.metric();
    let bmr = basal_metabolic_rate(weight_kg, height_cm, profile.age, profile.sex);
    let tdee = bmr * profile.activity.multiplier();
    let floor = round_kcal(bmr * BMR_FLOOR_FACTOR);

    tracing::debug!(bmr, tdee, "Computed calorie needs for {:?}", profile.activity);

    Ok(CalorieTargets {
        bmr: round_kcal(bmr),
        maintenance: round_kcal(tdee),
        weight_loss: WeightLossTargets {
            mild: round_kcal(tdee - 250.0).max(floor),
            moderate: round_kcal(tdee - 500.0).max(floor),
            aggressive: round_kcal(tdee - 750.0).max(floor),
        },
        weight_gain: WeightGainTargets {
            mild: round_kcal(tdee + 250.0),
            moderate: round_kcal(tdee + 500.0),
        },
    })
}

fn round_kcal(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(sex: Sex, activity: ActivityLevel) -> BodyProfile {
        BodyProfile {
            weight: 70.0,
            height: 175.0,
            age: 30.0,
            sex,
            activity,
            unit: UnitSystem::Metric,
        }
    }

    #[test]
    fn test_male_moderate() {
        // BMR = 700 + 1093.75 - 150 + 5 = 1648.75; TDEE = 2555.56
        let targets = calorie_targets(&profile(Sex::Male, ActivityLevel::Moderate)).unwrap();
        assert_eq!(targets.bmr, 1649);
        assert_eq!(targets.maintenance, 2556);
        assert_eq!(targets.weight_loss.mild, 2306);
        assert_eq!(targets.weight_loss.moderate, 2056);
        // 1805.56 falls under the 1.2 × BMR floor of 1979
        assert_eq!(targets.weight_loss.aggressive, 1979);
        assert_eq!(targets.weight_gain.mild, 2806);
        assert_eq!(targets.weight_gain.moderate, 3056);
    }

    #[test]
    fn test_female_offset() {
        let male = basal_metabolic_rate(60.0, 165.0, 40.0, Sex::Male);
        let female = basal_metabolic_rate(60.0, 165.0, 40.0, Sex::Female);
        assert_eq!(male - female, 166.0);
    }

    #[test]
    fn test_weight_loss_floored_at_bmr_factor() {
        // Sedentary TDEE equals the floor itself, so every loss target is floored
        let targets = calorie_targets(&profile(Sex::Male, ActivityLevel::Sedentary)).unwrap();
        let floor = (1648.75_f64 * 1.2).round() as i64;
        assert_eq!(targets.weight_loss.mild, floor);
        assert_eq!(targets.weight_loss.aggressive, floor);
        assert_eq!(targets.maintenance, floor);
    }

    #[test]
    fn test_imperial_conversion() {
        let mut imperial = profile(Sex::Female, ActivityLevel::Light);
        imperial.weight = 154.0;
        imperial.height = 69.0;
        imperial.unit = UnitSystem::Imperial;

        let bmr = basal_metabolic_rate(154.0 * LB_TO_KG, 69.0 * IN_TO_CM, 30.0, Sex::Female);
        let targets = calorie_targets(&imperial).unwrap();
        assert_eq!(targets.bmr, bmr.round() as i64);
    }

    #[test]
    fn test_rejects_invalid_profile() {
        let mut bad = profile(Sex::Male, ActivityLevel::Active);
        bad.age = 121.0;
        assert!(matches!(
            calorie_targets(&bad),
            Err(ValidationError::InvalidProfile { field: "age", .. })
        ));

        let mut bad = profile(Sex::Male, ActivityLevel::Active);
        bad.weight = 0.0;
        assert!(matches!(
            calorie_targets(&bad),
            Err(ValidationError::InvalidProfile { field: "weight", .. })
        ));
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!("very-active".parse::<ActivityLevel>(), Ok(ActivityLevel::VeryActive));
        assert_eq!("Moderate".parse::<ActivityLevel>(), Ok(ActivityLevel::Moderate));
        assert_eq!("F".parse::<Sex>(), Ok(Sex::Female));
        assert!("athlete".parse::<ActivityLevel>().is_err());
    }
}
