use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PREP_TIME_PREFERENCES: [&str; 3] = ["quick", "standard", "any"];
pub const APPETITE_SIZES: [&str; 3] = ["small", "medium", "large"];

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub household_id: Uuid,
    pub risk_level: i32,
    pub prep_time_preference: String,
    pub kids_appetite: String,
    pub onboarding_step: i32,
}

/// Full settings update; `onboarding_step` only moves when provided.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub risk_level: i32,
    pub prep_time_preference: String,
    pub kids_appetite: String,
    #[serde(default)]
    pub onboarding_step: Option<i32>,
}

impl UpdateSettingsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !(0..=10).contains(&self.risk_level) {
            return Err("risk_level must be between 0 and 10".into());
        }
        if !PREP_TIME_PREFERENCES.contains(&self.prep_time_preference.as_str()) {
            return Err("prep_time_preference must be quick, standard or any".into());
        }
        if !APPETITE_SIZES.contains(&self.kids_appetite.as_str()) {
            return Err("kids_appetite must be small, medium or large".into());
        }
        if let Some(step) = self.onboarding_step {
            if !(1..=5).contains(&step) {
                return Err("onboarding_step must be between 1 and 5".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(risk: i32, prep: &str, appetite: &str) -> UpdateSettingsRequest {
        UpdateSettingsRequest {
            risk_level: risk,
            prep_time_preference: prep.into(),
            kids_appetite: appetite.into(),
            onboarding_step: None,
        }
    }

    #[test]
    fn accepts_known_values() {
        assert!(request(0, "quick", "small").validate().is_ok());
        assert!(request(10, "any", "large").validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_risk() {
        assert!(request(11, "standard", "medium").validate().is_err());
        assert!(request(-1, "standard", "medium").validate().is_err());
    }

    #[test]
    fn rejects_unknown_enums() {
        assert!(request(5, "instant", "medium").validate().is_err());
        assert!(request(5, "standard", "huge").validate().is_err());
    }

    #[test]
    fn rejects_bad_onboarding_step() {
        let mut req = request(5, "standard", "medium");
        req.onboarding_step = Some(9);
        assert!(req.validate().is_err());
    }
}
