use serde::{Deserialize, Serialize};

use super::plan::{Day, Slot, WeekPlan};
use super::skeleton::SelectionMap;

/// Full-week generation request. `week_start` defaults to the current week
/// (most recent Monday) when omitted.
#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    #[serde(default)]
    pub week_start: Option<String>,
    pub days: SelectionMap,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub week_start: String,
    pub plan: WeekPlan,
}

/// Single-slot reshuffle request.
#[derive(Debug, Deserialize)]
pub struct ReshuffleRequest {
    #[serde(default)]
    pub week_start: Option<String>,
    pub day: Day,
    pub slot: Slot,
    pub existing_meal: String,
}

#[derive(Debug, Serialize)]
pub struct ReshuffleResponse {
    pub meal: String,
}

/// Client-side plan edit (swap-for-favourite); replaces the stored plan.
#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub plan: WeekPlan,
}

#[derive(Debug, Deserialize, Default)]
pub struct CopyLastWeekRequest {
    #[serde(default)]
    pub week_start: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_parses_selection_map() {
        let req: GeneratePlanRequest = serde_json::from_value(serde_json::json!({
            "days": {
                "Monday": { "lunch": true, "dinner": false },
                "tuesday": { "dinner": true },
            }
        }))
        .unwrap();
        assert!(req.week_start.is_none());
        assert_eq!(req.days.len(), 2);
    }

    #[test]
    fn reshuffle_request_parses_slot() {
        let req: ReshuffleRequest = serde_json::from_value(serde_json::json!({
            "day": "friday",
            "slot": "dinner",
            "existing_meal": "Fish pie",
        }))
        .unwrap();
        assert_eq!(req.day, Day::Friday);
        assert_eq!(req.slot, Slot::Dinner);
    }
}
