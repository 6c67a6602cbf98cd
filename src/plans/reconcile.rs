use serde_json::Value;

use super::plan::{DayMeals, Slot, WeekPlan};

/// Placeholder written into any requested slot the model failed to fill.
pub const UNRESOLVED_MEAL: &str = "TBD";

/// Overlays the model's plan onto the skeleton, slot by slot.
///
/// The skeleton is the sole source of truth for shape: slots absent from it
/// never make it into the output, whatever the model invented. The model's
/// response is the sole source of truth for content within that shape; a
/// missing or empty value falls back to [`UNRESOLVED_MEAL`].
pub fn reconcile(skeleton: &WeekPlan, ai_plan: &Value) -> WeekPlan {
    let mut merged = WeekPlan::new();

    for (day, requested) in skeleton {
        let ai_day = ai_plan.get(day.as_str());
        let mut meals = DayMeals::default();

        for slot in [Slot::Lunch, Slot::Dinner] {
            if requested.slot(slot).is_none() {
                continue;
            }
            let value = ai_day
                .and_then(|d| d.get(slot.as_str()))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(UNRESOLVED_MEAL);
            meals.set_slot(slot, value.to_string());
        }

        merged.insert(*day, meals);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::plan::Day;
    use serde_json::json;

    fn skeleton_of(entries: &[(Day, Option<&str>, Option<&str>)]) -> WeekPlan {
        entries
            .iter()
            .map(|(day, lunch, dinner)| {
                (
                    *day,
                    DayMeals {
                        lunch: lunch.map(str::to_string),
                        dinner: dinner.map(str::to_string),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn output_shape_equals_skeleton_shape() {
        let skeleton = skeleton_of(&[
            (Day::Monday, Some(""), None),
            (Day::Wednesday, None, Some("")),
        ]);
        let ai_plan = json!({
            "Monday": { "lunch": "Pasta", "dinner": "Invented dinner" },
            "Tuesday": { "dinner": "Soup" },
            "Friday": { "lunch": "Extra" },
        });

        let merged = reconcile(&skeleton, &ai_plan);

        assert_eq!(merged.len(), 2);
        let monday = merged.get(&Day::Monday).unwrap();
        assert_eq!(monday.lunch.as_deref(), Some("Pasta"));
        assert!(monday.dinner.is_none());
        assert!(!merged.contains_key(&Day::Tuesday));
        assert!(!merged.contains_key(&Day::Friday));
    }

    #[test]
    fn missing_and_empty_slots_become_placeholder() {
        let skeleton = skeleton_of(&[
            (Day::Monday, Some(""), Some("")),
            (Day::Thursday, Some(""), None),
        ]);
        let ai_plan = json!({
            "Monday": { "lunch": "", "dinner": "   " },
        });

        let merged = reconcile(&skeleton, &ai_plan);

        let monday = merged.get(&Day::Monday).unwrap();
        assert_eq!(monday.lunch.as_deref(), Some(UNRESOLVED_MEAL));
        assert_eq!(monday.dinner.as_deref(), Some(UNRESOLVED_MEAL));
        let thursday = merged.get(&Day::Thursday).unwrap();
        assert_eq!(thursday.lunch.as_deref(), Some(UNRESOLVED_MEAL));
    }

    #[test]
    fn extra_days_dropped_and_unfilled_slots_backfilled() {
        let skeleton = skeleton_of(&[
            (Day::Monday, Some(""), None),
            (Day::Wednesday, None, Some("")),
        ]);
        let ai_plan = json!({
            "Monday": { "lunch": "Pasta" },
            "Tuesday": { "dinner": "Soup" },
        });

        let merged = reconcile(&skeleton, &ai_plan);

        let expected = skeleton_of(&[
            (Day::Monday, Some("Pasta"), None),
            (Day::Wednesday, None, Some(UNRESOLVED_MEAL)),
        ]);
        assert_eq!(merged, expected);
    }

    #[test]
    fn non_string_slot_values_are_treated_as_missing() {
        let skeleton = skeleton_of(&[(Day::Monday, Some(""), None)]);
        let ai_plan = json!({ "Monday": { "lunch": { "name": "Pasta" } } });

        let merged = reconcile(&skeleton, &ai_plan);
        assert_eq!(
            merged.get(&Day::Monday).unwrap().lunch.as_deref(),
            Some(UNRESOLVED_MEAL)
        );
    }
}
