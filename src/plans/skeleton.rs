use std::collections::BTreeMap;

use serde::Deserialize;

use super::plan::{Day, DayMeals, WeekPlan, DAYS};

/// Which slots the caller wants generated for one day.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DaySelection {
    #[serde(default)]
    pub lunch: bool,
    #[serde(default)]
    pub dinner: bool,
}

pub type SelectionMap = BTreeMap<Day, DaySelection>;

/// Builds the plan skeleton from the caller's day/slot selection.
///
/// Only requested slots appear, initialized to the empty-string placeholder.
/// A day with neither slot requested is omitted entirely. Days come out in
/// canonical Monday-first order whatever order (or casing) they arrived in.
pub fn build_skeleton(selection: &SelectionMap) -> WeekPlan {
    let mut skeleton = WeekPlan::new();
    for day in DAYS {
        let Some(cfg) = selection.get(&day) else {
            continue;
        };
        let mut meals = DayMeals::default();
        if cfg.lunch {
            meals.lunch = Some(String::new());
        }
        if cfg.dinner {
            meals.dinner = Some(String::new());
        }
        if !meals.is_empty() {
            skeleton.insert(day, meals);
        }
    }
    skeleton
}

pub fn has_any_selection(selection: &SelectionMap) -> bool {
    selection.values().any(|cfg| cfg.lunch || cfg.dinner)
}
