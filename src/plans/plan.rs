use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical weekday, ordered Monday first. Serializes as the English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

pub const DAYS: [Day; 7] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
    Day::Sunday,
];

impl Day {
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-normalizes the input (first letter upper, rest lower) before matching,
/// so "monday", "MONDAY" and "Monday" all parse to the same value.
impl FromStr for Day {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_day_name(s.trim()).as_str() {
            "Monday" => Ok(Day::Monday),
            "Tuesday" => Ok(Day::Tuesday),
            "Wednesday" => Ok(Day::Wednesday),
            "Thursday" => Ok(Day::Thursday),
            "Friday" => Ok(Day::Friday),
            "Saturday" => Ok(Day::Saturday),
            "Sunday" => Ok(Day::Sunday),
            other => anyhow::bail!("unknown day name: {other}"),
        }
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub fn normalize_day_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Lunch,
    Dinner,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Lunch => "lunch",
            Slot::Dinner => "dinner",
        }
    }
}

/// Meals for one day. `None` means the slot was never requested and is
/// omitted from JSON; `Some("")` means requested but not yet resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMeals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<String>,
}

impl DayMeals {
    pub fn slot(&self, slot: Slot) -> Option<&String> {
        match slot {
            Slot::Lunch => self.lunch.as_ref(),
            Slot::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn set_slot(&mut self, slot: Slot, value: String) {
        match slot {
            Slot::Lunch => self.lunch = Some(value),
            Slot::Dinner => self.dinner = Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lunch.is_none() && self.dinner.is_none()
    }
}

/// A week's plan keyed by day. BTreeMap over [`Day`] keeps the canonical
/// Monday-first order through serialization.
pub type WeekPlan = BTreeMap<Day, DayMeals>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parse_normalizes_case() {
        assert_eq!("monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("WEDNESDAY".parse::<Day>().unwrap(), Day::Wednesday);
        assert_eq!("sunDAY".parse::<Day>().unwrap(), Day::Sunday);
    }

    #[test]
    fn day_parse_rejects_unknown() {
        assert!("Mondy".parse::<Day>().is_err());
        assert!("".parse::<Day>().is_err());
    }

    #[test]
    fn normalization_is_idempotent() {
        for day in DAYS {
            assert_eq!(normalize_day_name(day.as_str()), day.as_str());
        }
        assert_eq!(normalize_day_name("friday"), "Friday");
        assert_eq!(normalize_day_name(&normalize_day_name("friday")), "Friday");
    }

    #[test]
    fn week_plan_serializes_in_canonical_order() {
        let mut plan = WeekPlan::new();
        plan.insert(
            Day::Sunday,
            DayMeals {
                lunch: Some("Soup".into()),
                dinner: None,
            },
        );
        plan.insert(
            Day::Monday,
            DayMeals {
                lunch: None,
                dinner: Some("Pasta".into()),
            },
        );

        let json = serde_json::to_string(&plan).unwrap();
        let monday = json.find("Monday").unwrap();
        let sunday = json.find("Sunday").unwrap();
        assert!(monday < sunday);
    }

    #[test]
    fn unrequested_slots_are_absent_from_json() {
        let meals = DayMeals {
            lunch: Some(String::new()),
            dinner: None,
        };
        let json = serde_json::to_value(&meals).unwrap();
        assert_eq!(json, serde_json::json!({ "lunch": "" }));
    }

    #[test]
    fn plan_round_trips_through_json() {
        let mut plan = WeekPlan::new();
        plan.insert(
            Day::Tuesday,
            DayMeals {
                lunch: Some("Wraps".into()),
                dinner: Some("Fish pie".into()),
            },
        );
        let value = serde_json::to_value(&plan).unwrap();
        let back: WeekPlan = serde_json::from_value(value).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn plan_deserializes_lowercase_day_keys() {
        let back: WeekPlan =
            serde_json::from_value(serde_json::json!({ "thursday": { "dinner": "Curry" } }))
                .unwrap();
        assert_eq!(
            back.get(&Day::Thursday).unwrap().dinner.as_deref(),
            Some("Curry")
        );
    }
}
