use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Household acceptance tier for a food or meal.
///
/// `neutral` survives in older clients as a spelling of the middle tier and
/// is accepted on input; `amber` is what we store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Green,
    #[serde(alias = "neutral")]
    Amber,
    Red,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Green => "green",
            Rating::Amber => "amber",
            Rating::Red => "red",
        }
    }

    /// Deterministic band for a confidence score: <=3 red, <=6 amber,
    /// above that green.
    pub fn from_confidence(score: i32) -> Rating {
        if score <= 3 {
            Rating::Red
        } else if score <= 6 {
            Rating::Amber
        } else {
            Rating::Green
        }
    }
}

impl FromStr for Rating {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(Rating::Green),
            "amber" | "neutral" => Ok(Rating::Amber),
            "red" => Ok(Rating::Red),
            other => anyhow::bail!("unknown rating: {other}"),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meals are composite dishes; foods are single ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Meal,
    Food,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Meal => "meal",
            ItemKind::Food => "food",
        }
    }
}

impl FromStr for ItemKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meal" => Ok(ItemKind::Meal),
            "food" => Ok(ItemKind::Food),
            other => anyhow::bail!("unknown item kind: {other}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemDto {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub category: Option<String>,
    pub rating: String,
    pub confidence_score: Option<i32>,
    pub is_favourite: bool,
}

#[derive(Debug, Serialize)]
pub struct GroupedItemsResponse {
    pub green: Vec<ItemDto>,
    pub amber: Vec<ItemDto>,
    pub red: Vec<ItemDto>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkItemEntry {
    pub name: String,
    pub kind: ItemKind,
}

/// Onboarding seeding: everything lands on the green list.
#[derive(Debug, Deserialize)]
pub struct BulkCreateRequest {
    pub items: Vec<BulkItemEntry>,
}

#[derive(Debug, Serialize)]
pub struct BulkCreateResponse {
    pub created: usize,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub confidence_score: Option<i32>,
    #[serde(default)]
    pub is_favourite: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    #[serde(default)]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_thresholds() {
        assert_eq!(Rating::from_confidence(0), Rating::Red);
        assert_eq!(Rating::from_confidence(3), Rating::Red);
        assert_eq!(Rating::from_confidence(4), Rating::Amber);
        assert_eq!(Rating::from_confidence(6), Rating::Amber);
        assert_eq!(Rating::from_confidence(7), Rating::Green);
        assert_eq!(Rating::from_confidence(10), Rating::Green);
    }

    #[test]
    fn rating_accepts_neutral_alias() {
        assert_eq!("neutral".parse::<Rating>().unwrap(), Rating::Amber);
        let parsed: Rating = serde_json::from_str("\"neutral\"").unwrap();
        assert_eq!(parsed, Rating::Amber);
    }

    #[test]
    fn rating_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Rating::Amber).unwrap(), "\"amber\"");
    }

    #[test]
    fn item_kind_round_trip() {
        assert_eq!("meal".parse::<ItemKind>().unwrap(), ItemKind::Meal);
        assert_eq!(ItemKind::Food.as_str(), "food");
        assert!("snack".parse::<ItemKind>().is_err());
    }
}
