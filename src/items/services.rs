use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::items::dto::Rating;
use crate::items::repo::RatedItem;

/// Item names classified into the three acceptance tiers.
#[derive(Debug, Default, Clone)]
pub struct RatedNames {
    pub green: Vec<String>,
    pub amber: Vec<String>,
    pub red: Vec<String>,
}

pub fn classify_names(items: &[RatedItem]) -> RatedNames {
    let mut lists = RatedNames::default();
    for item in items {
        match item.rating.parse::<Rating>() {
            Ok(Rating::Green) => lists.green.push(item.name.clone()),
            Ok(Rating::Amber) => lists.amber.push(item.name.clone()),
            Ok(Rating::Red) => lists.red.push(item.name.clone()),
            // Unknown spellings in old rows are skipped rather than guessed at.
            Err(_) => continue,
        }
    }
    lists
}

/// Confidence assumed for rows that never had a score set.
const DEFAULT_CONFIDENCE: i32 = 5;

pub(crate) fn name_appears_in(meal: &str, food_name: &str) -> bool {
    let food = food_name.trim();
    !food.is_empty() && meal.to_lowercase().contains(&food.to_lowercase())
}

/// Heuristic learning step for a rejected meal: every green or amber food
/// whose name appears in the meal string loses one point of confidence
/// (floor 0), and its band is re-derived from the new score.
pub async fn apply_rejection_downgrade(
    db: &PgPool,
    household_id: Uuid,
    rejected_meal: &str,
) -> anyhow::Result<usize> {
    let foods = RatedItem::list_for_household(db, household_id, Some("food")).await?;

    let mut downgraded = 0;
    for food in &foods {
        let rating = match food.rating.parse::<Rating>() {
            Ok(r) => r,
            Err(_) => continue,
        };
        if rating == Rating::Red || !name_appears_in(rejected_meal, &food.name) {
            continue;
        }

        let score = (food.confidence_score.unwrap_or(DEFAULT_CONFIDENCE) - 1).max(0);
        let new_rating = Rating::from_confidence(score);

        RatedItem::update_link(
            db,
            household_id,
            food.item_id,
            Some(new_rating.as_str()),
            Some(score),
            None,
        )
        .await?;

        debug!(
            food = %food.name,
            score,
            rating = %new_rating,
            "confidence lowered after rejection"
        );
        downgraded += 1;
    }

    if downgraded > 0 {
        info!(household_id = %household_id, downgraded, "rejection downgrade applied");
    }
    Ok(downgraded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(name: &str, kind: &str, rating: &str) -> RatedItem {
        RatedItem {
            item_id: Uuid::new_v4(),
            name: name.into(),
            kind: kind.into(),
            category: None,
            rating: rating.into(),
            confidence_score: None,
            is_favourite: false,
        }
    }

    #[test]
    fn classify_buckets_by_rating() {
        let items = vec![
            rated("Chicken", "food", "green"),
            rated("Broccoli", "food", "amber"),
            rated("Mushrooms", "food", "red"),
            rated("Peas", "food", "neutral"),
        ];
        let lists = classify_names(&items);
        assert_eq!(lists.green, vec!["Chicken"]);
        assert_eq!(lists.amber, vec!["Broccoli", "Peas"]);
        assert_eq!(lists.red, vec!["Mushrooms"]);
    }

    #[test]
    fn classify_skips_unknown_ratings() {
        let items = vec![rated("Mystery", "food", "purple")];
        let lists = classify_names(&items);
        assert!(lists.green.is_empty() && lists.amber.is_empty() && lists.red.is_empty());
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        assert!(name_appears_in("Chicken and rice bowl", "chicken"));
        assert!(name_appears_in("Creamy BROCCOLI pasta", "Broccoli"));
        assert!(!name_appears_in("Fish pie", "chicken"));
        assert!(!name_appears_in("Anything", ""));
    }
}
