use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One entry on the list. `checked` is UI state that rides along with the
/// stored list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    #[serde(default)]
    pub checked: bool,
}

/// Supermarket section -> items, as the model returns it.
pub type ShoppingList = BTreeMap<String, Vec<ShoppingItem>>;

#[derive(Debug, Deserialize, Default)]
pub struct GenerateShoppingListRequest {
    #[serde(default)]
    pub week_start: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    pub week_start: String,
    pub items: ShoppingList,
}

/// Check or uncheck one item, addressed by section and name.
#[derive(Debug, Deserialize)]
pub struct ToggleItemRequest {
    pub category: String,
    pub name: String,
    pub checked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_defaults_to_false() {
        let item: ShoppingItem = serde_json::from_value(serde_json::json!({
            "name": "Carrots"
        }))
        .unwrap();
        assert!(!item.checked);
    }

    #[test]
    fn list_round_trips() {
        let list: ShoppingList = serde_json::from_value(serde_json::json!({
            "Vegetables": [ { "name": "Carrots", "checked": false } ],
            "Meat & Fish": [ { "name": "Chicken breast", "checked": true } ],
        }))
        .unwrap();
        let back: ShoppingList =
            serde_json::from_value(serde_json::to_value(&list).unwrap()).unwrap();
        assert_eq!(back, list);
    }
}
