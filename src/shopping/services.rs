use super::dto::ShoppingList;

/// Prompt converting a stored weekly plan into a sectioned shopping list.
/// Same contract as plan generation: strict JSON, fixed shape.
pub fn shopping_list_prompt(plan_json: &str) -> String {
    format!(
        "You are generating a family shopping list.\n\
         \n\
         TASK:\n\
         - Convert the weekly meal plan into a shopping list\n\
         - Extract INGREDIENTS, not meals\n\
         - Group items into logical supermarket sections\n\
         - Keep quantities vague (no numbers)\n\
         - Avoid duplicates\n\
         - Family-friendly ingredients only\n\
         \n\
         WEEKLY PLAN:\n\
         {plan_json}\n\
         \n\
         OUTPUT FORMAT (JSON ONLY):\n\
         {{\n\
         \x20 \"Meat & Fish\": [\n\
         \x20   {{ \"name\": \"Chicken breast\", \"checked\": false }}\n\
         \x20 ],\n\
         \x20 \"Vegetables\": [\n\
         \x20   {{ \"name\": \"Carrots\", \"checked\": false }}\n\
         \x20 ],\n\
         \x20 \"Carbs\": [\n\
         \x20   {{ \"name\": \"Rice\", \"checked\": false }}\n\
         \x20 ],\n\
         \x20 \"Dairy\": [],\n\
         \x20 \"Other\": []\n\
         }}"
    )
}

/// Shapes a parsed model response into a shopping list. Unchecked flags
/// default to false; anything that is not a category->items object fails.
pub fn shopping_list_from_value(value: serde_json::Value) -> anyhow::Result<ShoppingList> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_the_plan() {
        let prompt = shopping_list_prompt("{\"Monday\":{\"lunch\":\"Pasta\"}}");
        assert!(prompt.contains("\"Monday\""));
        assert!(prompt.contains("OUTPUT FORMAT (JSON ONLY)"));
        assert!(prompt.contains("\"Meat & Fish\""));
    }

    #[test]
    fn shapes_a_category_map() {
        let list = shopping_list_from_value(serde_json::json!({
            "Vegetables": [ { "name": "Carrots" } ],
            "Dairy": [],
        }))
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list["Vegetables"][0].name, "Carrots");
        assert!(!list["Vegetables"][0].checked);
    }

    #[test]
    fn rejects_non_object_shapes() {
        assert!(shopping_list_from_value(serde_json::json!(["not", "a", "map"])).is_err());
        assert!(shopping_list_from_value(serde_json::json!({"Veg": "not-a-list"})).is_err());
    }
}
