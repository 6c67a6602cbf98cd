use super::plan::WeekPlan;

/// Household inputs shared by every generation prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub green: &'a [String],
    pub amber: &'a [String],
    pub red: &'a [String],
    pub risk_level: i32,
    pub prep_time: &'a str,
    pub appetite: &'a str,
}

/// Fixed qualitative line for each risk band. The band edges (0–2, 3–5,
/// 6–7, 8–10) control how adventurous substitutions may be.
pub fn risk_explanation(risk_level: i32) -> &'static str {
    if risk_level <= 2 {
        "Stick almost entirely to familiar foods the children already like."
    } else if risk_level <= 5 {
        "Mostly familiar foods, with very small variations."
    } else if risk_level <= 7 {
        "Mix familiar foods with a few gentle new ideas."
    } else {
        "Actively introduce new meals using familiar ingredients."
    }
}

fn bullet_list(names: &[String]) -> String {
    if names.is_empty() {
        return "- (none)".to_string();
    }
    names
        .iter()
        .map(|n| format!("- {n}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full-week prompt. The skeleton is rendered verbatim and the model is
/// told to preserve its exact day/slot structure.
pub fn full_plan_prompt(ctx: &PromptContext<'_>, skeleton: &WeekPlan) -> String {
    let skeleton_json =
        serde_json::to_string_pretty(skeleton).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are a family meal planner for young children.\n\
         \n\
         Your job is to CREATE meals using foods the family already likes,\n\
         while gently encouraging variety depending on the risk level.\n\
         \n\
         IMPORTANT RULES:\n\
         - Think in INGREDIENTS, not predefined meals\n\
         - Combine foods into sensible family meals\n\
         - Prefer green foods as a base\n\
         - Amber foods are allowed depending on risk\n\
         - Avoid red foods unless risk level is 8 or higher\n\
         - Meals should feel realistic and child-friendly\n\
         \n\
         RISK GUIDANCE:\n\
         {risk}\n\
         \n\
         FAMILY FOOD PREFERENCES:\n\
         \n\
         GREEN (very comfortable):\n\
         {green}\n\
         \n\
         AMBER (sometimes okay):\n\
         {amber}\n\
         \n\
         RED (generally disliked):\n\
         {red}\n\
         \n\
         COOKING CONSTRAINTS:\n\
         - Prep time preference: {prep_time}\n\
         - Appetite size: {appetite}\n\
         - Risk level: {risk_level}\n\
         \n\
         HERE IS THE PLAN YOU MUST FILL:\n\
         {skeleton_json}\n\
         \n\
         OUTPUT RULES:\n\
         - Return VALID JSON ONLY. No backticks. No commentary.\n\
         - Fill every slot shown above; do not add or remove days or slots\n\
         - The output MUST strictly follow the structure above\n\
         - Use this exact format:\n\
         \n\
         {{\n  \"mealPlan\": {{\n    \"Monday\": {{\n      \"lunch\": \"Meal name\",\n      \"dinner\": \"Meal name\"\n    }}\n  }}\n}}",
        risk = risk_explanation(ctx.risk_level),
        green = bullet_list(ctx.green),
        amber = bullet_list(ctx.amber),
        red = bullet_list(ctx.red),
        prep_time = ctx.prep_time,
        appetite = ctx.appetite,
        risk_level = ctx.risk_level,
    )
}

/// Single-slot reshuffle prompt: exactly one replacement meal, distinct
/// from the one being rejected.
pub fn slot_prompt(ctx: &PromptContext<'_>, existing_meal: &str) -> String {
    format!(
        "You are helping reshuffle ONE meal in a weekly plan.\n\
         \n\
         CURRENT MEAL (do not repeat this):\n\
         \"{existing_meal}\"\n\
         \n\
         GOAL:\n\
         Suggest ONE alternative meal that fits the family's preferences,\n\
         without repeating the same idea.\n\
         \n\
         FOOD PREFERENCES:\n\
         \n\
         GREEN:\n\
         {green}\n\
         \n\
         AMBER:\n\
         {amber}\n\
         \n\
         RED:\n\
         {red}\n\
         \n\
         RISK LEVEL:\n\
         {risk}\n\
         \n\
         COOKING CONSTRAINTS:\n\
         - Prep time: {prep_time}\n\
         - Appetite: {appetite}\n\
         \n\
         RULES:\n\
         - Create a meal from ingredients\n\
         - Prefer green foods\n\
         - Use amber foods only if appropriate\n\
         - Avoid red foods unless risk level is 8 or higher\n\
         - Meal must be realistic and child-friendly\n\
         - Do NOT repeat the existing meal\n\
         \n\
         OUTPUT FORMAT (JSON ONLY):\n\
         {{ \"meal\": \"Meal name\" }}",
        green = bullet_list(ctx.green),
        amber = bullet_list(ctx.amber),
        red = bullet_list(ctx.red),
        risk = risk_explanation(ctx.risk_level),
        prep_time = ctx.prep_time,
        appetite = ctx.appetite,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::plan::{Day, DayMeals};

    fn ctx<'a>(green: &'a [String], amber: &'a [String], red: &'a [String]) -> PromptContext<'a> {
        PromptContext {
            green,
            amber,
            red,
            risk_level: 4,
            prep_time: "quick",
            appetite: "medium",
        }
    }

    #[test]
    fn risk_bands_have_fixed_wording() {
        assert_eq!(risk_explanation(0), risk_explanation(2));
        assert_eq!(risk_explanation(3), risk_explanation(5));
        assert_eq!(risk_explanation(6), risk_explanation(7));
        assert_eq!(risk_explanation(8), risk_explanation(10));
        assert_ne!(risk_explanation(2), risk_explanation(3));
        assert_ne!(risk_explanation(5), risk_explanation(6));
        assert_ne!(risk_explanation(7), risk_explanation(8));
    }

    #[test]
    fn full_prompt_contains_skeleton_and_lists() {
        let green = vec!["Chicken".to_string(), "Rice".to_string()];
        let amber = vec!["Broccoli".to_string()];
        let red = vec!["Mushrooms".to_string()];

        let mut skeleton = WeekPlan::new();
        skeleton.insert(
            Day::Monday,
            DayMeals {
                lunch: Some(String::new()),
                dinner: None,
            },
        );

        let prompt = full_plan_prompt(&ctx(&green, &amber, &red), &skeleton);
        assert!(prompt.contains("- Chicken"));
        assert!(prompt.contains("- Broccoli"));
        assert!(prompt.contains("- Mushrooms"));
        assert!(prompt.contains("\"Monday\""));
        assert!(prompt.contains("Prep time preference: quick"));
        assert!(prompt.contains("Mostly familiar foods"));
    }

    #[test]
    fn empty_lists_render_a_placeholder_bullet() {
        let empty: Vec<String> = vec![];
        let green = vec!["Pasta".to_string()];
        let prompt = slot_prompt(&ctx(&green, &empty, &empty), "Fish pie");
        assert!(prompt.contains("- (none)"));
        assert!(prompt.contains("\"Fish pie\""));
    }

    #[test]
    fn slot_prompt_demands_single_meal_json() {
        let green = vec!["Pasta".to_string()];
        let empty: Vec<String> = vec![];
        let prompt = slot_prompt(&ctx(&green, &empty, &empty), "Fish pie");
        assert!(prompt.contains("{ \"meal\": \"Meal name\" }"));
    }
}
