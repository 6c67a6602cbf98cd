use serde_json::Value;

/// Strips a leading/trailing Markdown code fence from model output.
///
/// Handles both ```json (language tag matched case-insensitively) and bare
/// ``` fences. Anything that is not a surrounding fence is left untouched.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the fence line, including an optional language tag.
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        text = rest.trim_start_matches(['\r', '\n']);
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    text.trim()
}

/// Strict JSON parse of (fence-stripped) model output. A parse failure is
/// terminal for the request; the caller logs the raw text and gives up.
pub fn parse_model_json(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(strip_code_fences(raw))
}

/// Locates the plan object inside a parsed response.
///
/// Models name the top-level field inconsistently, so check `mealPlan`,
/// then `plan`, then fall back to the root object itself.
pub fn extract_plan_object(parsed: &Value) -> &Value {
    parsed
        .get("mealPlan")
        .or_else(|| parsed.get("plan"))
        .unwrap_or(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_json_parses_like_bare_json() {
        let bare = r#"{"mealPlan": {"Monday": {"lunch": "Pasta"}}}"#;
        let fenced = format!("```json\n{bare}\n```");
        let fenced_upper = format!("```JSON\n{bare}\n```");
        let fenced_bare = format!("```\n{bare}\n```");

        let expected = parse_model_json(bare).unwrap();
        assert_eq!(parse_model_json(&fenced).unwrap(), expected);
        assert_eq!(parse_model_json(&fenced_upper).unwrap(), expected);
        assert_eq!(parse_model_json(&fenced_bare).unwrap(), expected);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let raw = "\n\n  {\"plan\": {}}  \n";
        assert!(parse_model_json(raw).is_ok());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_model_json("Sure! Here's your plan: {").is_err());
        assert!(parse_model_json("").is_err());
    }

    #[test]
    fn plan_object_lookup_order() {
        let meal_plan = serde_json::json!({"mealPlan": {"a": 1}, "plan": {"b": 2}});
        assert_eq!(extract_plan_object(&meal_plan), &serde_json::json!({"a": 1}));

        let plan = serde_json::json!({"plan": {"b": 2}});
        assert_eq!(extract_plan_object(&plan), &serde_json::json!({"b": 2}));

        let root = serde_json::json!({"Monday": {"lunch": "Pasta"}});
        assert_eq!(extract_plan_object(&root), &root);
    }
}
