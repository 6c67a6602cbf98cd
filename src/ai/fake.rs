use async_trait::async_trait;

use super::{AiError, AiProvider};

/// Deterministic provider for tests. Responses are keyed by a substring of
/// the prompt, matched case-insensitively in registration order.
#[derive(Debug, Default)]
pub struct FakeAi {
    responses: Vec<(String, String)>,
    default_response: Option<String>,
}

impl FakeAi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a provider with a single registered response.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut fake = Self::new();
        fake.add_response(prompt_contains, response);
        fake
    }

    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .push((prompt_contains.to_lowercase(), response.to_string()));
    }

    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }
}

#[async_trait]
impl AiProvider for FakeAi {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in &self.responses {
            if prompt_lower.contains(pattern) {
                return Ok(response.clone());
            }
        }
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(AiError::RequestFailed(
                "FakeAi: no response registered for prompt".into(),
            )),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn matches_registered_substring_case_insensitively() {
        let fake = FakeAi::with_response("WEEKLY plan", "{}");
        let out = fake.complete("fill this weekly plan please").await.unwrap();
        assert_eq!(out, "{}");
    }

    #[tokio::test]
    async fn unmatched_prompt_without_default_errors() {
        let fake = FakeAi::new();
        assert!(fake.complete("anything").await.is_err());
    }

    #[tokio::test]
    async fn falls_back_to_default_response() {
        let fake = FakeAi::new().with_default_response("fallback");
        assert_eq!(fake.complete("anything").await.unwrap(), "fallback");
    }
}
