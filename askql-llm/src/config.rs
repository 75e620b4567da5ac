use askql_core::{AskqlConfig, ConfigError, ConfigProperties};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings of the generative-language service.
#[derive(Clone)]
pub struct LlmConfig {
    /// API credential. May be empty: the provider then rejects the first call.
    pub api_key: String,
    pub model: String,
    /// Base URL up to and including the API version.
    pub endpoint: String,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ConfigProperties for LlmConfig {
    fn prefix() -> &'static str {
        "llm"
    }

    /// Reads `llm.api-key` (falling back to the `GOOGLE_API_KEY` environment
    /// variable when unset or empty), `llm.model` and `llm.endpoint`.
    fn from_config(config: &AskqlConfig) -> Result<Self, ConfigError> {
        let api_key = ["llm.api-key", "GOOGLE_API_KEY"]
            .into_iter()
            .filter_map(|key| config.get::<String>(key).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_default();
        Ok(Self::new(api_key)
            .with_model(&config.get_or("llm.model", DEFAULT_MODEL.to_string()))
            .with_endpoint(&config.get_or("llm.endpoint", DEFAULT_ENDPOINT.to_string())))
    }
}
