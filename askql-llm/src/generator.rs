//! Turns a question into a validated statement.
//!
//! The model's text is post-processed deterministically:
//!
//! 1. `"` is replaced by `'` so string literals use SQL quoting;
//! 2. a leading ```` ``` ```` fence (optionally with a language tag) and a
//!    trailing ```` ``` ```` fence are removed;
//! 3. surrounding whitespace is trimmed;
//! 4. the result must contain both `SELECT` and `FROM`, case-insensitively.
//!
//! Step 4 is a substring heuristic, not a parser: it accepts prose that
//! happens to contain both words, malformed SQL, and batches such as
//! `SELECT 1 FROM t; DROP TABLE t`. Nothing stops a non-SELECT statement that
//! mentions both words from reaching the database.

use crate::error::LlmError;
use crate::model::LanguageModel;
use crate::prompt::PromptBuilder;

/// A statement that passed the SELECT/FROM check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSql(String);

impl ValidatedSql {
    /// Validate an already normalized statement.
    pub fn new(sql: impl Into<String>) -> Result<Self, InvalidGeneration> {
        let sql = sql.into();
        if looks_like_select(&sql) {
            Ok(Self(sql))
        } else {
            Err(InvalidGeneration { text: sql })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ValidatedSql {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidatedSql {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The model answered, but not with something that looks like a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGeneration {
    /// The normalized completion that was rejected.
    pub text: String,
}

impl std::fmt::Display for InvalidGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid SQL query generated: {}", self.text)
    }
}

impl std::error::Error for InvalidGeneration {}

/// `true` when `text` contains both `SELECT` and `FROM`, in any case.
pub fn looks_like_select(text: &str) -> bool {
    let upper = text.to_uppercase();
    upper.contains("SELECT") && upper.contains("FROM")
}

/// Quote normalization, fence stripping and trimming of a raw completion.
pub fn normalize_completion(raw: &str) -> String {
    let quoted = raw.replace('"', "'");
    let body = strip_closing_fence(strip_opening_fence(quoted.trim()));
    body.trim().to_string()
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.')
}

/// Drop a leading ```` ``` ```` and the language tag right after it.
///
/// The tag is the rest of the fence line, so a fence glued to the statement
/// (```` ```SELECT ... ````) loses the backticks only.
fn strip_opening_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    match rest.find('\n') {
        Some(end) if rest[..end].chars().all(is_tag_char) => &rest[end..],
        None if rest.chars().all(is_tag_char) => "",
        _ => rest,
    }
}

fn strip_closing_fence(text: &str) -> &str {
    let trimmed = text.trim_end();
    trimmed.strip_suffix("```").unwrap_or(trimmed)
}

/// Prompt → model → normalized, validated statement.
#[derive(Debug, Clone)]
pub struct SqlGenerator<M> {
    model: M,
    prompts: PromptBuilder,
}

impl<M: LanguageModel> SqlGenerator<M> {
    pub fn new(model: M, prompts: PromptBuilder) -> Self {
        Self { model, prompts }
    }

    pub fn prompts(&self) -> &PromptBuilder {
        &self.prompts
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Generate a statement for `question`.
    ///
    /// `Ok(None)` means the model answered with something that is not a
    /// query; a warning has been logged. Transport and provider errors are
    /// returned as `Err` and are not retried.
    pub async fn generate(&self, question: &str) -> Result<Option<ValidatedSql>, LlmError> {
        let prompt = self.prompts.build(question);
        let completion = self.model.complete(&prompt, question).await?;

        match ValidatedSql::new(normalize_completion(&completion)) {
            Ok(sql) => {
                tracing::info!("Generated SQL Query: {sql}");
                Ok(Some(sql))
            }
            Err(invalid) => {
                tracing::warn!("{invalid}");
                Ok(None)
            }
        }
    }
}
