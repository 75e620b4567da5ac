//! # askql-llm: natural language to SQL
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PromptBuilder`] | Embeds the table schema, the question and the generation rules |
//! | [`LanguageModel`] | Text-completion seam, implemented by [`GeminiClient`] and test doubles |
//! | [`SqlGenerator`] | Calls the model, normalizes the answer, applies the SELECT/FROM check |
//! | [`ValidatedSql`] | A statement that passed the check |
//! | [`LlmConfig`] | Credential, model name and endpoint |
//!
//! ```ignore
//! use askql_llm::{GeminiClient, LlmConfig, PromptBuilder, SqlGenerator, SAMPLE_DATA};
//!
//! let model = GeminiClient::new(config.section::<LlmConfig>()?);
//! let generator = SqlGenerator::new(model, PromptBuilder::new(SAMPLE_DATA, dialect));
//! if let Some(sql) = generator.generate("How many people joined in 2023?").await? {
//!     gateway.execute(sql.as_str()).await;
//! }
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod model;
pub mod prompt;

pub use config::LlmConfig;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use generator::{looks_like_select, normalize_completion, InvalidGeneration, SqlGenerator, ValidatedSql};
pub use model::LanguageModel;
pub use prompt::{ColumnSpec, PromptBuilder, TableSchema, SAMPLE_DATA};
