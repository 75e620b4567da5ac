use std::sync::Mutex;

use askql_core::QueryOutcome;
use askql_data::QueryExecutor;
use askql_llm::{LanguageModel, LlmError};

/// One request seen by a [`StubModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCall {
    pub prompt: String,
    pub question: String,
}

/// Language model double: always gives the same answer and records every
/// prompt it receives.
///
/// ```ignore
/// let model = Arc::new(StubModel::replying("```sql\nSELECT * FROM Sample_Data;\n```"));
/// ```
#[derive(Debug)]
pub struct StubModel {
    reply: Result<String, String>,
    calls: Mutex<Vec<ModelCall>>,
}

impl StubModel {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: Mutex::default(),
        }
    }

    /// Every call fails with [`LlmError::Transport`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl LanguageModel for StubModel {
    async fn complete(&self, prompt: &str, question: &str) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(ModelCall {
            prompt: prompt.to_string(),
            question: question.to_string(),
        });
        self.reply.clone().map_err(LlmError::Transport)
    }
}

/// Executor double: answers with a canned outcome and records each statement.
#[derive(Debug)]
pub struct RecordingExecutor {
    outcome: QueryOutcome,
    statements: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    pub fn new(outcome: QueryOutcome) -> Self {
        Self {
            outcome,
            statements: Mutex::default(),
        }
    }

    /// Statements received so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.statements.lock().unwrap().len()
    }
}

impl QueryExecutor for RecordingExecutor {
    async fn execute(&self, sql: &str) -> QueryOutcome {
        self.statements.lock().unwrap().push(sql.to_string());
        self.outcome.clone()
    }
}
