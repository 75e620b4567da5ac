//! Question → statement → outcome, one request at a time.

use askql_core::QueryOutcome;
use askql_data::QueryExecutor;
use askql_llm::{LanguageModel, LlmError, SqlGenerator, ValidatedSql};
use serde::Serialize;

/// Terminal state of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// The model answered with something that is not a query.
    GenerationFailed,
    /// A statement ran but the database reported a failure.
    QueryFailed,
    /// A statement ran and produced rows, a count or a status.
    QuerySucceeded,
}

/// What the pipeline produced for one question.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    GenerationFailed,
    Executed { sql: ValidatedSql, outcome: QueryOutcome },
}

impl Resolution {
    pub fn state(&self) -> RequestState {
        match self {
            Resolution::GenerationFailed => RequestState::GenerationFailed,
            Resolution::Executed { outcome, .. } if outcome.is_failure() => {
                RequestState::QueryFailed
            }
            Resolution::Executed { .. } => RequestState::QuerySucceeded,
        }
    }
}

/// Generator and executor wired together.
pub struct QueryPipeline<M, E> {
    generator: SqlGenerator<M>,
    executor: E,
}

impl<M: LanguageModel, E: QueryExecutor> QueryPipeline<M, E> {
    pub fn new(generator: SqlGenerator<M>, executor: E) -> Self {
        Self {
            generator,
            executor,
        }
    }

    pub fn generator(&self) -> &SqlGenerator<M> {
        &self.generator
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run the whole pipeline for `question`.
    ///
    /// The executor is only reached when generation produced a statement.
    /// A failing model call is returned as `Err`; nothing else is.
    pub async fn run(&self, question: &str) -> Result<Resolution, LlmError> {
        tracing::info!("User Question: {question}");

        let Some(sql) = self.generator.generate(question).await? else {
            return Ok(Resolution::GenerationFailed);
        };
        let outcome = self.executor.execute(sql.as_str()).await;
        Ok(Resolution::Executed { sql, outcome })
    }
}
