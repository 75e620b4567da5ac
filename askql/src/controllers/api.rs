//! `POST /api/query`: the pipeline as JSON.

use askql_core::{AppError, QueryOutcome};
use askql_data::QueryExecutor;
use askql_llm::LanguageModel;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::pipeline::{RequestState, Resolution};
use crate::state::AppState;
use crate::views::GENERATION_FAILED;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub state: RequestState,
    /// The statement that was executed, absent when generation failed.
    pub sql: Option<String>,
    pub result: Option<QueryOutcome>,
    /// User-facing text for failures and status results.
    pub message: Option<String>,
}

impl From<Resolution> for QueryResponse {
    fn from(resolution: Resolution) -> Self {
        let state = resolution.state();
        match resolution {
            Resolution::GenerationFailed => QueryResponse {
                state,
                sql: None,
                result: None,
                message: Some(GENERATION_FAILED.to_string()),
            },
            Resolution::Executed { sql, outcome } => QueryResponse {
                state,
                sql: Some(sql.into_inner()),
                message: outcome.message(),
                result: Some(outcome),
            },
        }
    }
}

/// Malformed bodies answer 400 in the same `{"error": ...}` shape as model failures.
pub async fn query<M, E>(
    State(state): State<AppState<M, E>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, AppError>
where
    M: LanguageModel + 'static,
    E: QueryExecutor + 'static,
{
    let Json(body) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let resolution = state.pipeline.run(&body.question).await?;
    Ok(Json(resolution.into()))
}
