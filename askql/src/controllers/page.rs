//! `GET /` and `POST /`: the form and its results.

use askql_data::QueryExecutor;
use askql_llm::LanguageModel;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct QuestionForm {
    #[serde(default)]
    pub question: String,
}

pub async fn show() -> Html<String> {
    Html(views::page("", None))
}

/// Run the pipeline for the submitted question and render the outcome.
///
/// A failing model call is the one error not turned into page content: it
/// answers 500 with a generic error page.
pub async fn ask<M, E>(
    State(state): State<AppState<M, E>>,
    Form(form): Form<QuestionForm>,
) -> Response
where
    M: LanguageModel + 'static,
    E: QueryExecutor + 'static,
{
    match state.pipeline.run(&form.question).await {
        Ok(resolution) => Html(views::page(&form.question, Some(&resolution))).into_response(),
        Err(err) => {
            tracing::error!("Language model request failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::error_page(&form.question, &err.to_string())),
            )
                .into_response()
        }
    }
}
