use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// `{ "error": message }` with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

/// Failure of a JSON endpoint, rendered through [`error_response`].
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be read as a question.
    BadRequest(String),
    /// Something local went wrong (configuration, I/O).
    Internal(String),
    /// The language model could not be reached or answered with an error.
    Upstream(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        let (Self::BadRequest(msg) | Self::Internal(msg) | Self::Upstream(msg)) = self;
        msg
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::BadRequest(msg) | Self::Internal(msg) | Self::Upstream(msg) => {
                error_response(status, msg)
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::BadRequest(_) => "bad request",
            Self::Internal(_) => "internal error",
            Self::Upstream(_) => "upstream error",
        };
        write!(f, "{label}: {}", self.message())
    }
}

impl std::error::Error for AppError {}

/// Implement `From<E> for AppError` by stringifying `E` into a variant.
///
/// ```ignore
/// askql_core::map_error! {
///     askql_llm::LlmError => Upstream,
/// }
/// ```
#[macro_export]
macro_rules! map_error {
    ( $( $source:ty => $variant:ident ),* $(,)? ) => {$(
        impl From<$source> for $crate::AppError {
            fn from(err: $source) -> Self {
                $crate::AppError::$variant(err.to_string())
            }
        }
    )*};
}

map_error! {
    std::io::Error => Internal,
    crate::config::ConfigError => Internal,
}
