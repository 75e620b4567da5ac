/// Failures of the remote model call.
///
/// None of these are handled inside the pipeline: they surface to the HTTP
/// layer as a generic server error. A rejected completion is not an error,
/// see [`InvalidGeneration`](crate::InvalidGeneration).
#[derive(Debug)]
pub enum LlmError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset...).
    Transport(String),
    /// The provider answered with a non-success status (bad key, quota, ...).
    Status { status: u16, message: String },
    /// The response body was not the expected JSON.
    Decode(String),
    /// The provider returned no text, e.g. because the answer was blocked.
    EmptyResponse { finish_reason: Option<String> },
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::Transport(msg) => write!(f, "Language model unreachable: {msg}"),
            LlmError::Status { status, message } => {
                write!(f, "Language model returned {status}: {message}")
            }
            LlmError::Decode(msg) => write!(f, "Invalid language model response: {msg}"),
            LlmError::EmptyResponse {
                finish_reason: Some(reason),
            } => write!(f, "Language model returned no text (finish reason: {reason})"),
            LlmError::EmptyResponse { finish_reason: None } => {
                write!(f, "Language model returned no text")
            }
        }
    }
}

impl std::error::Error for LlmError {}

askql_core::map_error! {
    LlmError => Upstream,
}
