use askql_core::QueryOutcome;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by the database gateway.
#[derive(Debug)]
pub enum DataError {
    /// The configured URL names a driver this build does not support.
    UnsupportedUrl(String),
    /// The connection could not be established (or timed out).
    Connection(BoxError),
    /// The statement was rejected, failed while running, or its rows could not
    /// be decoded.
    Execution(BoxError),
}

impl DataError {
    pub fn connection(err: impl Into<BoxError>) -> Self {
        DataError::Connection(err.into())
    }

    pub fn execution(err: impl Into<BoxError>) -> Self {
        DataError::Execution(err.into())
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::UnsupportedUrl(url) => write!(f, "Unsupported database URL: {url}"),
            DataError::Connection(err) => write!(f, "Database connection failed: {err}"),
            DataError::Execution(err) => write!(f, "Error executing query: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Connection(err) | DataError::Execution(err) => Some(err.as_ref()),
            DataError::UnsupportedUrl(_) => None,
        }
    }
}

impl From<DataError> for QueryOutcome {
    fn from(err: DataError) -> Self {
        match err {
            DataError::UnsupportedUrl(url) => {
                QueryOutcome::connection_failed(format!("Unsupported database URL: {url}"))
            }
            DataError::Connection(e) => QueryOutcome::connection_failed(e.to_string()),
            DataError::Execution(e) => QueryOutcome::execution_failed(e.to_string()),
        }
    }
}
