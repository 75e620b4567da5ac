use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use askql_core::{CellValue, QueryOutcome, SqlDialect, Table};
use sqlx::{Column, Connection, Row};

use crate::config::DatabaseConfig;
use crate::error::DataError;

/// Runs one statement and reports what happened.
///
/// Failures are part of the outcome (`QueryOutcome::Failure`), so callers
/// never see an error from this trait.
pub trait QueryExecutor: Send + Sync {
    fn execute(&self, sql: &str) -> impl Future<Output = QueryOutcome> + Send;
}

impl<E: QueryExecutor> QueryExecutor for Arc<E> {
    fn execute(&self, sql: &str) -> impl Future<Output = QueryOutcome> + Send {
        (**self).execute(sql)
    }
}

/// Executes statements verbatim against the configured database.
///
/// Every call opens its own connection, runs the statement, fetches the whole
/// result set and closes the connection before returning, whatever the
/// outcome. There is no pool and no statement filtering: whatever text it is
/// given reaches the database.
#[derive(Debug, Clone)]
pub struct DatabaseGateway {
    config: DatabaseConfig,
    dialect: SqlDialect,
}

impl DatabaseGateway {
    /// Fails with [`DataError::UnsupportedUrl`] when the URL scheme names no
    /// driver compiled into this build.
    pub fn new(config: DatabaseConfig) -> Result<Self, DataError> {
        let dialect = SqlDialect::from_url(&config.url)
            .filter(|d| driver_enabled(*d))
            .ok_or_else(|| DataError::UnsupportedUrl(config.url.clone()))?;
        Ok(Self { config, dialect })
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Connect, run `sql`, collect every row, disconnect.
    pub async fn fetch(&self, sql: &str) -> Result<Table, DataError> {
        let url = &self.config.url;
        let timeout = self.config.connect_timeout;
        match self.dialect {
            #[cfg(feature = "sqlite")]
            SqlDialect::Sqlite => crate::sqlite::fetch_table(url, timeout, sql).await,
            #[cfg(feature = "mysql")]
            SqlDialect::MySql => crate::mysql::fetch_table(url, timeout, sql).await,
            #[allow(unreachable_patterns)]
            _ => Err(DataError::UnsupportedUrl(url.clone())),
        }
    }
}

impl QueryExecutor for DatabaseGateway {
    async fn execute(&self, sql: &str) -> QueryOutcome {
        match self.fetch(sql).await {
            Ok(table) => {
                if table.is_empty() {
                    tracing::info!("Query executed successfully. No data found.");
                } else {
                    tracing::info!(
                        "Query executed successfully. Rows returned: {}",
                        table.row_count()
                    );
                }
                QueryOutcome::from_table(table)
            }
            Err(err) => {
                tracing::error!("{err}");
                QueryOutcome::from(err)
            }
        }
    }
}

fn driver_enabled(dialect: SqlDialect) -> bool {
    match dialect {
        SqlDialect::Sqlite => cfg!(feature = "sqlite"),
        SqlDialect::MySql => cfg!(feature = "mysql"),
    }
}

/// Await `connecting`, giving up after `timeout`.
pub(crate) async fn connect_within<C>(
    timeout: Duration,
    connecting: impl Future<Output = Result<C, sqlx::Error>>,
) -> Result<C, DataError> {
    match tokio::time::timeout(timeout, connecting).await {
        Ok(Ok(conn)) => Ok(conn),
        Ok(Err(e)) => Err(DataError::connection(e)),
        Err(_) => Err(DataError::connection(format!(
            "connection attempt timed out after {}s",
            timeout.as_secs()
        ))),
    }
}

/// Close `conn`; a failed goodbye does not change the outcome.
pub(crate) async fn close<C: Connection>(conn: C) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "closing database connection failed");
    }
}

/// Build a [`Table`] from fetched rows, labelling columns as the driver
/// reports them for the first row.
///
/// A batch whose statements return different column counts arrives as one
/// row stream; a row that does not fit the header is an execution error.
pub(crate) fn to_table<R: Row>(
    rows: &[R],
    decode: fn(&R, usize) -> Result<CellValue, sqlx::Error>,
) -> Result<Table, DataError> {
    let Some(first) = rows.first() else {
        return Ok(Table::default());
    };
    let mut table = Table::new(first.columns().iter().map(|c| c.name().to_string()).collect());
    for row in rows {
        let cells = (0..row.len())
            .map(|i| decode(row, i))
            .collect::<Result<Vec<_>, _>>()
            .map_err(DataError::execution)?;
        table.push_row(cells).map_err(DataError::execution)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_scheme() {
        let err = DatabaseGateway::new(DatabaseConfig::new("mssql://localhost/master")).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedUrl(_)));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn dialect_follows_url() {
        let gateway = DatabaseGateway::new(DatabaseConfig::new("sqlite://askql.db")).unwrap();
        assert_eq!(gateway.dialect(), SqlDialect::Sqlite);
    }

    #[tokio::test]
    async fn connect_timeout_is_a_connection_error() {
        let pending = std::future::pending::<Result<(), sqlx::Error>>();
        let err = connect_within(Duration::from_millis(10), pending).await.unwrap_err();
        assert!(matches!(err, DataError::Connection(_)));
        assert!(err.to_string().contains("timed out"));
    }
}
