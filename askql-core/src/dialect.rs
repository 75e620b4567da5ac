use serde::Serialize;

/// SQL dialect of the target database.
///
/// Chosen from the database URL scheme and used both by the prompt (so the
/// model writes date predicates the database understands) and by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    MySql,
    Sqlite,
}

impl SqlDialect {
    /// Detect the dialect from a connection URL (`mysql://…`, `sqlite:…`).
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next()?.to_ascii_lowercase();
        match scheme.as_str() {
            "mysql" | "mariadb" => Some(SqlDialect::MySql),
            "sqlite" => Some(SqlDialect::Sqlite),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SqlDialect::MySql => "MySQL",
            SqlDialect::Sqlite => "SQLite",
        }
    }

    /// Predicate selecting rows whose `column` falls in the given month (1-12).
    pub fn month_predicate(self, column: &str) -> String {
        match self {
            SqlDialect::MySql => format!("MONTH({column}) = value"),
            SqlDialect::Sqlite => format!("CAST(strftime('%m', {column}) AS INTEGER) = value"),
        }
    }

    /// Predicate selecting rows whose `column` falls in the given year.
    pub fn year_predicate(self, column: &str) -> String {
        match self {
            SqlDialect::MySql => format!("YEAR({column}) = value"),
            SqlDialect::Sqlite => format!("CAST(strftime('%Y', {column}) AS INTEGER) = value"),
        }
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
