//! Result model shared by the gateway and the presentation layer.
//!
//! A statement either produces a [`Table`], a bare count, a status line
//! (`"No data found."`), or a [`Failure`](QueryOutcome::Failure). Renderers match
//! on the variant rather than inspecting values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Status returned when a statement succeeds with zero rows.
pub const NO_DATA_FOUND: &str = "No data found.";

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum QueryOutcome {
    Tabular(Table),
    Count(i64),
    Status(String),
    Failure { kind: FailureKind, detail: String },
}

impl QueryOutcome {
    /// Classify a fetched result set.
    ///
    /// Zero rows become [`NO_DATA_FOUND`]. A single integer cell under a
    /// `count` label (`COUNT(*)`, `total_count`, ...) becomes a `Count`.
    pub fn from_table(table: Table) -> Self {
        if table.is_empty() {
            return QueryOutcome::Status(NO_DATA_FOUND.to_string());
        }
        match table.as_count() {
            Some(n) => QueryOutcome::Count(n),
            None => QueryOutcome::Tabular(table),
        }
    }

    pub fn connection_failed(detail: impl Into<String>) -> Self {
        QueryOutcome::Failure {
            kind: FailureKind::Connection,
            detail: detail.into(),
        }
    }

    pub fn execution_failed(detail: impl Into<String>) -> Self {
        QueryOutcome::Failure {
            kind: FailureKind::Execution,
            detail: detail.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, QueryOutcome::Failure { .. })
    }

    /// User-facing text for `Status` and `Failure` outcomes.
    pub fn message(&self) -> Option<String> {
        match self {
            QueryOutcome::Status(msg) => Some(msg.clone()),
            QueryOutcome::Failure { kind, detail } => Some(kind.describe(detail)),
            QueryOutcome::Tabular(_) | QueryOutcome::Count(_) => None,
        }
    }
}

/// Which stage of the database round-trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Connection,
    Execution,
}

impl FailureKind {
    pub fn describe(self, detail: &str) -> String {
        match self {
            FailureKind::Connection => format!("Database connection failed: {detail}"),
            FailureKind::Execution => format!("Error executing query: {detail}"),
        }
    }
}

/// In-memory result set: ordered column labels and fixed-width rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row whose width matches the column count.
    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<(), RowWidthMismatch> {
        if row.len() != self.columns.len() {
            return Err(RowWidthMismatch {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn as_count(&self) -> Option<i64> {
        if self.columns.len() != 1 || self.rows.len() != 1 {
            return None;
        }
        if !is_count_label(&self.columns[0]) {
            return None;
        }
        match self.rows[0][0] {
            CellValue::Integer(n) => Some(n),
            _ => None,
        }
    }
}

/// `count`, `COUNT(*)`, `COUNT(ID)`, `total_count`, `Employee Count`; not
/// `account_id` or `discount`.
fn is_count_label(label: &str) -> bool {
    let label = label.trim().to_ascii_lowercase();
    label == "count"
        || label.starts_with("count(")
        || label.ends_with("_count")
        || label.ends_with(" count")
}

/// A row did not have one cell per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWidthMismatch {
    pub expected: usize,
    pub found: usize,
}

impl std::fmt::Display for RowWidthMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "result row has {} columns, expected {}",
            self.found, self.expected
        )
    }
}

impl std::error::Error for RowWidthMismatch {}

/// A single scalar from a result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    /// Exact numeric kept in its textual form.
    Decimal(String),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Bytes(Vec<u8>),
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => f.write_str("NULL"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Decimal(s) | CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            CellValue::Bytes(bytes) => {
                f.write_str("0x")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(column: &str, value: CellValue) -> Table {
        let mut table = Table::new(vec![column.to_string()]);
        table.push_row(vec![value]).unwrap();
        table
    }

    #[test]
    fn empty_table_is_no_data_status() {
        let outcome = QueryOutcome::from_table(Table::new(vec!["ID".into()]));
        assert_eq!(outcome, QueryOutcome::Status(NO_DATA_FOUND.to_string()));
    }

    #[test]
    fn count_column_becomes_count() {
        let outcome = QueryOutcome::from_table(single("COUNT(*)", CellValue::Integer(7)));
        assert_eq!(outcome, QueryOutcome::Count(7));
    }

    #[test]
    fn single_non_count_integer_stays_tabular() {
        let outcome = QueryOutcome::from_table(single("ID", CellValue::Integer(7)));
        assert!(matches!(outcome, QueryOutcome::Tabular(_)));
    }

    #[test]
    fn count_labels_are_matched_whole() {
        for label in ["count", "COUNT(*)", "count(ID)", "total_count", "Employee Count"] {
            let outcome = QueryOutcome::from_table(single(label, CellValue::Integer(3)));
            assert_eq!(outcome, QueryOutcome::Count(3), "{label}");
        }
        for label in ["account_id", "discount", "country_code", "counter"] {
            let outcome = QueryOutcome::from_table(single(label, CellValue::Integer(42)));
            assert!(matches!(outcome, QueryOutcome::Tabular(_)), "{label}");
        }
    }

    #[test]
    fn row_of_wrong_width_is_rejected() {
        let mut table = Table::new(vec!["ID".into()]);
        let err = table
            .push_row(vec![CellValue::Integer(2), CellValue::Text("Bo".into())])
            .unwrap_err();
        assert_eq!(err, RowWidthMismatch { expected: 1, found: 2 });
        assert_eq!(err.to_string(), "result row has 2 columns, expected 1");
        assert!(table.is_empty());
    }

    #[test]
    fn failure_messages() {
        let conn = QueryOutcome::connection_failed("timed out");
        assert_eq!(conn.message().unwrap(), "Database connection failed: timed out");
        let exec = QueryOutcome::execution_failed("no such table: Sample_Data");
        assert_eq!(
            exec.message().unwrap(),
            "Error executing query: no such table: Sample_Data"
        );
        assert!(exec.is_failure());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(QueryOutcome::Count(3)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "count", "data": 3}));

        let mut table = Table::new(vec!["Name".into(), "Join_Date".into()]);
        table.push_row(vec![
            CellValue::Text("O'Brien".into()),
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()),
        ])
        .unwrap();
        let json = serde_json::to_value(QueryOutcome::Tabular(table)).unwrap();
        assert_eq!(json["kind"], "tabular");
        assert_eq!(json["data"]["columns"][1], "Join_Date");
        assert_eq!(json["data"]["rows"][0][1], "2023-04-01");
    }

    #[test]
    fn cell_display() {
        assert_eq!(CellValue::Null.to_string(), "NULL");
        assert_eq!(CellValue::Decimal("1250.50".into()).to_string(), "1250.50");
        assert_eq!(CellValue::Bytes(vec![0xde, 0xad]).to_string(), "0xdead");
    }
}
