use std::str::FromStr;
use std::time::Duration;

use askql_core::{CellValue, Table};
use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::types::chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{Column, ConnectOptions, Row, TypeInfo, ValueRef};

use crate::error::DataError;
use crate::gateway::{close, connect_within, to_table};

pub(crate) async fn fetch_table(url: &str, timeout: Duration, sql: &str) -> Result<Table, DataError> {
    let options = SqliteConnectOptions::from_str(url).map_err(DataError::connection)?;
    let mut conn = connect_within(timeout, options.connect()).await?;
    let fetched = sqlx::query(sql).fetch_all(&mut conn).await;
    close(conn).await;
    to_table(&fetched.map_err(DataError::execution)?, decode_cell)
}

/// SQLite values carry a storage class (INTEGER, REAL, TEXT, BLOB); the
/// column's declared type refines it for dates, times and booleans.
fn decode_cell(row: &SqliteRow, index: usize) -> Result<CellValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(CellValue::Null);
    }
    let storage = raw.type_info().name().to_string();
    let declared = row.column(index).type_info().name().to_ascii_uppercase();

    let cell = match (storage.as_str(), declared.as_str()) {
        ("INTEGER", "BOOLEAN") => CellValue::Bool(row.try_get_unchecked(index)?),
        ("INTEGER", _) => CellValue::Integer(row.try_get_unchecked(index)?),
        ("REAL", _) => CellValue::Float(row.try_get_unchecked(index)?),
        ("BLOB", _) => CellValue::Bytes(row.try_get_unchecked(index)?),
        ("TEXT", "DATE") => row
            .try_get_unchecked::<NaiveDate, _>(index)
            .map(CellValue::Date)
            .or_else(|_| text(row, index))?,
        ("TEXT", "DATETIME") => row
            .try_get_unchecked::<NaiveDateTime, _>(index)
            .map(CellValue::DateTime)
            .or_else(|_| text(row, index))?,
        ("TEXT", "TIME") => row
            .try_get_unchecked::<NaiveTime, _>(index)
            .map(CellValue::Time)
            .or_else(|_| text(row, index))?,
        _ => text(row, index)?,
    };
    Ok(cell)
}

fn text(row: &SqliteRow, index: usize) -> Result<CellValue, sqlx::Error> {
    row.try_get_unchecked::<String, _>(index).map(CellValue::Text)
}
