use std::str::FromStr;
use std::time::Duration;

use askql_core::{CellValue, Table};
use sqlx::mysql::{MySqlConnectOptions, MySqlRow};
use sqlx::types::chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{ConnectOptions, Row, TypeInfo, ValueRef};

use crate::error::DataError;
use crate::gateway::{close, connect_within, to_table};

pub(crate) async fn fetch_table(url: &str, timeout: Duration, sql: &str) -> Result<Table, DataError> {
    let options = MySqlConnectOptions::from_str(url).map_err(DataError::connection)?;
    let mut conn = connect_within(timeout, options.connect()).await?;
    let fetched = sqlx::query(sql).fetch_all(&mut conn).await;
    close(conn).await;
    to_table(&fetched.map_err(DataError::execution)?, decode_cell)
}

/// Decode by the type name the server reports for the result column.
fn decode_cell(row: &MySqlRow, index: usize) -> Result<CellValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(CellValue::Null);
    }
    let type_name = raw.type_info().name().to_string();

    let cell = match type_name.as_str() {
        "BOOLEAN" => CellValue::Bool(row.try_get_unchecked(index)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
            CellValue::Integer(row.try_get_unchecked(index)?)
        }
        name if name.ends_with(" UNSIGNED") => {
            let n: u64 = row.try_get_unchecked(index)?;
            i64::try_from(n)
                .map(CellValue::Integer)
                .unwrap_or_else(|_| CellValue::Decimal(n.to_string()))
        }
        // sent as text on the wire; kept exact
        "DECIMAL" => CellValue::Decimal(row.try_get_unchecked(index)?),
        "FLOAT" => CellValue::Float(f64::from(row.try_get_unchecked::<f32, _>(index)?)),
        "DOUBLE" => CellValue::Float(row.try_get_unchecked(index)?),
        "DATE" => CellValue::Date(row.try_get_unchecked::<NaiveDate, _>(index)?),
        "DATETIME" | "TIMESTAMP" => {
            CellValue::DateTime(row.try_get_unchecked::<NaiveDateTime, _>(index)?)
        }
        "TIME" => CellValue::Time(row.try_get_unchecked::<NaiveTime, _>(index)?),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
        | "GEOMETRY" => CellValue::Bytes(row.try_get_unchecked(index)?),
        _ => CellValue::Text(row.try_get_unchecked(index)?),
    };
    Ok(cell)
}
