//! # Typed Records
//!
//! Reservations, partners and owners as structs, converted to and from table
//! rows by their verbatim column headers. Empty cells map to empty text, a
//! missing date or unit number, or a zero amount.
mod owner;
mod partner;
mod reservation;

pub use owner::Owner;
pub use partner::Partner;
pub use reservation::Reservation;

pub use owner::DOCUMENT;
pub use owner::EMAIL;
pub use owner::FULL_NAME;
pub use owner::PHONE;
pub use partner::PARTNER;
pub use partner::PAYABLE;
pub use partner::RECEIVABLE;
pub use reservation::ADDRESS;
pub use reservation::BLOCK;
pub use reservation::CHECK_IN;
pub use reservation::CHECK_OUT;
pub use reservation::CONDOMINIUM;
pub use reservation::GUEST_NAME;
pub use reservation::LODGING_AMOUNT;
pub use reservation::UNIT_NUMBER;

use crate::money::MoneyCents;
use crate::table::RowId;
use crate::table::Table;
use crate::table::Value;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("Row {0} does not exist")]
    MissingRow(RowId),

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Invalid value '{value}' in column '{column}' of row {row}")]
    InvalidValue {
        column: String,
        row: RowId,
        value: String,
    },
}

/// A typed view of one table row.
pub trait Record: Sized {
    /// Column headers in sheet order
    const COLUMNS: &'static [&'static str];

    fn from_row(table: &Table, row: RowId) -> Result<Self, RecordError>;

    /// Header and value pairs, in `COLUMNS` order
    fn to_fields(&self) -> Vec<(String, Value)>;
}

fn cell<'a>(table: &'a Table, row: RowId, column: &str) -> Result<&'a Value, RecordError> {
    if !table.contains_row(row) {
        return Err(RecordError::MissingRow(row));
    }
    table
        .get(row, column)
        .ok_or_else(|| RecordError::MissingColumn(column.to_owned()))
}

fn invalid(column: &str, row: RowId, value: &Value) -> RecordError {
    RecordError::InvalidValue {
        column: column.to_owned(),
        row,
        value: value.to_string(),
    }
}

/// Any non-empty cell reads as text; phone numbers and documents often come in as numbers.
pub(crate) fn text_field(table: &Table, row: RowId, column: &str) -> Result<String, RecordError> {
    Ok(cell(table, row, column)?.to_string())
}

pub(crate) fn date_field(table: &Table, row: RowId, column: &str) -> Result<Option<NaiveDate>, RecordError> {
    let value = cell(table, row, column)?;
    if value.is_empty() {
        return Ok(None);
    }
    value.as_date().map(Some).ok_or_else(|| invalid(column, row, value))
}

pub(crate) fn integer_field(table: &Table, row: RowId, column: &str) -> Result<Option<i64>, RecordError> {
    let value = cell(table, row, column)?;
    if value.is_empty() {
        return Ok(None);
    }
    value.as_i64().map(Some).ok_or_else(|| invalid(column, row, value))
}

pub(crate) fn money_field(table: &Table, row: RowId, column: &str) -> Result<MoneyCents, RecordError> {
    let value = cell(table, row, column)?;
    match value {
        _ if value.is_empty() => Ok(MoneyCents::ZERO),
        Value::Number(number) => Ok(MoneyCents::from_f64(*number)),
        Value::Text(text) => text.parse().map_err(|_| invalid(column, row, value)),
        _ => Err(invalid(column, row, value)),
    }
}

/// Reads a cell as an amount for aggregation; anything that is not a number counts as nothing.
pub(crate) fn money_value(value: &Value) -> Option<MoneyCents> {
    match value {
        Value::Text(text) => text.parse().ok(),
        _ => value.as_f64().map(MoneyCents::from_f64),
    }
}

pub(crate) fn money_cell(amount: MoneyCents) -> Value {
    Value::Number(amount.to_f64())
}

pub(crate) fn fields<const N: usize>(columns: &[&str], values: [Value; N]) -> Vec<(String, Value)> {
    columns.iter().map(|column| column.to_string()).zip(values).collect()
}
