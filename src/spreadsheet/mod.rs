//! # Spreadsheet Processing Module
//!
//! Reads and writes the tables behind the record store. Office Open XML
//! workbooks (`.xlsx`, `.xlsm`) are parsed from their zip parts directly and
//! written back as single-sheet workbooks; `.csv` files are read and written
//! with the `csv` crate. Only the first worksheet of a workbook is used, and
//! its first populated row is the header.
mod cell;
mod csv_file;
mod excel;
mod reference;
mod sheet;
mod writer;
mod xlsx;

use crate::error::RentalSheetError;
use crate::error::ResultMessage;
use crate::spreadsheet::xlsx::XlsxWorkbook;
use crate::table::Table;
use std::ffi::OsStr;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading or writing spreadsheet files.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// A required part is missing from the workbook package
    #[error("Missing workbook part '{0}'")]
    FileError(String),

    /// The workbook declares no worksheet
    #[error("Spreadsheet '{0}' has no worksheet")]
    SpreadsheetEmptyError(String),

    /// A cell could not be converted: file, sheet, reference, reason
    #[error("Invalid cell {2} in sheet '{1}' of '{0}': {3}")]
    CellValueError(String, String, String, String),

    /// The file extension names no supported format
    #[error("Cannot detect file format for '{0}'")]
    UnsupportedFormat(String),
}

/// Table file formats, detected from the file extension.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    pub fn detect(path: &Path) -> Result<SheetFormat, SpreadsheetError> {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" => Ok(SheetFormat::Xlsx),
            "csv" => Ok(SheetFormat::Csv),
            _ => Err(SpreadsheetError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Reads the first sheet of a workbook, or a csv file, into a table named after the file.
pub fn read_table(path: &Path) -> Result<Table, RentalSheetError> {
    let message = format!("Read '{}'", path.display());
    let mut table = match SheetFormat::detect(path)? {
        SheetFormat::Xlsx => XlsxWorkbook::open(path)
            .and_then(|mut workbook| workbook.read_first_sheet())
            .with_prefix(&message)?,
        SheetFormat::Csv => csv_file::read_csv(path).with_prefix(&message)?,
    };
    if let Some(stem) = path.file_stem().and_then(OsStr::to_str) {
        table.name = stem.to_owned();
    }
    Ok(table)
}

/// Reads the first sheet of a workbook held in memory, such as an uploaded file.
pub fn read_workbook_bytes(name: &str, bytes: Vec<u8>) -> Result<Table, RentalSheetError> {
    XlsxWorkbook::from_bytes(name, bytes)
        .and_then(|mut workbook| workbook.read_first_sheet())
        .with_prefix(&format!("Read '{name}'"))
}

/// Writes the whole table to `path` in the format its extension names.
pub fn write_table(table: &Table, path: &Path) -> Result<(), RentalSheetError> {
    let message = format!("Write '{}'", path.display());
    match SheetFormat::detect(path)? {
        SheetFormat::Xlsx => writer::write_xlsx(table, path).with_prefix(&message),
        SheetFormat::Csv => csv_file::write_csv(table, path).with_prefix(&message),
    }
}

/// Writes the table as plain comma-delimited text, whatever the extension.
pub fn write_csv(table: &Table, path: &Path) -> Result<(), RentalSheetError> {
    csv_file::write_csv(table, path).with_prefix(&format!("Export '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;
    use chrono::NaiveDate;

    #[test]
    fn formats_from_extension() {
        assert_eq!(SheetFormat::detect(Path::new("reservas.xlsx")).ok(), Some(SheetFormat::Xlsx));
        assert_eq!(SheetFormat::detect(Path::new("RESERVAS.XLSM")).ok(), Some(SheetFormat::Xlsx));
        assert_eq!(SheetFormat::detect(Path::new("relatorio.csv")).ok(), Some(SheetFormat::Csv));
        assert!(SheetFormat::detect(Path::new("reservas.ods")).is_err());
        assert!(SheetFormat::detect(Path::new("reservas")).is_err());
    }

    #[test]
    fn workbook_bytes_are_readable() -> Result<(), RentalSheetError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("parceiros.xlsx");
        let mut table = Table::new("Sheet1", vec!["Parceiro".to_owned(), "A receber".to_owned()], Vec::new());
        table.push_row([("Parceiro", Value::from("Airbnb")), ("A receber", Value::from(120.5))]);
        write_table(&table, &path)?;

        assert_eq!(read_workbook_bytes("upload", std::fs::read(&path)?)?, table);
        assert!(read_workbook_bytes("upload", b"plain text".to_vec()).is_err());
        Ok(())
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = read_table(&dir.path().join("reservas.xlsx")).err().expect("missing file");
        assert!(error.is_not_found(), "{error}");
        let error = read_table(&dir.path().join("reservas.csv")).err().expect("missing file");
        assert!(error.is_not_found(), "{error}");
    }

    #[test]
    fn tables_survive_both_formats() -> Result<(), RentalSheetError> {
        let dir = tempfile::tempdir()?;
        let mut table = Table::new("reservas", vec!["Nome do hóspede".to_owned(), "Data de entrada".to_owned()], Vec::new());
        table.push_row([
            ("Nome do hóspede", Value::from("Ana Silva")),
            ("Data de entrada", Value::from(NaiveDate::from_ymd_opt(2024, 6, 3))),
        ]);

        for name in ["reservas.xlsx", "reservas.csv"] {
            let path = dir.path().join(name);
            write_table(&table, &path)?;
            let loaded = read_table(&path)?;
            assert_eq!(loaded, table, "{name}");
        }
        Ok(())
    }
}
