//! File access for single tables.
//!
//! The plain functions never fail: a table that cannot be read loads as an
//! empty table, and write failures come back as `false`, each logged once.
//! The `try_` variants return the error instead.
use crate::error::RentalSheetError;
use crate::spreadsheet;
use crate::spreadsheet::SheetFormat;
use crate::table::RowId;
use crate::table::Table;
use crate::table::Value;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tracing::error;
use tracing::info;
use tracing::warn;

pub fn try_load(path: &Path) -> Result<Table, RentalSheetError> {
    spreadsheet::read_table(path)
}

/// Reads a table, falling back to an empty one when the file is missing or unreadable.
pub fn load(path: &Path) -> Table {
    match try_load(path) {
        Ok(table) => {
            info!("Loaded columns from '{}': {:?}", path.display(), table.columns());
            table
        }
        Err(err) if err.is_not_found() => {
            warn!("File '{}' was not found", path.display());
            Table::empty()
        }
        Err(err) => {
            error!("Failed to load '{}': {err}", path.display());
            Table::empty()
        }
    }
}

/// Replaces the file with the whole table, written to a sibling file first and renamed over it.
pub fn try_save(table: &Table, path: &Path) -> Result<(), RentalSheetError> {
    SheetFormat::detect(path)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let staging = staging_path(path);
    let written = spreadsheet::write_table(table, &staging)
        .and_then(|_| fs::rename(&staging, path).map_err(RentalSheetError::from));
    if written.is_err() {
        let _ = fs::remove_file(&staging);
    }
    written
}

pub fn save(table: &Table, path: &Path) -> bool {
    match try_save(table, path) {
        Ok(()) => {
            info!("Saved {} rows to '{}'", table.len(), path.display());
            true
        }
        Err(err) => {
            error!("Failed to save '{}': {err}", path.display());
            false
        }
    }
}

pub fn try_export(table: &Table, path: &Path) -> Result<(), RentalSheetError> {
    spreadsheet::write_csv(table, path)
}

/// Writes the table as comma-delimited text with its header and no row identifiers.
pub fn export(table: &Table, path: &Path) -> bool {
    match try_export(table, path) {
        Ok(()) => {
            info!("Exported {} rows to '{}'", table.len(), path.display());
            true
        }
        Err(err) => {
            error!("Failed to export '{}': {err}", path.display());
            false
        }
    }
}

/// Overwrites the named fields of an existing row; unknown fields become new columns.
/// Returns false, without touching the table, when the row does not exist.
pub(crate) fn apply_update<K, V, I>(table: &mut Table, row: RowId, fields: I) -> bool
where
    K: AsRef<str>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    if !table.contains_row(row) {
        warn!("Row {row} was not found in '{}'", table.name);
        return false;
    }
    for (column, value) in fields {
        table.set(row, column.as_ref(), value.into());
    }
    true
}

/// Updates a row and saves the table. A missing row leaves both table and file untouched.
/// Returns whether the change reached the file; after a failed save the table
/// keeps the change.
pub fn update_row<K, V, I>(table: &mut Table, path: &Path, row: RowId, fields: I) -> bool
where
    K: AsRef<str>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    apply_update(table, row, fields) && save(table, path)
}

/// Appends a row, saves the table and hands it back; the new row's identifier is the prior row count.
pub fn append_row<K, V, I>(mut table: Table, path: &Path, fields: I) -> Table
where
    K: AsRef<str>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    table.push_row(fields);
    save(&table, path);
    table
}

/// `reservas.xlsx` is staged as `reservas.tmp.xlsx` so the format still follows the extension.
fn staging_path(path: &Path) -> PathBuf {
    let extension = path.extension().map(|extension| extension.to_string_lossy()).unwrap_or_default();
    path.with_extension(format!("tmp.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::MoneyCents;
    use crate::records::Owner;
    use crate::records::Record;
    use chrono::NaiveDate;

    fn reservations() -> Table {
        let mut table = Table::new("reservas", Vec::new(), Vec::new());
        table.push_row([
            ("Nome do hóspede", Value::from("Ana Silva")),
            ("Data de entrada", Value::from(NaiveDate::from_ymd_opt(2024, 6, 3))),
            ("Número do apartamento", Value::from(101i64)),
            ("Valor da hospedagem", Value::from(MoneyCents::new(45_090).to_f64())),
        ]);
        table.push_row([
            ("Nome do hóspede", Value::from("Bruno")),
            ("Data de entrada", Value::from(NaiveDate::from_ymd_opt(2024, 6, 2))),
            ("Número do apartamento", Value::from(202i64)),
            ("Valor da hospedagem", Value::from(0.1)),
        ]);
        table
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("reservas.xlsx");
        let table = reservations();
        assert!(save(&table, &path));
        assert_eq!(load(&path), table);
        assert!(!dir.path().join("reservas.tmp.xlsx").exists());
    }

    #[test]
    fn missing_or_broken_files_load_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert_eq!(load(&dir.path().join("reservas.xlsx")), Table::empty());

        let broken = dir.path().join("parceiros.xlsx");
        fs::write(&broken, b"not a zip archive").expect("write file");
        assert_eq!(load(&broken), Table::empty());
        assert!(try_load(&broken).is_err());
    }

    #[test]
    fn save_reports_failure() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(!save(&reservations(), &dir.path().join("reservas.ods")));
        assert!(save(&reservations(), &dir.path().join("nested").join("reservas.xlsx")));
    }

    #[test]
    fn unknown_row_leaves_file_untouched() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("reservas.xlsx");
        let mut table = reservations();
        assert!(save(&table, &path));
        let before = fs::read(&path).expect("read file");

        assert!(!update_row(&mut table, &path, 2, [("Bloco", "C")]));
        assert_eq!(table, reservations());
        assert_eq!(fs::read(&path).expect("read file"), before);
    }

    #[test]
    fn update_saves_changed_fields() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("reservas.xlsx");
        let mut table = reservations();
        assert!(update_row(&mut table, &path, 1, [("Nome do hóspede", Value::from("Bruno Costa")), ("Bloco", Value::from("C"))]));
        let loaded = load(&path);
        assert_eq!(loaded.get(1, "Nome do hóspede"), Some(&Value::from("Bruno Costa")));
        assert_eq!(loaded.get(1, "Bloco"), Some(&Value::from("C")));
        assert_eq!(loaded.get(0, "Bloco"), Some(&Value::Empty));
    }

    #[test]
    fn failed_update_save_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("reservas.ods");
        let mut table = reservations();
        assert!(!update_row(&mut table, &path, 0, [("Bloco", "C")]));
        assert_eq!(table.get(0, "Bloco"), Some(&Value::from("C")));
        assert!(!path.exists());
    }

    #[test]
    fn csv_keeps_text_that_looks_numeric() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("proprietarios.csv");
        let owner = Owner {
            full_name: "Carlos Souza".to_owned(),
            email: "carlos@example.com".to_owned(),
            phone: "011987654321".to_owned(),
            document: "01234567890".to_owned(),
        };
        let table = append_row(Table::empty(), &path, owner.to_fields());
        let loaded = load(&path);
        assert_eq!(loaded.columns(), table.columns());
        assert_eq!(loaded.get(0, "Documento"), Some(&Value::from("01234567890")));
        assert_eq!(Owner::from_row(&loaded, 0), Ok(owner));
    }

    #[test]
    fn csv_save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("reservas.csv");
        let mut table = reservations();
        table.set(0, "Bloco", Value::from("1.50"));
        assert!(save(&table, &path));
        assert_eq!(load(&path), table);
    }

    #[test]
    fn append_adds_one_row() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("reservas.xlsx");
        let table = reservations();
        let before = table.len();
        let table = append_row(table, &path, [("Nome do hóspede", "Carla")]);
        assert_eq!(table.len(), before + 1);
        assert_eq!(table.get(before, "Nome do hóspede"), Some(&Value::from("Carla")));
        assert_eq!(load(&path).len(), before + 1);
    }

    #[test]
    fn export_writes_plain_csv() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("relatorio_semanal.csv");
        assert!(export(&reservations(), &path));
        let text = fs::read_to_string(&path).expect("read file");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Nome do hóspede,Data de entrada,Número do apartamento,Valor da hospedagem")
        );
        assert_eq!(lines.next(), Some("Ana Silva,2024-06-03,101,450.9"));
        assert!(!export(&reservations(), &dir.path().join("missing").join("out.csv")));
    }
}
