//! Comma-delimited tables: a header row followed by one record per row.
use crate::error::RentalSheetError;
use crate::table::Table;
use crate::table::Value;
use csv::ReaderBuilder;
use csv::Writer;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;

pub(super) fn read_csv(path: &Path) -> Result<Table, RentalSheetError> {
    // Opened here so a missing file surfaces as an io error
    read_records(File::open(path)?)
}

/// Cells are typed from their text since the format carries no types.
pub(super) fn read_records<R: Read>(input: R) -> Result<Table, RentalSheetError> {
    let mut reader = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(input);
    let columns = reader.headers()?.iter().map(str::to_owned).collect::<Vec<_>>();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(Value::infer).collect());
    }
    Ok(Table::new("", columns, rows))
}

pub(super) fn write_csv(table: &Table, path: &Path) -> Result<(), RentalSheetError> {
    write_records(table, File::create(path)?)?;
    Ok(())
}

/// Writes the header and every row, with dates as `YYYY-MM-DD` and booleans as `True`/`False`.
pub(super) fn write_records<W: Write>(table: &Table, output: W) -> Result<W, RentalSheetError> {
    let mut writer = Writer::from_writer(output);
    if !table.columns().is_empty() {
        writer.write_record(table.columns())?;
        for values in table.rows() {
            writer.write_record(values.iter().map(Value::to_string))?;
        }
    }
    writer.flush()?;
    writer.into_inner().map_err(|error| RentalSheetError::IoError(error.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn writes_plain_text() -> Result<(), RentalSheetError> {
        let check_in = NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date");
        let mut table = Table::new("", vec!["Nome do hóspede".to_owned(), "Data de entrada".to_owned(), "Pago".to_owned()], Vec::new());
        table.push_row([
            ("Nome do hóspede", Value::from("Silva, Ana")),
            ("Data de entrada", Value::from(check_in)),
            ("Pago", Value::from(false)),
        ]);
        table.push_row([("Nome do hóspede", Value::from("Bruno"))]);

        let bytes = write_records(&table, Vec::new())?;
        let text = String::from_utf8(bytes).expect("utf-8 output");
        assert_eq!(text, "Nome do hóspede,Data de entrada,Pago\n\"Silva, Ana\",2024-06-03,False\nBruno,,\n");
        Ok(())
    }

    #[test]
    fn reads_typed_values() -> Result<(), RentalSheetError> {
        let text = "Parceiro,A receber,A pagar\nAirbnb,120.5,30\nBooking,,\nSolo\n";
        let table = read_records(text.as_bytes())?;
        assert_eq!(table.columns(), ["Parceiro", "A receber", "A pagar"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0, "A receber"), Some(&Value::Number(120.5)));
        assert_eq!(table.get(1, "A pagar"), Some(&Value::Empty));
        assert_eq!(table.get(2, "A pagar"), Some(&Value::Empty));
        Ok(())
    }

    #[test]
    fn empty_input_is_empty_table() -> Result<(), RentalSheetError> {
        let table = read_records("".as_bytes())?;
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
        assert!(write_records(&table, Vec::new())?.is_empty());
        Ok(())
    }
}
