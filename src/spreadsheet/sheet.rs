use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::SpreadsheetError;
use crate::table::Table;
use crate::table::Value;
use std::collections::HashMap;

/// Cells collected from one worksheet, with the bounds of the populated area.
pub(crate) struct Sheet {
    /// Source file name
    pub(crate) file_name: String,
    /// Sheet name
    pub(crate) name: String,
    /// Non-empty cells in document order
    pub(crate) cells: Vec<Cell>,
    pub(crate) row_lower_bound: Option<usize>,
    pub(crate) row_upper_bound: Option<usize>,
    pub(crate) col_lower_bound: Option<usize>,
    pub(crate) col_upper_bound: Option<usize>,
}

impl Sheet {
    pub(super) fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            row_lower_bound: None,
            row_upper_bound: None,
            col_lower_bound: None,
            col_upper_bound: None,
        }
    }

    pub(super) fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row, cell.col);
        self.cells.push(cell);
    }

    fn update_bound(&mut self, row: usize, col: usize) {
        if self.row_lower_bound.map(|row_lower_bound| row < row_lower_bound).unwrap_or(true) {
            self.row_lower_bound = Some(row);
        }
        if self.row_upper_bound.map(|row_upper_bound| row_upper_bound < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
        if self.col_lower_bound.map(|col_lower_bound| col < col_lower_bound).unwrap_or(true) {
            self.col_lower_bound = Some(col);
        }
        if self.col_upper_bound.map(|col_upper_bound| col_upper_bound < col).unwrap_or(true) {
            self.col_upper_bound = Some(col);
        }
    }

    /// Turns the populated area into a table whose first row is the header.
    ///
    /// Blank header cells are named `Unnamed: <position>` and repeated names get a
    /// `.1`, `.2`, ... suffix so every column stays addressable. Blank rows inside
    /// the area are kept, so row identifiers follow the sheet layout.
    pub(super) fn into_table(self, shared_strings: &[String]) -> Result<Table, SpreadsheetError> {
        let (Some(header_row), Some(row_upper), Some(col_lower), Some(col_upper)) = (
            self.row_lower_bound,
            self.row_upper_bound,
            self.col_lower_bound,
            self.col_upper_bound,
        ) else {
            return Ok(Table::new(&self.name, Vec::new(), Vec::new()));
        };

        let width = col_upper - col_lower + 1;
        let mut header = vec![Value::Empty; width];
        let mut rows = vec![vec![Value::Empty; width]; row_upper - header_row];
        for cell in &self.cells {
            let value = cell.to_value(shared_strings).map_err(|message| {
                SpreadsheetError::CellValueError(
                    self.file_name.to_owned(),
                    self.name.to_owned(),
                    cell.reference(),
                    message,
                )
            })?;
            let col = cell.col - col_lower;
            if cell.row == header_row {
                header[col] = value;
            } else {
                rows[cell.row - header_row - 1][col] = value;
            }
        }

        let mut seen = HashMap::<String, usize>::new();
        let columns = header
            .iter()
            .enumerate()
            .map(|(position, value)| {
                let name = if value.is_empty() {
                    format!("Unnamed: {position}")
                } else {
                    value.to_string()
                };
                let count = seen.entry(name.to_owned()).or_insert(0);
                *count += 1;
                if *count == 1 {
                    name
                } else {
                    format!("{name}.{}", *count - 1)
                }
            })
            .collect();
        Ok(Table::new(&self.name, columns, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::CellType;

    fn push(sheet: &mut Sheet, row: usize, col: usize, value: &str) {
        sheet.push(Cell {
            row,
            col,
            kind: CellType::InlineString,
            value: value.to_owned(),
        });
    }

    #[test]
    fn sheet_initial() {
        let sheet = Sheet::new("", "");

        assert!(sheet.cells.is_empty());
        assert_eq!(sheet.row_lower_bound, None);
        assert_eq!(sheet.row_upper_bound, None);
        assert_eq!(sheet.col_lower_bound, None);
        assert_eq!(sheet.col_upper_bound, None);
    }

    #[test]
    fn sheet_update() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 1, 1, "a");
        push(&mut sheet, 1, 3, "b");
        push(&mut sheet, 3, 1, "c");
        push(&mut sheet, 3, 3, "d");

        assert_eq!(sheet.cells.len(), 4);
        assert_eq!(sheet.row_lower_bound, Some(1));
        assert_eq!(sheet.row_upper_bound, Some(3));
        assert_eq!(sheet.col_lower_bound, Some(1));
        assert_eq!(sheet.col_upper_bound, Some(3));
    }

    #[test]
    fn header_and_blank_rows() -> Result<(), SpreadsheetError> {
        let mut sheet = Sheet::new("parceiros.xlsx", "Sheet1");
        push(&mut sheet, 1, 1, "Parceiro");
        push(&mut sheet, 1, 3, "Parceiro");
        push(&mut sheet, 2, 1, "Airbnb");
        push(&mut sheet, 4, 3, "Booking");

        let table = sheet.into_table(&[])?;
        assert_eq!(table.columns(), ["Parceiro", "Unnamed: 1", "Parceiro.1"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0, "Parceiro"), Some(&Value::from("Airbnb")));
        assert!(table.row(1).map(|row| row.iter().all(Value::is_empty)).unwrap_or(false));
        assert_eq!(table.get(2, "Parceiro.1"), Some(&Value::from("Booking")));
        Ok(())
    }

    #[test]
    fn empty_sheet_is_empty_table() -> Result<(), SpreadsheetError> {
        let table = Sheet::new("", "Sheet1").into_table(&[])?;
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
        Ok(())
    }

    #[test]
    fn bad_cell_reports_reference() {
        let mut sheet = Sheet::new("reservas.xlsx", "Sheet1");
        push(&mut sheet, 0, 0, "Valor da hospedagem");
        sheet.push(Cell {
            row: 1,
            col: 0,
            kind: CellType::Number,
            value: "abc".to_owned(),
        });
        let error = sheet.into_table(&[]).err().expect("invalid number");
        assert!(error.to_string().contains("A2"), "{error}");
    }
}
