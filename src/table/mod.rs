//! # Table Model
//!
//! An in-memory table: named columns and positional rows of [`Value`]s.
//! A row identifier is the row's position in load order and is not persisted.
pub mod value;

pub use value::Value;

/// Positional row identifier.
pub type RowId = usize;

/// A table read from one sheet or csv file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Sheet name, or file stem for csv sources
    pub name: String,
    columns: Vec<String>,
    /// Every row holds exactly `columns.len()` values
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Builds a table from a header and rows; short rows are padded, long rows truncated.
    pub fn new(name: &str, columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Empty);
                row
            })
            .collect();
        Self {
            name: name.to_owned(),
            columns,
            rows,
        }
    }

    /// Zero rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn contains_row(&self, row: RowId) -> bool {
        row < self.rows.len()
    }

    pub fn row(&self, row: RowId) -> Option<&[Value]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Value]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Returns the cell, or `None` when the row or the column does not exist.
    pub fn get(&self, row: RowId, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|values| &values[index])
    }

    /// Values of one column in row order, `None` when the column is absent.
    pub fn column_values<'a>(&'a self, column: &str) -> Option<impl Iterator<Item = &'a Value> + 'a> {
        let index = self.column_index(column)?;
        Some(self.rows.iter().map(move |values| &values[index]))
    }

    /// Overwrites one cell. Unknown columns are appended and back-filled with empty cells.
    /// Returns false without touching anything when the row does not exist.
    pub fn set(&mut self, row: RowId, column: &str, value: Value) -> bool {
        if !self.contains_row(row) {
            return false;
        }
        let index = self.ensure_column(column);
        self.rows[row][index] = value;
        true
    }

    /// Appends a row and returns its identifier, which equals the prior row count.
    pub fn push_row<K, V, I>(&mut self, fields: I) -> RowId
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let id = self.rows.len();
        self.rows.push(vec![Value::Empty; self.columns.len()]);
        for (column, value) in fields {
            let index = self.ensure_column(column.as_ref());
            self.rows[id][index] = value.into();
        }
        id
    }

    /// Projection onto the given columns, in the given order. Unknown columns are skipped.
    pub fn select(&self, columns: &[&str]) -> Table {
        let indexes: Vec<(usize, &str)> = columns
            .iter()
            .filter_map(|column| self.column_index(column).map(|index| (index, *column)))
            .collect();
        Table {
            name: self.name.to_owned(),
            columns: indexes.iter().map(|(_, column)| (*column).to_owned()).collect(),
            rows: self
                .rows
                .iter()
                .map(|values| indexes.iter().map(|(index, _)| values[*index].clone()).collect())
                .collect(),
        }
    }

    /// Keeps the rows accepted by the predicate. Identifiers of the result are renumbered.
    pub fn filter<F>(&self, mut predicate: F) -> Table
    where
        F: FnMut(RowId, &[Value]) -> bool,
    {
        Table {
            name: self.name.to_owned(),
            columns: self.columns.to_owned(),
            rows: self
                .rows
                .iter()
                .enumerate()
                .filter(|(id, values)| predicate(*id, values.as_slice()))
                .map(|(_, values)| values.to_owned())
                .collect(),
        }
    }

    fn ensure_column(&mut self, column: &str) -> usize {
        if let Some(index) = self.column_index(column) {
            index
        } else {
            self.columns.push(column.to_owned());
            for values in &mut self.rows {
                values.push(Value::Empty);
            }
            self.columns.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partners() -> Table {
        Table::new(
            "Sheet1",
            vec!["Parceiro".to_owned(), "A receber".to_owned()],
            vec![
                vec![Value::from("Airbnb"), Value::Number(100.0)],
                vec![Value::from("Booking")],
            ],
        )
    }

    #[test]
    fn short_rows_are_padded() {
        let table = partners();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "A receber"), Some(&Value::Empty));
        assert_eq!(table.get(2, "A receber"), None);
        assert_eq!(table.get(0, "A pagar"), None);
    }

    #[test]
    fn set_creates_missing_columns() {
        let mut table = partners();
        assert!(table.set(1, "A pagar", Value::Number(20.0)));
        assert_eq!(table.columns(), ["Parceiro", "A receber", "A pagar"]);
        assert_eq!(table.get(0, "A pagar"), Some(&Value::Empty));
        assert_eq!(table.get(1, "A pagar"), Some(&Value::Number(20.0)));
    }

    #[test]
    fn set_out_of_range_is_a_no_op() {
        let mut table = partners();
        let before = table.clone();
        assert!(!table.set(2, "Parceiro", Value::from("Expedia")));
        assert!(!table.set(2, "Nova coluna", Value::from("x")));
        assert_eq!(table, before);
    }

    #[test]
    fn push_row_on_empty_table_builds_header() {
        let mut table = Table::empty();
        let id = table.push_row([("Parceiro", Value::from("Airbnb")), ("A pagar", Value::Number(5.0))]);
        assert_eq!(id, 0);
        assert_eq!(table.columns(), ["Parceiro", "A pagar"]);

        let id = table.push_row([("A receber", 7.5)]);
        assert_eq!(id, 1);
        assert_eq!(table.get(0, "A receber"), Some(&Value::Empty));
        assert_eq!(table.get(1, "Parceiro"), Some(&Value::Empty));
        assert_eq!(table.get(1, "A receber"), Some(&Value::Number(7.5)));
    }

    #[test]
    fn select_and_filter() {
        let table = partners();
        let selected = table.select(&["A receber", "Desconhecida", "Parceiro"]);
        assert_eq!(selected.columns(), ["A receber", "Parceiro"]);
        assert_eq!(selected.row(0), Some([Value::Number(100.0), Value::from("Airbnb")].as_slice()));

        let filtered = table.filter(|_, values| values[0] == Value::from("Booking"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.get(0, "Parceiro"), Some(&Value::from("Booking")));
    }
}
