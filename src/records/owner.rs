use crate::records::fields;
use crate::records::text_field;
use crate::records::Record;
use crate::records::RecordError;
use crate::table::RowId;
use crate::table::Table;
use crate::table::Value;
use serde::Deserialize;
use serde::Serialize;

pub const FULL_NAME: &str = "Nome Completo";
pub const EMAIL: &str = "Email";
pub const PHONE: &str = "Telefone";
pub const DOCUMENT: &str = "Documento";

/// A unit owner's contact details.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub document: String,
}

impl Record for Owner {
    const COLUMNS: &'static [&'static str] = &[FULL_NAME, EMAIL, PHONE, DOCUMENT];

    fn from_row(table: &Table, row: RowId) -> Result<Self, RecordError> {
        Ok(Owner {
            full_name: text_field(table, row, FULL_NAME)?,
            email: text_field(table, row, EMAIL)?,
            phone: text_field(table, row, PHONE)?,
            document: text_field(table, row, DOCUMENT)?,
        })
    }

    fn to_fields(&self) -> Vec<(String, Value)> {
        fields(
            Self::COLUMNS,
            [
                Value::from(self.full_name.as_str()),
                Value::from(self.email.as_str()),
                Value::from(self.phone.as_str()),
                Value::from(self.document.as_str()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_read_as_text() {
        let mut table = Table::new("proprietarios", Vec::new(), Vec::new());
        table.push_row([
            (FULL_NAME, Value::from("Carlos Souza")),
            (EMAIL, Value::from("carlos@example.com")),
            (PHONE, Value::from(11987654321i64)),
            (DOCUMENT, Value::from("123.456.789-00")),
        ]);
        let owner = Owner::from_row(&table, 0);
        assert_eq!(
            owner,
            Ok(Owner {
                full_name: "Carlos Souza".to_owned(),
                email: "carlos@example.com".to_owned(),
                phone: "11987654321".to_owned(),
                document: "123.456.789-00".to_owned(),
            })
        );
    }
}
