use crate::money::MoneyCents;
use crate::records::date_field;
use crate::records::fields;
use crate::records::integer_field;
use crate::records::money_cell;
use crate::records::money_field;
use crate::records::text_field;
use crate::records::Record;
use crate::records::RecordError;
use crate::table::RowId;
use crate::table::Table;
use crate::table::Value;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

pub const GUEST_NAME: &str = "Nome do hóspede";
pub const CHECK_IN: &str = "Data de entrada";
pub const CHECK_OUT: &str = "Data de saída";
pub const UNIT_NUMBER: &str = "Número do apartamento";
pub const LODGING_AMOUNT: &str = "Valor da hospedagem";
pub const CONDOMINIUM: &str = "Nome do Condomínio";
pub const BLOCK: &str = "Bloco";
pub const ADDRESS: &str = "Endereço";

/// A guest stay in one unit. Check-out is not checked against check-in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub guest_name: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub unit_number: Option<i64>,
    pub lodging_amount: MoneyCents,
    pub condominium: String,
    pub block: String,
    pub address: String,
}

impl Record for Reservation {
    const COLUMNS: &'static [&'static str] = &[
        GUEST_NAME,
        CHECK_IN,
        CHECK_OUT,
        UNIT_NUMBER,
        LODGING_AMOUNT,
        CONDOMINIUM,
        BLOCK,
        ADDRESS,
    ];

    fn from_row(table: &Table, row: RowId) -> Result<Self, RecordError> {
        Ok(Reservation {
            guest_name: text_field(table, row, GUEST_NAME)?,
            check_in: date_field(table, row, CHECK_IN)?,
            check_out: date_field(table, row, CHECK_OUT)?,
            unit_number: integer_field(table, row, UNIT_NUMBER)?,
            lodging_amount: money_field(table, row, LODGING_AMOUNT)?,
            condominium: text_field(table, row, CONDOMINIUM)?,
            block: text_field(table, row, BLOCK)?,
            address: text_field(table, row, ADDRESS)?,
        })
    }

    fn to_fields(&self) -> Vec<(String, Value)> {
        fields(
            Self::COLUMNS,
            [
                Value::from(self.guest_name.as_str()),
                Value::from(self.check_in),
                Value::from(self.check_out),
                Value::from(self.unit_number),
                money_cell(self.lodging_amount),
                Value::from(self.condominium.as_str()),
                Value::from(self.block.as_str()),
                Value::from(self.address.as_str()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Reservation {
        Reservation {
            guest_name: "Ana Silva".to_owned(),
            check_in: NaiveDate::from_ymd_opt(2024, 6, 3),
            check_out: NaiveDate::from_ymd_opt(2024, 6, 7),
            unit_number: Some(101),
            lodging_amount: MoneyCents::new(45_090),
            condominium: "Residencial Mar Azul".to_owned(),
            block: "B".to_owned(),
            address: "Rua das Flores, 12".to_owned(),
        }
    }

    #[test]
    fn fields_follow_headers() {
        let fields = sample().to_fields();
        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, Reservation::COLUMNS);
        assert_eq!(fields[4].1, Value::Number(450.9));
    }

    #[test]
    fn row_round_trip() {
        let mut table = Table::new("reservas", Vec::new(), Vec::new());
        let row = table.push_row(sample().to_fields());
        assert_eq!(Reservation::from_row(&table, row), Ok(sample()));
    }

    #[test]
    fn blank_cells_are_defaults() {
        let columns = Reservation::COLUMNS.iter().map(|column| column.to_string()).collect();
        let table = Table::new("reservas", columns, vec![Vec::new()]);
        assert_eq!(Reservation::from_row(&table, 0), Ok(Reservation::default()));
    }
}
