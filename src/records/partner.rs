use crate::money::MoneyCents;
use crate::records::fields;
use crate::records::money_cell;
use crate::records::money_field;
use crate::records::text_field;
use crate::records::Record;
use crate::records::RecordError;
use crate::table::RowId;
use crate::table::Table;
use crate::table::Value;
use serde::Deserialize;
use serde::Serialize;

pub const PARTNER: &str = "Parceiro";
pub const RECEIVABLE: &str = "A receber";
pub const PAYABLE: &str = "A pagar";

/// A business partner with open balances in both directions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    pub receivable: MoneyCents,
    pub payable: MoneyCents,
}

impl Record for Partner {
    const COLUMNS: &'static [&'static str] = &[PARTNER, RECEIVABLE, PAYABLE];

    fn from_row(table: &Table, row: RowId) -> Result<Self, RecordError> {
        Ok(Partner {
            name: text_field(table, row, PARTNER)?,
            receivable: money_field(table, row, RECEIVABLE)?,
            payable: money_field(table, row, PAYABLE)?,
        })
    }

    fn to_fields(&self) -> Vec<(String, Value)> {
        fields(
            Self::COLUMNS,
            [
                Value::from(self.name.as_str()),
                money_cell(self.receivable),
                money_cell(self.payable),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_round_trip() {
        let partner = Partner {
            name: "Lavanderia Central".to_owned(),
            receivable: MoneyCents::new(12_050),
            payable: MoneyCents::new(-3_000),
        };
        let mut table = Table::new("parceiros", Vec::new(), Vec::new());
        let row = table.push_row(partner.to_fields());
        assert_eq!(table.columns(), Partner::COLUMNS);
        assert_eq!(Partner::from_row(&table, row), Ok(partner));
    }

    #[test]
    fn missing_column_is_reported() {
        let table = Table::new("parceiros", vec![PARTNER.to_owned(), RECEIVABLE.to_owned()], vec![Vec::new()]);
        assert_eq!(Partner::from_row(&table, 0), Err(RecordError::MissingColumn(PAYABLE.to_owned())));
    }
}
