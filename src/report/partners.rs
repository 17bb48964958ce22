use crate::money::MoneyCents;
use crate::records::money_value;
use crate::records::PARTNER;
use crate::records::PAYABLE;
use crate::records::RECEIVABLE;
use crate::report::column_sum;
use crate::report::report_missing;
use crate::table::Table;

/// One partner's balances, for charting.
#[derive(Clone, Debug, PartialEq)]
pub struct PartnerLine {
    pub name: String,
    pub receivable: MoneyCents,
    pub payable: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartnerSummary {
    pub table: Table,
    pub lines: Vec<PartnerLine>,
    pub total_receivable: MoneyCents,
    pub total_payable: MoneyCents,
    pub missing_columns: Vec<String>,
}

/// Sums what partners owe and are owed.
/// Both totals are zero unless both `A receber` and `A pagar` are present.
pub fn partner_summary(partners: &Table) -> PartnerSummary {
    let mut missing_columns = Vec::new();
    for column in [RECEIVABLE, PAYABLE] {
        if !partners.has_column(column) {
            report_missing(partners, column, &mut missing_columns);
        }
    }
    let (total_receivable, total_payable) = match (column_sum(partners, RECEIVABLE), column_sum(partners, PAYABLE)) {
        (Some(receivable), Some(payable)) => (receivable, payable),
        _ => (MoneyCents::ZERO, MoneyCents::ZERO),
    };

    let amount = |row, column| {
        partners
            .get(row, column)
            .and_then(money_value)
            .unwrap_or(MoneyCents::ZERO)
    };
    let lines = (0..partners.len())
        .map(|row| PartnerLine {
            name: partners.get(row, PARTNER).map(ToString::to_string).unwrap_or_default(),
            receivable: amount(row, RECEIVABLE),
            payable: amount(row, PAYABLE),
        })
        .collect();

    PartnerSummary {
        table: partners.clone(),
        lines,
        total_receivable,
        total_payable,
        missing_columns,
    }
}
