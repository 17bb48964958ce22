//! # Report Engine
//!
//! Read-only aggregates over the store's tables. Nothing here fails: an empty
//! table sums to zero, cells that are not numbers are skipped, and a missing
//! column counts as zero and is named in the result's `missing_columns`.
mod filter;
mod partners;
mod weekly;

pub use filter::filter_reservations;
pub use filter::ReservationFilter;
pub use partners::partner_summary;
pub use partners::PartnerLine;
pub use partners::PartnerSummary;
pub use weekly::weekly_detail;
pub use weekly::weekly_totals;
pub use weekly::weekly_totals_with;
pub use weekly::WeeklyTotals;
pub use weekly::DEFAULT_LOOKBACK_DAYS;

use crate::money::MoneyCents;
use crate::records::money_value;
use crate::records::LODGING_AMOUNT;
use crate::records::PAYABLE;
use crate::records::RECEIVABLE;
use crate::table::Table;
use tracing::warn;

/// Totals over whole tables, without any date window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Balances {
    /// Lodging amounts of every reservation
    pub total_revenue: MoneyCents,
    pub partners_receivable: MoneyCents,
    pub partners_payable: MoneyCents,
    pub missing_columns: Vec<String>,
}

pub fn balances(reservations: &Table, partners: &Table) -> Balances {
    let mut missing_columns = Vec::new();
    let total_revenue = column_total(reservations, LODGING_AMOUNT, &mut missing_columns);
    let partners_receivable = column_total(partners, RECEIVABLE, &mut missing_columns);
    let partners_payable = column_total(partners, PAYABLE, &mut missing_columns);
    Balances {
        total_revenue,
        partners_receivable,
        partners_payable,
        missing_columns,
    }
}

/// Sums a money column; `None` when the table has no such column.
pub(crate) fn column_sum(table: &Table, column: &str) -> Option<MoneyCents> {
    let values = table.column_values(column)?;
    Some(values.filter_map(money_value).sum())
}

/// Like [`column_sum`], but a missing column counts as zero and is recorded.
pub(crate) fn column_total(table: &Table, column: &str, missing_columns: &mut Vec<String>) -> MoneyCents {
    column_sum(table, column).unwrap_or_else(|| {
        report_missing(table, column, missing_columns);
        MoneyCents::ZERO
    })
}

pub(crate) fn report_missing(table: &Table, column: &str, missing_columns: &mut Vec<String>) {
    warn!("Column '{column}' is missing from '{}'", table.name);
    if !missing_columns.iter().any(|missing| missing == column) {
        missing_columns.push(column.to_owned());
    }
}
