use crate::money::MoneyCents;
use crate::records::Record;
use crate::records::Reservation;
use crate::records::CHECK_IN;
use crate::records::LODGING_AMOUNT;
use crate::records::PAYABLE;
use crate::records::RECEIVABLE;
use crate::records::UNIT_NUMBER;
use crate::report::column_total;
use crate::report::report_missing;
use crate::table::Table;
use chrono::Days;
use chrono::NaiveDate;
use std::collections::HashSet;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// The weekly report.
///
/// Lodging and occupancy cover only the reservations checking in within the
/// window. Payable and receivable are the owners' and partners' whole
/// balances, not limited to the week.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeeklyTotals {
    /// Reservations checking in within the window
    pub subset: Table,
    pub total_lodging: MoneyCents,
    /// Owners' `A pagar`, all rows
    pub total_payable: MoneyCents,
    /// Partners' `A receber`, all rows
    pub total_receivable: MoneyCents,
    /// Distinct unit numbers in the subset
    pub occupied_units: usize,
    pub missing_columns: Vec<String>,
}

pub fn weekly_totals(reservations: &Table, partners: &Table, owners: &Table, as_of: NaiveDate) -> WeeklyTotals {
    weekly_totals_with(reservations, partners, owners, as_of, DEFAULT_LOOKBACK_DAYS)
}

/// Weekly totals over the inclusive window `[as_of - lookback_days, as_of]`.
pub fn weekly_totals_with(
    reservations: &Table,
    partners: &Table,
    owners: &Table,
    as_of: NaiveDate,
    lookback_days: u32,
) -> WeeklyTotals {
    let mut missing_columns = Vec::new();
    let start = as_of.checked_sub_days(Days::new(lookback_days.into())).unwrap_or(NaiveDate::MIN);

    let check_in = reservations.column_index(CHECK_IN);
    if check_in.is_none() {
        report_missing(reservations, CHECK_IN, &mut missing_columns);
    }
    let subset = reservations.filter(|_, values| {
        check_in
            .and_then(|index| values[index].as_date())
            .map(|date| start <= date && date <= as_of)
            .unwrap_or(false)
    });

    let total_lodging = column_total(&subset, LODGING_AMOUNT, &mut missing_columns);
    let occupied_units = match subset.column_values(UNIT_NUMBER) {
        Some(values) => values
            .filter(|value| !value.is_empty())
            .map(|value| value.to_string())
            .collect::<HashSet<_>>()
            .len(),
        None => {
            report_missing(&subset, UNIT_NUMBER, &mut missing_columns);
            0
        }
    };
    let total_payable = column_total(owners, PAYABLE, &mut missing_columns);
    let total_receivable = column_total(partners, RECEIVABLE, &mut missing_columns);

    WeeklyTotals {
        subset,
        total_lodging,
        total_payable,
        total_receivable,
        occupied_units,
        missing_columns,
    }
}

/// The week's reservations on the eight reservation columns, for display or export.
pub fn weekly_detail(totals: &WeeklyTotals) -> Table {
    totals.subset.select(Reservation::COLUMNS)
}
