use crate::records::CHECK_IN;
use crate::records::GUEST_NAME;
use crate::records::UNIT_NUMBER;
use crate::table::Table;
use crate::table::Value;
use chrono::Days;
use chrono::NaiveDate;

/// Reservation filters; every criterion that is set must hold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReservationFilter {
    /// Case-insensitive part of the guest name; empty means any
    pub guest_name: Option<String>,
    /// Exact unit number; zero means any
    pub unit_number: Option<i64>,
    /// Check-in range, applied only when both bounds are set
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ReservationFilter {
    /// Check-ins during the `days` days up to and including `as_of`.
    pub fn recent(as_of: NaiveDate, days: u32) -> Self {
        ReservationFilter {
            date_from: Some(as_of.checked_sub_days(Days::new(days.into())).unwrap_or(NaiveDate::MIN)),
            date_to: Some(as_of),
            ..ReservationFilter::default()
        }
    }

    fn matches(&self, guest_name: Option<&Value>, unit_number: Option<&Value>, check_in: Option<&Value>) -> bool {
        if let Some(needle) = self.guest_name.as_deref().filter(|name| !name.is_empty()) {
            let needle = needle.to_lowercase();
            let found = guest_name
                .filter(|value| !value.is_empty())
                .map(|value| value.to_string().to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !found {
                return false;
            }
        }
        if let Some(unit) = self.unit_number.filter(|unit| *unit != 0) {
            if unit_number.and_then(Value::as_i64) != Some(unit) {
                return false;
            }
        }
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            match check_in.and_then(Value::as_date) {
                Some(date) if from <= date && date <= to => (),
                _ => return false,
            }
        }
        true
    }
}

/// Reservations passing every criterion set in `filter`; with none set, all of them.
pub fn filter_reservations(reservations: &Table, filter: &ReservationFilter) -> Table {
    let guest_name = reservations.column_index(GUEST_NAME);
    let unit_number = reservations.column_index(UNIT_NUMBER);
    let check_in = reservations.column_index(CHECK_IN);
    reservations.filter(|_, values| {
        filter.matches(
            guest_name.map(|index| &values[index]),
            unit_number.map(|index| &values[index]),
            check_in.map(|index| &values[index]),
        )
    })
}
