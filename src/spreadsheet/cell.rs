use crate::spreadsheet::reference::index_to_reference;
use crate::table::Value;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;

/// Types of cell data in workbook files.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values (true/false)
    Boolean,
    /// Numeric values
    Number,
    /// Date/time values stored as numbers from 1900 epoch
    NumberDateTime1900,
    /// Date values stored as numbers from 1900 epoch
    NumberDate1900,
    /// Time values stored as numbers from 1900 epoch
    NumberTime1900,
    /// Date/time values stored as numbers from 1904 epoch
    NumberDateTime1904,
    /// Date values stored as numbers from 1904 epoch
    NumberDate1904,
    /// Time values stored as numbers from 1904 epoch
    NumberTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Inline string values
    InlineString,
    /// Shared string table references
    SharedString,
    /// Error values
    Error,
}

impl CellType {
    /// Parses built-in Excel number format IDs to determine cell type.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Parses custom number format strings to determine cell type.
    /// Quoted literals, escaped characters and bracketed sections are ignored.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_date = false;
        let mut is_time = false;
        let mut is_color = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' if !is_escaped => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_literal && !is_color => is_literal = true,

                ']' if is_color => is_color = false,
                '[' if !is_color && !is_literal => is_color = true,
                _ if is_literal || is_color => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time, is_1904) {
            (true, true, false) => Self::NumberDateTime1900,
            (true, true, true) => Self::NumberDateTime1904,
            (true, false, false) => Self::NumberDate1900,
            (true, false, true) => Self::NumberDate1904,
            (false, true, false) => Self::NumberTime1900,
            (false, true, true) => Self::NumberTime1904,
            (false, false, _) => Self::Number,
        }
    }

    const fn is_1904(&self) -> bool {
        matches!(self, Self::NumberDateTime1904 | Self::NumberDate1904 | Self::NumberTime1904)
    }
}

/// Represents a single cell in a worksheet with position, type, and raw value.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    /// Row index (0-based)
    pub(crate) row: usize,
    /// Column index (0-based)
    pub(crate) col: usize,
    /// Cell data type
    pub(crate) kind: CellType,
    /// Raw cell value as stored in the sheet part
    pub(crate) value: String,
}

impl Cell {
    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub(crate) fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Converts the raw value into a typed table value.
    /// Shared string cells hold an index into `shared_strings`.
    pub(crate) fn to_value(&self, shared_strings: &[String]) -> Result<Value, String> {
        let value = match self.kind {
            CellType::Empty | CellType::Error => Value::Empty,
            CellType::Boolean => Value::Bool(self.value == "1" || self.value.eq_ignore_ascii_case("true")),
            CellType::Number => Value::Number(self.to_double()?),
            CellType::NumberDate1900 | CellType::NumberDate1904 => Value::Date(self.to_date()?),
            CellType::NumberDateTime1900 | CellType::NumberDateTime1904 => Value::DateTime(self.to_datetime()?),
            CellType::NumberTime1900 | CellType::NumberTime1904 => Value::Text(to_time_string(self.to_double()?)),
            CellType::IsoDateTime => self.parse_iso()?,
            CellType::InlineString => Value::Text(self.value.to_owned()),
            CellType::SharedString => {
                let index = self
                    .value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| format!("parse '{}' to shared string index failed", self.value))?;
                let text = shared_strings
                    .get(index)
                    .ok_or_else(|| format!("shared string {index} does not exist"))?;
                Value::Text(text.to_owned())
            }
        };
        Ok(value)
    }

    fn to_double(&self) -> Result<f64, String> {
        self.value.trim().parse::<f64>().map_err(|_| format!("parse '{}' to double failed", self.value))
    }

    /// Converts a serial day number to a date, honouring the Lotus 1-2-3 leap year bug.
    fn to_date(&self) -> Result<NaiveDate, String> {
        let days = self.to_double()?.trunc() as i64;
        let offset = if self.kind.is_1904() {
            days + 1_462
        } else if days < 60 {
            days + 1
        } else {
            days
        };
        excel_epoch()
            .checked_add_signed(Duration::days(offset))
            .ok_or_else(|| format!("parse '{}' to date failed", self.value))
    }

    /// Date-times are rounded to the millisecond.
    fn to_datetime(&self) -> Result<NaiveDateTime, String> {
        let date = self.to_date()?;
        let fraction = self.to_double()?.fract();
        let milliseconds = (fraction * 86_400_000f64).round() as i64;
        date.and_hms_opt(0, 0, 0)
            .and_then(|midnight| midnight.checked_add_signed(Duration::milliseconds(milliseconds)))
            .ok_or_else(|| format!("parse '{}' to datetime failed", self.value))
    }

    fn parse_iso(&self) -> Result<Value, String> {
        let value = self.value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(Value::Date(date))
        } else {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(Value::DateTime)
                .map_err(|_| format!("parse '{}' to NaiveDateTime failed", self.value))
        }
    }
}

/// Day zero of the 1900 date system once the fictitious 1900-02-29 is accounted for.
pub(crate) fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Serial day number of a date in the 1900 date system.
pub(crate) fn to_serial_date(date: NaiveDate) -> i64 {
    let offset = (date - excel_epoch()).num_days();
    if offset < 61 {
        offset - 1
    } else {
        offset
    }
}

/// Serial number (days plus day fraction) of a date-time in the 1900 date system.
pub(crate) fn to_serial_datetime(datetime: NaiveDateTime) -> f64 {
    let days = to_serial_date(datetime.date()) as f64;
    let milliseconds = (datetime - datetime.date().and_time(chrono::NaiveTime::MIN)).num_milliseconds();
    days + milliseconds as f64 / 86_400_000f64
}

/// Formats a day fraction as `HH:MM:SS`.
pub(crate) fn to_time_string(factor: f64) -> String {
    let mut seconds = (factor.fract() * 86_400f64).round() as i64;
    let hours = seconds / 3_600;
    seconds %= 3_600;
    let minutes = seconds / 60;
    seconds %= 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(kind: CellType, value: &str) -> Cell {
        Cell {
            row: 0,
            col: 0,
            kind,
            value: value.to_owned(),
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn custom_number_formats() {
        assert_eq!(CellType::parse_custom_number_format("dd/mm/yyyy", false), CellType::NumberDate1900);
        assert_eq!(CellType::parse_custom_number_format("dd/mm/yyyy hh:mm", true), CellType::NumberDateTime1904);
        assert_eq!(CellType::parse_custom_number_format("hh:mm:ss", false), CellType::NumberTime1900);
        assert_eq!(CellType::parse_custom_number_format("\"R$\" #,##0.00", false), CellType::Number);
        assert_eq!(CellType::parse_custom_number_format("[Red]0.00;\"days\"", false), CellType::Number);
        assert_eq!(CellType::parse_custom_number_format("0.00\\d", false), CellType::Number);
    }

    #[test]
    fn builtin_number_formats() {
        assert_eq!(CellType::parse_builtin_number_format_id("14", false), Some(CellType::NumberDate1900));
        assert_eq!(CellType::parse_builtin_number_format_id("22", true), Some(CellType::NumberDateTime1904));
        assert_eq!(CellType::parse_builtin_number_format_id("2", false), None);
    }

    #[test]
    fn serial_dates() {
        assert_eq!(cell(CellType::NumberDate1900, "45446").to_value(&[]), Ok(Value::Date(date(2024, 6, 3))));
        assert_eq!(cell(CellType::NumberDate1900, "1").to_value(&[]), Ok(Value::Date(date(1900, 1, 1))));
        assert_eq!(cell(CellType::NumberDate1900, "61").to_value(&[]), Ok(Value::Date(date(1900, 3, 1))));
        assert_eq!(cell(CellType::NumberDate1904, "0").to_value(&[]), Ok(Value::Date(date(1904, 1, 1))));
        assert_eq!(to_serial_date(date(2024, 6, 3)), 45446);
        assert_eq!(to_serial_date(date(1900, 1, 1)), 1);
        assert_eq!(to_serial_date(date(1900, 3, 1)), 61);
    }

    #[test]
    fn serial_datetimes() {
        let datetime = date(2024, 6, 3).and_hms_opt(18, 0, 0).expect("valid time");
        assert_eq!(to_serial_datetime(datetime), 45446.75);
        assert_eq!(cell(CellType::NumberDateTime1900, "45446.75").to_value(&[]), Ok(Value::DateTime(datetime)));
        assert_eq!(cell(CellType::NumberTime1900, "0.5").to_value(&[]), Ok(Value::from("12:00:00")));
    }

    #[test]
    fn strings_and_errors() {
        let shared = vec!["Ana Silva".to_owned()];
        assert_eq!(cell(CellType::SharedString, "0").to_value(&shared), Ok(Value::from("Ana Silva")));
        assert!(cell(CellType::SharedString, "3").to_value(&shared).is_err());
        assert_eq!(cell(CellType::Error, "#DIV/0!").to_value(&shared), Ok(Value::Empty));
        assert_eq!(cell(CellType::Boolean, "1").to_value(&shared), Ok(Value::Bool(true)));
        assert_eq!(cell(CellType::IsoDateTime, "2024-06-03").to_value(&shared), Ok(Value::Date(date(2024, 6, 3))));
        assert!(cell(CellType::Number, "abc").to_value(&shared).is_err());
    }
}
