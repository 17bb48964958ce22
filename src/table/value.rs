use chrono::NaiveDate;
use chrono::NaiveDateTime;
use std::fmt::Display;

/// A single cell of a table.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Empty,
    Bool(bool),
    /// Every spreadsheet number, integral or not
    Number(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Number(number) => number.is_nan(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numbers, plus text holding a plain number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) if !number.is_nan() => Some(*number),
            Value::Text(text) => text.trim().parse::<f64>().ok().filter(|number| number.is_finite()),
            _ => None,
        }
    }

    /// Integral numbers only; `101.5` is not a unit number.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64()
            .filter(|number| number.fract() == 0.0 && number.abs() < i64::MAX as f64)
            .map(|number| number as i64)
    }

    /// Dates, the date part of date-times, and ISO `YYYY-MM-DD` text.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(date) => Some(*date),
            Value::DateTime(datetime) => Some(datetime.date()),
            Value::Text(text) => parse_date(text.trim()).or_else(|| parse_datetime(text.trim()).map(|datetime| datetime.date())),
            _ => None,
        }
    }

    /// Infers a typed value from plain text, as used for csv sources.
    ///
    /// A typed value is chosen only when it prints back as exactly `text`, so
    /// `"0123"` and `"1.50"` stay text and a saved csv reloads unchanged.
    pub(crate) fn infer(text: &str) -> Value {
        if text.trim().is_empty() {
            return Value::Empty;
        }
        let typed = match text {
            "True" => Some(Value::Bool(true)),
            "False" => Some(Value::Bool(false)),
            _ => text
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .map(Value::Number)
                .or_else(|| parse_date(text).map(Value::Date))
                .or_else(|| parse_datetime(text).map(Value::DateTime)),
        };
        typed
            .filter(|value| value.to_string() == text)
            .unwrap_or_else(|| Value::Text(text.to_owned()))
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Renders values the way exports write them.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Number(number) if number.is_nan() => Ok(()),
            Value::Number(number) => write!(f, "{number}"),
            Value::Text(text) => write!(f, "{text}"),
            Value::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Value::DateTime(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn integers_only_from_whole_numbers() {
        assert_eq!(Value::Number(101.0).as_i64(), Some(101));
        assert_eq!(Value::Number(101.5).as_i64(), None);
        assert_eq!(Value::Text("12".to_owned()).as_i64(), Some(12));
        assert_eq!(Value::Empty.as_i64(), None);
    }

    #[test]
    fn dates_from_several_shapes() {
        let datetime = date(2024, 6, 3).and_hms_opt(14, 0, 0).expect("valid time");
        assert_eq!(Value::Date(date(2024, 6, 3)).as_date(), Some(date(2024, 6, 3)));
        assert_eq!(Value::DateTime(datetime).as_date(), Some(date(2024, 6, 3)));
        assert_eq!(Value::from("2024-06-03").as_date(), Some(date(2024, 6, 3)));
        assert_eq!(Value::from("2024-06-03 14:00:00").as_date(), Some(date(2024, 6, 3)));
        assert_eq!(Value::from("03/06/2024").as_date(), None);
    }

    #[test]
    fn infer_from_text() {
        assert_eq!(Value::infer(""), Value::Empty);
        assert_eq!(Value::infer("True"), Value::Bool(true));
        assert_eq!(Value::infer("150.5"), Value::Number(150.5));
        assert_eq!(Value::infer("2024-06-03"), Value::Date(date(2024, 6, 3)));
        assert_eq!(
            Value::infer("2024-06-03 10:30:00"),
            Value::DateTime(date(2024, 6, 3).and_hms_opt(10, 30, 0).expect("valid time"))
        );
        assert_eq!(Value::infer("Bloco A"), Value::from("Bloco A"));
        assert_eq!(Value::infer("nan"), Value::from("nan"));
    }

    #[test]
    fn infer_keeps_text_that_would_print_differently() {
        assert_eq!(Value::infer("01234567890"), Value::from("01234567890"));
        assert_eq!(Value::infer("1.50"), Value::from("1.50"));
        assert_eq!(Value::infer(" 12"), Value::from(" 12"));
        assert_eq!(Value::infer("true"), Value::from("true"));
        assert_eq!(Value::infer("2024-6-3"), Value::from("2024-6-3"));
        assert_eq!(Value::infer("2024-06-03T10:30:00"), Value::from("2024-06-03T10:30:00"));
        assert_eq!(Value::infer("-0.5"), Value::Number(-0.5));
    }

    #[test]
    fn display_matches_export_format() {
        assert_eq!(Value::Number(150.0).to_string(), "150");
        assert_eq!(Value::Number(150.25).to_string(), "150.25");
        assert_eq!(Value::Date(date(2024, 6, 3)).to_string(), "2024-06-03");
        assert_eq!(Value::Bool(false).to_string(), "False");
        assert_eq!(Value::Empty.to_string(), "");
    }
}
