use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MoneyError {
    #[error("Invalid amount '{0}': {1}")]
    InvalidAmount(String, &'static str),
}

/// Signed currency amount held as integer cents.
///
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
///
/// Lodging values and partner balances go through this type so that sums and
/// spreadsheet round-trips stay exact at cent precision.
///
/// ```rust
/// use rental_sheet::MoneyCents;
///
/// let amount: MoneyCents = "150,5".parse().unwrap();
/// assert_eq!(amount.cents(), 15_050);
/// assert_eq!(amount.to_string(), "150.50");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Rounds a spreadsheet number to the nearest cent, half away from zero.
    /// Amounts beyond the `i64` range saturate; NaN is zero.
    pub fn from_f64(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// The amount as a spreadsheet number; `cents / 100` prints back as the same decimal.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(self.0.saturating_neg())
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

impl FromStr for MoneyCents {
    type Err = MoneyError;

    /// Accepts `.` or `,` as decimal separator, an optional sign and at most two decimals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason| MoneyError::InvalidAmount(s.to_owned(), reason);

        let trimmed = s.trim();
        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim())
        } else {
            (false, trimmed.strip_prefix('+').unwrap_or(trimmed).trim())
        };
        if rest.is_empty() {
            return Err(error("empty amount"));
        }

        let rest = rest.replace(',', ".");
        let (units, fraction) = rest.split_once('.').unwrap_or((rest.as_str(), ""));
        if units.is_empty() || !units.chars().all(|c| c.is_ascii_digit()) {
            return Err(error("invalid amount"));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(error("invalid amount"));
        }

        let units: i64 = units.parse().map_err(|_| error("amount too large"))?;
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| error("invalid amount"))? * 10,
            2 => fraction.parse::<i64>().map_err(|_| error("invalid amount"))?,
            _ => return Err(error("too many decimals")),
        };

        let total = units
            .checked_mul(100)
            .and_then(|value| value.checked_add(cents))
            .ok_or_else(|| error("amount too large"))?;
        Ok(MoneyCents(if negative { -total } else { total }))
    }
}
