use thiserror::Error;

/// Main error type for the rental sheet crate.
/// Aggregates errors from the standard library, dependencies, and internal modules.
#[derive(Error, Debug)]
pub enum RentalSheetError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("{0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),

    #[error("{0}")]
    ParseDateTimeError(#[from] chrono::ParseError),

    // Third-party library errors
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    CsvError(#[from] csv::Error),

    #[error("{0}")]
    ConfigError(#[from] config::ConfigError),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    // Domain errors
    #[error("{0}")]
    MoneyError(#[from] crate::money::MoneyError),

    #[error("{0}")]
    RecordError(#[from] crate::records::RecordError),
}

impl RentalSheetError {
    /// Returns true when the error comes from a file that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RentalSheetError::IoError(error) if error.kind() == std::io::ErrorKind::NotFound)
    }
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RentalSheetError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| match e {
            // Keep io errors intact so callers can still tell a missing file apart
            RentalSheetError::IoError(_) => e,
            _ => RentalSheetError::WithContextError(format!("{}: {}", message, e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_survives_prefix() {
        let result: Result<(), RentalSheetError> = Err(std::io::Error::from(std::io::ErrorKind::NotFound).into());
        let error = result.with_prefix("Load 'reservas.xlsx'").unwrap_err();
        assert!(error.is_not_found());
    }

    #[test]
    fn prefix_wraps_other_errors() {
        let result: Result<(), RentalSheetError> = "x".parse::<i64>().map(|_| ()).map_err(Into::into);
        let error = result.with_prefix("Parse").unwrap_err();
        assert!(!error.is_not_found());
        assert!(error.to_string().starts_with("Parse: "));
    }
}
