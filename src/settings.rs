//! File locations and report parameters.
//!
//! Defaults cover every key. An optional TOML file and `RENTAL_SHEET_*`
//! environment variables override them, in that order.
use crate::error::RentalSheetError;
use crate::report::DEFAULT_LOOKBACK_DAYS;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "rental_sheet.toml";
const ENV_PREFIX: &str = "RENTAL_SHEET";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub reservations_path: PathBuf,
    pub partners_path: PathBuf,
    pub owners_path: PathBuf,
    /// Destination of the weekly detail export
    pub weekly_export_path: PathBuf,
    /// Destination of the filtered reservations export
    pub filtered_export_path: PathBuf,
    /// Days before the report date that still count as "this week"
    pub lookback_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reservations_path: PathBuf::from("reservas.xlsx"),
            partners_path: PathBuf::from("parceiros.xlsx"),
            owners_path: PathBuf::from("proprietarios.xlsx"),
            weekly_export_path: PathBuf::from("relatorio_semanal.csv"),
            filtered_export_path: PathBuf::from("reservas_filtradas.csv"),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl Settings {
    /// Reads `rental_sheet.toml` from the working directory when present.
    pub fn load() -> Result<Settings, RentalSheetError> {
        Self::from_file(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Reads the given TOML file when present, then applies environment overrides.
    pub fn from_file(path: &Path) -> Result<Settings, RentalSheetError> {
        let mut builder = config::Config::builder();
        builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml).required(false));
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));
        Ok(builder.build()?.try_deserialize()?)
    }
}
