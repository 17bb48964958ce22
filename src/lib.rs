//! # Rental Sheet
//!
//! The data layer of a short-term-rental dashboard: reservations, partners and
//! owners kept in spreadsheet files, plus the weekly and partner reports
//! computed from them.
//!
//! ## Features
//!
//! - **Spreadsheet files**: read and write Excel workbooks (`.xlsx`, `.xlsm`)
//!   and csv files, with dates, numbers and text typed per cell
//! - **Record store**: load, update, append and save whole tables, with
//!   versioned snapshots for readers
//! - **Typed records**: `Reservation`, `Partner` and `Owner` mapped to the
//!   sheets' column headers
//! - **Reports**: weekly totals, occupied units, partner balances and
//!   reservation filters
//! - **Exact money**: amounts summed as integer cents
//! - **Lenient by default**: missing or unreadable files load as empty tables
//!   and failures are logged through `tracing`; `try_` variants return errors
//!
//! ## Modules
//!
//! - [`store`]: file-backed datasets and the [`RecordStore`]
//! - [`report`]: read-only aggregates over tables
//! - [`records`]: typed rows and column headers
//! - [`table`]: the in-memory table model
//! - [`spreadsheet`]: the xlsx and csv codecs
//! - [`settings`]: file locations and report parameters
pub mod error;
mod helpers;
pub mod money;
pub mod records;
pub mod report;
pub mod settings;
pub mod spreadsheet;
pub mod store;
pub mod table;

pub use error::RentalSheetError;
pub use money::MoneyCents;
pub use records::Owner;
pub use records::Partner;
pub use records::Record;
pub use records::RecordError;
pub use records::Reservation;
pub use settings::Settings;
pub use store::DatasetKind;
pub use store::Mutation;
pub use store::RecordStore;
pub use store::Snapshot;
pub use table::RowId;
pub use table::Table;
pub use table::Value;
