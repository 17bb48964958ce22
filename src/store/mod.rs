//! # Record Store
//!
//! Keeps the reservation, partner and owner tables, each backed by one file.
//! Tables are read whole and every change rewrites the whole file. Readers
//! take [`Snapshot`]s, which later changes never alter.
mod dataset;
mod io;

pub use dataset::Dataset;
pub use dataset::DatasetKind;
pub use dataset::Mutation;
pub use dataset::Snapshot;
pub use io::append_row;
pub use io::export;
pub use io::load;
pub use io::save;
pub use io::try_export;
pub use io::try_load;
pub use io::try_save;
pub use io::update_row;

use crate::records::Owner;
use crate::records::Partner;
use crate::records::Record;
use crate::records::RecordError;
use crate::records::Reservation;
use crate::report;
use crate::report::ReservationFilter;
use crate::report::WeeklyTotals;
use crate::settings::Settings;
use crate::table::RowId;
use crate::table::Table;
use crate::table::Value;
use chrono::NaiveDate;
use std::path::Path;
use std::sync::Arc;

/// The three datasets behind the dashboard, with the settings that locate
/// their files and exports.
#[derive(Debug)]
pub struct RecordStore {
    settings: Settings,
    reservations: Dataset,
    partners: Dataset,
    owners: Dataset,
}

impl RecordStore {
    pub fn open(settings: &Settings) -> Self {
        RecordStore {
            settings: settings.clone(),
            reservations: Dataset::load(DatasetKind::Reservations, &settings.reservations_path),
            partners: Dataset::load(DatasetKind::Partners, &settings.partners_path),
            owners: Dataset::load(DatasetKind::Owners, &settings.owners_path),
        }
    }

    /// Opens explicit data files; exports and the lookback keep their defaults.
    pub fn with_paths(reservations: &Path, partners: &Path, owners: &Path) -> Self {
        Self::open(&Settings {
            reservations_path: reservations.to_owned(),
            partners_path: partners.to_owned(),
            owners_path: owners.to_owned(),
            ..Settings::default()
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn dataset(&self, kind: DatasetKind) -> &Dataset {
        match kind {
            DatasetKind::Reservations => &self.reservations,
            DatasetKind::Partners => &self.partners,
            DatasetKind::Owners => &self.owners,
        }
    }

    fn dataset_mut(&mut self, kind: DatasetKind) -> &mut Dataset {
        match kind {
            DatasetKind::Reservations => &mut self.reservations,
            DatasetKind::Partners => &mut self.partners,
            DatasetKind::Owners => &mut self.owners,
        }
    }

    /// The latest committed snapshot of a dataset.
    pub fn snapshot(&self, kind: DatasetKind) -> Arc<Snapshot> {
        self.dataset(kind).snapshot()
    }

    pub fn table(&self, kind: DatasetKind) -> &Table {
        self.dataset(kind).table()
    }

    /// Re-reads one file and returns the new version.
    pub fn reload(&mut self, kind: DatasetKind) -> u64 {
        self.dataset_mut(kind).reload()
    }

    pub fn reload_all(&mut self) {
        for kind in DatasetKind::ALL {
            self.reload(kind);
        }
    }

    pub fn update_row<K, V, I>(&mut self, kind: DatasetKind, row: RowId, fields: I) -> Mutation
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.dataset_mut(kind).update_row(row, fields)
    }

    /// Returns the new row's identifier and whether the file was written.
    pub fn append_row<K, V, I>(&mut self, kind: DatasetKind, fields: I) -> (RowId, Mutation)
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.dataset_mut(kind).append_row(fields)
    }

    /// Writes the current table of a dataset as comma-delimited text.
    pub fn export(&self, kind: DatasetKind, path: &Path) -> bool {
        export(self.table(kind), path)
    }

    /// Weekly totals as of `as_of`, looking back the configured number of days.
    pub fn weekly_totals(&self, as_of: NaiveDate) -> WeeklyTotals {
        report::weekly_totals_with(
            self.table(DatasetKind::Reservations),
            self.table(DatasetKind::Partners),
            self.table(DatasetKind::Owners),
            as_of,
            self.settings.lookback_days,
        )
    }

    /// Writes the week's reservations to the weekly export file.
    pub fn export_weekly(&self, as_of: NaiveDate) -> bool {
        let detail = report::weekly_detail(&self.weekly_totals(as_of));
        export(&detail, &self.settings.weekly_export_path)
    }

    /// Writes the reservations passing `filter` to the filtered export file.
    pub fn export_filtered(&self, filter: &ReservationFilter) -> bool {
        let filtered = report::filter_reservations(self.table(DatasetKind::Reservations), filter);
        export(&filtered, &self.settings.filtered_export_path)
    }

    fn record<R: Record>(&self, kind: DatasetKind, row: RowId) -> Result<R, RecordError> {
        R::from_row(self.table(kind), row)
    }

    pub fn reservation(&self, row: RowId) -> Result<Reservation, RecordError> {
        self.record(DatasetKind::Reservations, row)
    }

    pub fn partner(&self, row: RowId) -> Result<Partner, RecordError> {
        self.record(DatasetKind::Partners, row)
    }

    pub fn owner(&self, row: RowId) -> Result<Owner, RecordError> {
        self.record(DatasetKind::Owners, row)
    }

    pub fn add_reservation(&mut self, reservation: &Reservation) -> (RowId, Mutation) {
        self.append_row(DatasetKind::Reservations, reservation.to_fields())
    }

    pub fn update_reservation(&mut self, row: RowId, reservation: &Reservation) -> Mutation {
        self.update_row(DatasetKind::Reservations, row, reservation.to_fields())
    }

    pub fn add_partner(&mut self, partner: &Partner) -> (RowId, Mutation) {
        self.append_row(DatasetKind::Partners, partner.to_fields())
    }

    pub fn update_partner(&mut self, row: RowId, partner: &Partner) -> Mutation {
        self.update_row(DatasetKind::Partners, row, partner.to_fields())
    }

    pub fn add_owner(&mut self, owner: &Owner) -> (RowId, Mutation) {
        self.append_row(DatasetKind::Owners, owner.to_fields())
    }

    pub fn update_owner(&mut self, row: RowId, owner: &Owner) -> Mutation {
        self.update_row(DatasetKind::Owners, row, owner.to_fields())
    }
}
