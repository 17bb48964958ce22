use crate::records::Owner;
use crate::records::Partner;
use crate::records::Record;
use crate::records::Reservation;
use crate::store::io;
use crate::table::RowId;
use crate::table::Table;
use crate::table::Value;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// The three datasets kept by the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Reservations,
    Partners,
    Owners,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [DatasetKind::Reservations, DatasetKind::Partners, DatasetKind::Owners];

    /// Column headers of the record type stored in this dataset, used as the
    /// header of a table that starts out empty
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Reservations => Reservation::COLUMNS,
            DatasetKind::Partners => Partner::COLUMNS,
            DatasetKind::Owners => Owner::COLUMNS,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Reservations => write!(f, "reservations"),
            DatasetKind::Partners => write!(f, "partners"),
            DatasetKind::Owners => write!(f, "owners"),
        }
    }
}

/// A committed table together with the version it was published under.
#[derive(Debug, PartialEq)]
pub struct Snapshot {
    pub version: u64,
    pub table: Table,
}

/// Outcome of updating or appending one row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Applied and written to disk
    Committed { version: u64 },
    /// No such row; nothing changed
    RowNotFound(RowId),
    /// Applied in memory but the file could not be written
    SaveFailed { version: u64 },
}

impl Mutation {
    pub fn is_committed(&self) -> bool {
        matches!(self, Mutation::Committed { .. })
    }
}

/// One table file and the latest snapshot read from or written to it.
///
/// Snapshots are immutable: every change publishes a new one with the next
/// version, so a handle taken with [`Dataset::snapshot`] never changes under
/// its holder.
#[derive(Debug)]
pub struct Dataset {
    kind: DatasetKind,
    path: PathBuf,
    current: Arc<Snapshot>,
}

impl Dataset {
    /// Loads the file; missing or unreadable files give an empty table at version 0.
    pub fn load(kind: DatasetKind, path: &Path) -> Self {
        Dataset {
            kind,
            path: path.to_owned(),
            current: Arc::new(Snapshot {
                version: 0,
                table: io::load(path),
            }),
        }
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> u64 {
        self.current.version
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    pub fn table(&self) -> &Table {
        &self.current.table
    }

    /// Re-reads the file, picking up external edits.
    pub fn reload(&mut self) -> u64 {
        let table = io::load(&self.path);
        self.publish(table)
    }

    pub fn update_row<K, V, I>(&mut self, row: RowId, fields: I) -> Mutation
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = self.current.table.clone();
        if !io::apply_update(&mut table, row, fields) {
            return Mutation::RowNotFound(row);
        }
        self.commit(table)
    }

    /// Appends a row and saves; the row stays in memory even when the save fails.
    /// A table without columns first gets the record type's header, in sheet order.
    pub fn append_row<K, V, I>(&mut self, fields: I) -> (RowId, Mutation)
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = self.current.table.clone();
        if table.columns().is_empty() && table.is_empty() {
            let columns = self.kind.columns().iter().map(|column| column.to_string()).collect();
            table = Table::new(&table.name, columns, Vec::new());
        }
        let row = table.push_row(fields);
        (row, self.commit(table))
    }

    /// Saves and publishes a changed table.
    fn commit(&mut self, table: Table) -> Mutation {
        let saved = io::save(&table, &self.path);
        let version = self.publish(table);
        if saved {
            Mutation::Committed { version }
        } else {
            Mutation::SaveFailed { version }
        }
    }

    fn publish(&mut self, table: Table) -> u64 {
        let version = self.current.version + 1;
        self.current = Arc::new(Snapshot { version, table });
        info!("Published {} version {version}", self.kind);
        version
    }
}
