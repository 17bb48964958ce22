use crate::error::RentalSheetError;
use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

/// A seekable byte source for workbook archives, backed by a file or by memory
pub(crate) enum SheetSource {
    /// Local file reader
    Local(BufReader<File>),
    /// In-memory buffer
    Memory(Cursor<Vec<u8>>),
}

impl SheetSource {
    /// Opens a local file. A missing file surfaces as an io `NotFound` error.
    pub(crate) fn open(path: &Path) -> Result<SheetSource, RentalSheetError> {
        let file = File::open(path)?;
        Ok(SheetSource::Local(BufReader::new(file)))
    }

    pub(crate) fn from_bytes(bytes: Vec<u8>) -> SheetSource {
        SheetSource::Memory(Cursor::new(bytes))
    }
}

impl Read for SheetSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            SheetSource::Local(reader) => reader.read(buf),
            SheetSource::Memory(reader) => reader.read(buf),
        }
    }
}

impl Seek for SheetSource {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        match self {
            SheetSource::Local(reader) => reader.seek(pos),
            SheetSource::Memory(reader) => reader.seek(pos),
        }
    }
}
