//! Low-level helpers shared by the spreadsheet codecs
pub(crate) mod reader;
pub(crate) mod xml;
pub(crate) mod zip;
