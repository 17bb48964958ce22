//! Single-sheet XLSX writer.
//!
//! Text is written as inline strings so no shared string table is needed.
//! Dates and date-times become serial numbers styled with the built-in
//! formats 14 and 22, which the reader maps back to the same values.
use crate::error::RentalSheetError;
use crate::helpers::xml::XmlWriterHelper;
use crate::helpers::zip::ZipPartWriter;
use crate::spreadsheet::cell::to_serial_date;
use crate::spreadsheet::cell::to_serial_datetime;
use crate::spreadsheet::reference::index_to_reference;
use crate::table::Table;
use crate::table::Value;
use quick_xml::Writer;
use std::fs::File;
use std::io::BufWriter;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;

const NAMESPACE_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NAMESPACE_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const SHEET_NAME: &str = "Sheet1";

// Style indexes into `cellXfs` of STYLES
const STYLE_DATE: &str = "1";
const STYLE_DATETIME: &str = "2";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELATIONSHIPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELATIONSHIPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/><xf numFmtId="22" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

/// Writes the table as a workbook at `path`, replacing any existing file.
pub(super) fn write_xlsx(table: &Table, path: &Path) -> Result<(), RentalSheetError> {
    let file = BufWriter::new(File::create(path)?);
    let mut file = write_workbook(table, file)?;
    file.flush()?;
    Ok(())
}

/// Writes all workbook parts into `output` and hands it back once the archive is finished.
pub(super) fn write_workbook<W: Write + Seek>(table: &Table, output: W) -> Result<W, RentalSheetError> {
    let mut zip = ZipWriter::new(output);
    zip.write_part("[Content_Types].xml", CONTENT_TYPES.as_bytes())?;
    zip.write_part("_rels/.rels", ROOT_RELATIONSHIPS.as_bytes())?;
    zip.write_part("xl/_rels/workbook.xml.rels", WORKBOOK_RELATIONSHIPS.as_bytes())?;
    zip.write_part("xl/styles.xml", STYLES.as_bytes())?;

    zip.start_part("xl/workbook.xml")?;
    write_workbook_part(&mut Writer::new(&mut zip))?;

    zip.start_part("xl/worksheets/sheet1.xml")?;
    write_sheet_part(&mut Writer::new(&mut zip), table)?;

    Ok(zip.finish()?)
}

fn write_workbook_part<W: Write>(xml: &mut Writer<W>) -> Result<(), RentalSheetError> {
    xml.declaration()?;
    xml.open("workbook", &[("xmlns", NAMESPACE_MAIN), ("xmlns:r", NAMESPACE_RELATIONSHIPS)])?;
    xml.open("sheets", &[])?;
    xml.empty("sheet", &[("name", SHEET_NAME), ("sheetId", "1"), ("r:id", "rId1")])?;
    xml.close("sheets")?;
    xml.close("workbook")
}

fn write_sheet_part<W: Write>(xml: &mut Writer<W>, table: &Table) -> Result<(), RentalSheetError> {
    xml.declaration()?;
    xml.open("worksheet", &[("xmlns", NAMESPACE_MAIN)])?;
    xml.open("sheetData", &[])?;
    if !table.columns().is_empty() {
        xml.open("row", &[("r", "1")])?;
        for (col, name) in table.columns().iter().enumerate() {
            write_text_cell(xml, &index_to_reference(0, col), name)?;
        }
        xml.close("row")?;
    }
    for (index, values) in table.rows().enumerate() {
        let row = index + 1;
        let number = (row + 1).to_string();
        xml.open("row", &[("r", number.as_str())])?;
        for (col, value) in values.iter().enumerate() {
            write_value_cell(xml, &index_to_reference(row, col), value)?;
        }
        xml.close("row")?;
    }
    xml.close("sheetData")?;
    xml.close("worksheet")
}

fn write_text_cell<W: Write>(xml: &mut Writer<W>, reference: &str, text: &str) -> Result<(), RentalSheetError> {
    xml.open("c", &[("r", reference), ("t", "inlineStr")])?;
    xml.open("is", &[])?;
    xml.open("t", &[("xml:space", "preserve")])?;
    xml.text(text)?;
    xml.close("t")?;
    xml.close("is")?;
    xml.close("c")
}

/// Empty cells are left out of the sheet.
fn write_value_cell<W: Write>(xml: &mut Writer<W>, reference: &str, value: &Value) -> Result<(), RentalSheetError> {
    let (attributes, content): (Vec<(&str, &str)>, String) = match value {
        _ if value.is_empty() => return Ok(()),
        Value::Text(text) => return write_text_cell(xml, reference, text),
        Value::Bool(flag) => (vec![("t", "b")], (if *flag { "1" } else { "0" }).to_owned()),
        Value::Number(number) => (vec![], number.to_string()),
        Value::Date(date) => (vec![("s", STYLE_DATE)], to_serial_date(*date).to_string()),
        Value::DateTime(datetime) => (vec![("s", STYLE_DATETIME)], to_serial_datetime(*datetime).to_string()),
        Value::Empty => return Ok(()),
    };
    let mut all_attributes = vec![("r", reference)];
    all_attributes.extend(attributes);
    xml.open("c", &all_attributes)?;
    xml.open("v", &[])?;
    xml.text(&content)?;
    xml.close("v")?;
    xml.close("c")
}
