//! XML utilities for the Office Open XML workbook parts
//! Provides a reader wrapper, attribute/text helpers, and a small writer helper

use crate::error::RentalSheetError;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::Reader;
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::BufRead;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

/// Errors specific to XML parsing operations
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Parse entity '{0}' failed")]
    ParseEntityError(String),

    #[error("Parse attribute value '{0}' failed")]
    ParseAttributeValueError(String),
}

/// XML reader wrapper configured for workbook parts
pub(crate) struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    pub(crate) fn new(buf_reader: R) -> XmlReader<R> {
        let mut reader = Reader::from_reader(buf_reader);
        let config = reader.config_mut();
        config.check_comments = false;
        config.check_end_names = false;
        config.expand_empty_elements = true;
        config.trim_text(false);

        let buffer = Vec::with_capacity(1024);
        XmlReader { reader, buffer }
    }

    /// Reads the next XML event, `None` at end of document
    pub(crate) fn next(&'_ mut self) -> Result<Option<Event<'_>>, RentalSheetError> {
        self.buffer.clear();
        match self.reader.read_event_into(&mut self.buffer) {
            Ok(Event::Eof) => Ok(None),
            Ok(event) => Ok(Some(event)),
            Err(error) => Err(RentalSheetError::XmlError(error)),
        }
    }
}

/// Helper trait for XML attributes providing value extraction and parsing
pub(crate) trait XmlAttributeHelper<'a> {
    fn get_value(&self) -> Result<Cow<'a, str>, RentalSheetError>;

    fn parse_value<T: FromStr>(&self) -> Result<T, RentalSheetError>;
}

impl<'a> XmlAttributeHelper<'a> for Attribute<'a> {
    fn get_value(&self) -> Result<Cow<'a, str>, RentalSheetError> {
        Ok(self.unescape_value()?)
    }

    fn parse_value<T: FromStr>(&self) -> Result<T, RentalSheetError> {
        let value = self.get_value()?;
        value
            .parse()
            .map_err(|_| XmlError::ParseAttributeValueError(value.to_string()).into())
    }
}

/// Helper trait for XML nodes providing attribute access by name
pub(crate) trait XmlNodeHelper<'a> {
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, RentalSheetError>;

    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, RentalSheetError>;
}

impl<'a> XmlNodeHelper<'a> for BytesStart<'a> {
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, RentalSheetError> {
        self.try_get_attribute(name)?
            .map(|attribute| attribute.get_value())
            .transpose()
    }

    /// Empty attribute values are treated as absent
    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, RentalSheetError> {
        self.try_get_attribute(name)?
            .filter(|attribute| !attribute.value.is_empty())
            .map(|attribute| attribute.parse_value())
            .transpose()
    }
}

/// Helper trait for building text content from XML events
pub(crate) trait XmlTextContextHelper {
    fn push_bytes_text(&mut self, text: &BytesText) -> Result<(), RentalSheetError>;

    /// Appends an entity or character reference
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), RentalSheetError>;
}

impl XmlTextContextHelper for String {
    fn push_bytes_text(&mut self, text: &BytesText) -> Result<(), RentalSheetError> {
        self.push_str(&text.xml_content()?);
        Ok(())
    }

    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), RentalSheetError> {
        let raw = bytes.xml_content()?;
        if let Some(number) = raw.strip_prefix('#') {
            let code = if let Some(hex) = number.strip_prefix('x') {
                u32::from_str_radix(hex, 16)?
            } else {
                number.parse::<u32>()?
            };
            if let Some(character) = std::char::from_u32(code) {
                self.push(character);
            }
        } else if let Some(entity) = resolve_xml_entity(&raw) {
            self.push_str(entity);
        } else {
            Err(XmlError::ParseEntityError(raw.to_string()))?;
        }

        Ok(())
    }
}

/// Helper trait for emitting workbook parts through a quick-xml writer
pub(crate) trait XmlWriterHelper {
    /// Writes the standalone UTF-8 declaration
    fn declaration(&mut self) -> Result<(), RentalSheetError>;

    fn open(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<(), RentalSheetError>;

    fn close(&mut self, tag: &str) -> Result<(), RentalSheetError>;

    fn empty(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<(), RentalSheetError>;

    /// Writes escaped character data
    fn text(&mut self, text: &str) -> Result<(), RentalSheetError>;
}

impl<W: Write> XmlWriterHelper for Writer<W> {
    fn declaration(&mut self) -> Result<(), RentalSheetError> {
        self.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(())
    }

    fn open(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<(), RentalSheetError> {
        let element = BytesStart::new(tag).with_attributes(attributes.iter().copied());
        self.write_event(Event::Start(element))?;
        Ok(())
    }

    fn close(&mut self, tag: &str) -> Result<(), RentalSheetError> {
        self.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    fn empty(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<(), RentalSheetError> {
        let element = BytesStart::new(tag).with_attributes(attributes.iter().copied());
        self.write_event(Event::Empty(element))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), RentalSheetError> {
        self.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }
}

#[macro_export]
macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(result) = $reader.next()? {
            match result {
                Event::Eof => break,
                $($arms)*
                _ => (),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_xml_events;
    use quick_xml::name::QName;

    #[test]
    fn reads_text_with_entities() -> Result<(), RentalSheetError> {
        let mut reader = XmlReader::new("<t>Ana &amp; Bruno &#233;&#x21;</t>".as_bytes());
        let mut text = String::new();
        match_xml_events!(reader => {
            Event::Text(event) => text.push_bytes_text(&event)?,
            Event::GeneralRef(event) => text.push_bytes_ref(&event)?,
        });
        assert_eq!(text, "Ana & Bruno é!");
        Ok(())
    }

    #[test]
    fn parses_attributes() -> Result<(), RentalSheetError> {
        let mut reader = XmlReader::new(r#"<c r="B2" s="3" t=""/>"#.as_bytes());
        let mut seen = false;
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == QName(b"c") => {
                assert_eq!(event.get_attribute_value("r")?.as_deref(), Some("B2"));
                assert_eq!(event.parse_attribute_value::<usize>("s")?, Some(3));
                assert_eq!(event.parse_attribute_value::<usize>("t")?, None);
                assert_eq!(event.get_attribute_value("missing")?, None);
                seen = true;
            }
        });
        assert!(seen);
        Ok(())
    }

    #[test]
    fn writer_escapes_text_and_attributes() -> Result<(), RentalSheetError> {
        let mut writer = Writer::new(Vec::new());
        writer.open("c", &[("r", "A1"), ("t", "inlineStr")])?;
        writer.text("R&D <Bloco>")?;
        writer.close("c")?;
        writer.empty("v", &[("x", "\"q\"")])?;
        let xml = String::from_utf8(writer.into_inner()).expect("utf-8");
        assert_eq!(xml, r#"<c r="A1" t="inlineStr">R&amp;D &lt;Bloco&gt;</c><v x="&quot;q&quot;"/>"#);
        Ok(())
    }
}
