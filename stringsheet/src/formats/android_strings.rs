//! Support for Android `strings.xml` resource files.
//!
//! Only flat `<string>` elements, top-level comments and blank lines between
//! them are modelled. Other elements (`<plurals>`, `<string-array>`, ...) are
//! skipped. Markup nested inside a `<string>` is reduced to its text.

use quick_xml::{
    Reader, Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::Serialize;
use std::io::{BufRead, Write};

use crate::{
    error::Error,
    options::TableOptions,
    traits::Parser,
    types::{DEFAULT_LANGUAGE, Entry, EntryRef, Extra, StringEntry, Table},
};

const INDENT: &str = "    ";

/// One `strings.xml` document. String entries carry the document's own
/// text in [`StringEntry::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Format {
    pub entries: Vec<Entry>,
}

impl Format {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Selects what `language` should contain. The default document gets every
    /// string with its extras and `translatable` flag. Other languages only get
    /// translatable strings with a non-empty translation, and never extras.
    pub fn from_table(table: &Table, language: &str) -> Self {
        let is_default = language == DEFAULT_LANGUAGE;
        let entries = table
            .entries()
            .filter_map(|entry| match entry {
                EntryRef::Blank => Some(Entry::Blank),
                EntryRef::Comment(text) => Some(Entry::comment(text)),
                EntryRef::String(string) if is_default => Some(Entry::String(StringEntry {
                    key: string.key.clone(),
                    default: string.default.clone(),
                    translations: Default::default(),
                    translatable: string.translatable,
                    extras: string.extras.clone(),
                })),
                EntryRef::String(string) => {
                    if !string.is_translatable() {
                        return None;
                    }
                    string
                        .text(language)
                        .map(|text| Entry::String(StringEntry::new(string.key.clone(), text)))
                }
            })
            .collect();
        Self { entries }
    }

    pub fn strings(&self) -> impl Iterator<Item = &StringEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::String(s) => Some(s),
            _ => None,
        })
    }
}

impl From<Format> for Table {
    fn from(value: Format) -> Self {
        Table::from_entries(value.entries)
    }
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R, _options: &TableOptions) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        // Whitespace between elements carries the blank lines.
        xml_reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut entries = Vec::new();
        let mut in_root = false;
        let mut pending_blanks = 0usize;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if !in_root => {
                    tracing::trace!("root element <{}>", String::from_utf8_lossy(e.name().as_ref()));
                    in_root = true;
                }
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"string" => {
                    let string = parse_string_resource(e, &mut xml_reader, false)?;
                    push_pending_blanks(&mut entries, &mut pending_blanks);
                    entries.extend(string.map(Entry::String));
                }
                Ok(Event::Empty(ref e)) if in_root && e.name().as_ref() == b"string" => {
                    let string = parse_string_resource(e, &mut xml_reader, true)?;
                    push_pending_blanks(&mut entries, &mut pending_blanks);
                    entries.extend(string.map(Entry::String));
                }
                Ok(Event::Start(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    tracing::debug!("skipping unsupported element <{}>", name);
                    let mut skip_buf = Vec::new();
                    xml_reader.read_to_end_into(e.name(), &mut skip_buf)?;
                    pending_blanks = 0;
                }
                Ok(Event::Empty(ref e)) if in_root => {
                    tracing::debug!(
                        "skipping unsupported element <{}/>",
                        String::from_utf8_lossy(e.name().as_ref())
                    );
                    pending_blanks = 0;
                }
                Ok(Event::Comment(ref e)) if in_root => {
                    push_pending_blanks(&mut entries, &mut pending_blanks);
                    entries.push(Entry::Comment(String::from_utf8_lossy(e).into_owned()));
                }
                Ok(Event::Text(ref e)) if in_root => {
                    if e.iter().all(u8::is_ascii_whitespace) {
                        let newlines = e.iter().filter(|b| **b == b'\n').count();
                        pending_blanks += newlines.saturating_sub(1);
                    }
                }
                Ok(Event::End(_)) if in_root => {
                    in_root = false;
                    pending_blanks = 0;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        Ok(Format { entries })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W, _options: &TableOptions) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        let resources_start = BytesStart::new("resources");
        xml_writer.write_event(Event::Start(resources_start))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        for entry in &self.entries {
            match entry {
                Entry::Blank => {}
                Entry::Comment(text) => {
                    xml_writer.write_event(Event::Text(BytesText::new(INDENT)))?;
                    xml_writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
                }
                Entry::String(sr) => {
                    let mut elem = BytesStart::new("string");
                    elem.push_attribute(("name", sr.key.as_str()));
                    for extra in &sr.extras {
                        elem.push_attribute((extra.name.as_str(), extra.value.as_str()));
                    }
                    if let Some(trans) = sr.translatable {
                        elem.push_attribute(("translatable", if trans { "true" } else { "false" }));
                    }

                    xml_writer.write_event(Event::Text(BytesText::new(INDENT)))?;
                    xml_writer.write_event(Event::Start(elem))?;
                    xml_writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(
                        sr.default.as_str(),
                    ))))?;
                    xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
                }
            }
            xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

fn push_pending_blanks(entries: &mut Vec<Entry>, pending: &mut usize) {
    entries.extend(std::iter::repeat_n(Entry::Blank, *pending));
    *pending = 0;
}

/// Reads one `<string>` element. Returns `None` for an element without a
/// `name`, which cannot be matched to anything.
fn parse_string_resource<R: BufRead>(
    e: &BytesStart,
    xml_reader: &mut Reader<R>,
    self_closing: bool,
) -> Result<Option<StringEntry>, Error> {
    let mut name = None;
    let mut translatable = None;
    let mut extras = Vec::new();

    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        let value = attr.unescape_value()?.to_string();
        match attr.key.as_ref() {
            b"name" => name = Some(value),
            b"translatable" => translatable = Some(value == "true"),
            key => extras.push(Extra::new(String::from_utf8_lossy(key), value)),
        }
    }

    let value = if self_closing {
        String::new()
    } else {
        read_string_text(xml_reader, name.as_deref())?
    };

    let Some(key) = name else {
        tracing::debug!("dropping <string> without a name attribute");
        return Ok(None);
    };

    Ok(Some(StringEntry {
        key,
        default: value,
        translations: Default::default(),
        translatable,
        extras,
    }))
}

/// Collects the text of the current element up to its end tag.
fn read_string_text<R: BufRead>(
    xml_reader: &mut Reader<R>,
    key: Option<&str>,
) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut value = String::new();
    let mut depth = 0usize;
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => value.push_str(&e.unescape().map_err(Error::XmlParse)?),
            Ok(Event::CData(e)) => value.push_str(&String::from_utf8_lossy(&e)),
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    tracing::warn!(
                        "markup inside <string name=\"{}\"> is reduced to plain text",
                        key.unwrap_or_default()
                    );
                }
                depth += 1;
            }
            Ok(Event::End(_)) if depth == 0 => break,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => {
                return Err(Error::InvalidResource(
                    "unexpected end of file inside <string>".to_string(),
                ));
            }
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(value)
}
