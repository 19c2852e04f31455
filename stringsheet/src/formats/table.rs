//! Support for the delimited translation table.
//!
//! The header is `key, default, <languages...>, extra_arguments`. Each
//! following line is a string row, an empty line, or a `%%comment%%` line.
//! Fields are never quoted, so cells may not contain the separator or a
//! line break.
use std::{
    fs::File,
    io::{BufRead, Read, Write},
    path::Path,
};

use crate::{
    error::Error,
    escape::{escape_invisible, unescape_invisible},
    options::TableOptions,
    traits::Parser,
    types::{Entry, EntryRef, Extra, StringEntry, Table, parse_language_code},
};

pub const KEY_HEADER: &str = "key";
pub const DEFAULT_HEADER: &str = "default";
pub const EXTRAS_HEADER: &str = "extra_arguments";

const COMMENT_MARKER: &str = "%%";
const EXTRA_SEPARATOR: &str = ";";
const EXTRA_VALUE_SEPARATOR: char = '=';

impl Parser for Table {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R, options: &TableOptions) -> Result<Self, Error> {
        let mut lines = reader.lines().enumerate();

        let languages = loop {
            match lines.next() {
                Some((_, line)) => {
                    let line = line?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    break parse_header(&line, options)?;
                }
                None => return Ok(Table::new()),
            }
        };

        let mut table = Table::with_languages(languages);
        for (index, line) in lines {
            let line = line?;
            let entry = parse_row(&line, index + 1, table.languages(), options)?;
            table.push(entry);
        }
        Ok(table)
    }

    /// BOM-aware file reading, so UTF-16 exports from spreadsheet tools load too.
    fn read_from<P: AsRef<Path>>(path: P, options: &TableOptions) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded, options)
    }

    /// Write to any writer (file, memory, etc.). String rows and the header go
    /// through csv; blank and comment lines are written as they are.
    fn to_writer<W: Write>(&self, mut writer: W, options: &TableOptions) -> Result<(), Error> {
        let mut header = vec![KEY_HEADER.to_string(), DEFAULT_HEADER.to_string()];
        header.extend(self.languages().iter().cloned());
        header.push(EXTRAS_HEADER.to_string());
        writer.write_all(&record_line(&header, options)?)?;

        let mut previous_blank = false;
        for entry in self.entries() {
            match entry {
                EntryRef::Blank => writer.write_all(b"\n")?,
                EntryRef::Comment(text) => {
                    if !previous_blank {
                        writer.write_all(b"\n")?;
                    }
                    let line = format!(
                        "{COMMENT_MARKER}{}{COMMENT_MARKER}\n",
                        escape_invisible(&single_line_comment(text))
                    );
                    writer.write_all(line.as_bytes())?;
                }
                EntryRef::String(string) => {
                    let row = string_row(string, self.languages(), options)?;
                    writer.write_all(&record_line(&row, options)?)?;
                }
            }
            previous_blank = matches!(entry, EntryRef::Blank);
        }

        writer.flush()?;
        Ok(())
    }
}

/// Formats one record as a terminated line. Every record has at least three
/// fields and no cell needs quoting, see [`cell`].
fn record_line(fields: &[String], options: &TableOptions) -> Result<Vec<u8>, Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(options.separator)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());
    wtr.write_record(fields).map_err(Error::CsvParse)?;
    wtr.into_inner().map_err(|e| Error::Io(e.into_error()))
}

/// A comment spanning several lines is folded onto one.
fn single_line_comment(text: &str) -> String {
    if !text.contains(['\n', '\r']) {
        return text.to_string();
    }
    tracing::debug!("folding multi-line comment onto one table line");
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn string_row(
    string: &StringEntry,
    languages: &[String],
    options: &TableOptions,
) -> Result<Vec<String>, Error> {
    let mut row = Vec::with_capacity(languages.len() + 3);
    row.push(cell(&string.key, string, options)?);
    row.push(cell(&string.default, string, options)?);
    for language in languages {
        let value = if string.is_translatable() {
            string
                .translations
                .get(language)
                .map(String::as_str)
                .unwrap_or_default()
        } else {
            options.not_translatable.as_str()
        };
        row.push(cell(value, string, options)?);
    }

    let mut extras = Vec::with_capacity(string.extras.len() + 1);
    for extra in &string.extras {
        extras.push(extra_item(extra, string)?);
    }
    // Without language columns the sentinel has nowhere to go.
    if languages.is_empty() && !string.is_translatable() {
        extras.push(format!("translatable{EXTRA_VALUE_SEPARATOR}false"));
    }
    row.push(cell(&extras.join(EXTRA_SEPARATOR), string, options)?);
    Ok(row)
}

/// Renders `name=value`. The name may contain neither separator of the extras
/// cell and the value may not contain `;`, or the cell would read back as
/// different attributes.
fn extra_item(extra: &Extra, owner: &StringEntry) -> Result<String, Error> {
    if extra.name.contains([EXTRA_VALUE_SEPARATOR, ';']) || extra.value.contains(EXTRA_SEPARATOR) {
        return Err(Error::DataMismatch(format!(
            "extra argument `{}` of `{}` contains `{}` or `{}`: {:?}",
            extra.name, owner.key, EXTRA_SEPARATOR, EXTRA_VALUE_SEPARATOR, extra.value
        )));
    }
    Ok(format!("{}{EXTRA_VALUE_SEPARATOR}{}", extra.name, extra.value))
}

fn cell(value: &str, owner: &StringEntry, options: &TableOptions) -> Result<String, Error> {
    if value.contains(['\n', '\r', options.separator_char()]) {
        return Err(Error::DataMismatch(format!(
            "value of `{}` contains a line break or the separator {:?}: {:?}",
            owner.key,
            options.separator_char(),
            value
        )));
    }
    Ok(escape_invisible(value).into_owned())
}

fn split_fields(line: &str, separator: u8) -> Result<Vec<String>, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(separator)
        .quoting(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    rdr.read_record(&mut record).map_err(Error::CsvParse)?;
    Ok(record.iter().map(str::to_string).collect())
}

fn parse_header(line: &str, options: &TableOptions) -> Result<Vec<String>, Error> {
    let fields = split_fields(line, options.separator)?;
    if fields.len() < 3 {
        return Err(Error::InvalidHeader(format!(
            "expected `{}`, `{}`, language columns and `{}`, found {} column(s)",
            KEY_HEADER,
            DEFAULT_HEADER,
            EXTRAS_HEADER,
            fields.len()
        )));
    }

    let mut languages: Vec<String> = Vec::with_capacity(fields.len() - 3);
    for field in &fields[2..fields.len() - 1] {
        let code = parse_language_code(field)?;
        if languages.contains(&code) {
            return Err(Error::InvalidHeader(format!(
                "language `{}` appears twice",
                code
            )));
        }
        languages.push(code);
    }
    Ok(languages)
}

fn parse_comment(line: &str, separator: u8) -> Option<&str> {
    line.trim()
        .trim_end_matches(separator as char)
        .trim()
        .strip_prefix(COMMENT_MARKER)?
        .strip_suffix(COMMENT_MARKER)
}

fn parse_row(
    line: &str,
    line_number: usize,
    languages: &[String],
    options: &TableOptions,
) -> Result<Entry, Error> {
    if let Some(text) = parse_comment(line, options.separator) {
        return Ok(Entry::Comment(unescape_invisible(text).into_owned()));
    }

    let fields = split_fields(line, options.separator)?;
    if fields.iter().all(|f| f.trim().is_empty()) {
        return Ok(Entry::Blank);
    }

    let expected = 2 + languages.len();
    if fields.len() < expected {
        return Err(Error::MalformedRow {
            line: line_number,
            expected,
            found: fields.len(),
        });
    }

    let mut fields = fields
        .into_iter()
        .map(|f| unescape_invisible(&f).into_owned());
    // Both exist, the length was checked above.
    let key = fields.next().unwrap_or_default();
    let default = fields.next().unwrap_or_default();
    let mut string = StringEntry::new(key, default);

    let translations: Vec<String> = fields.by_ref().take(languages.len()).collect();
    if translations
        .first()
        .is_some_and(|first| *first == options.not_translatable)
    {
        string.translatable = Some(false);
    } else {
        for (language, text) in languages.iter().zip(translations) {
            if !text.is_empty() {
                string.set_translation(language.clone(), text);
            }
        }
    }

    if let Some(extras) = fields.next() {
        parse_extras(&extras, line_number, &mut string)?;
    }
    let trailing: Vec<String> = fields.filter(|f| !f.trim().is_empty()).collect();
    if !trailing.is_empty() {
        tracing::warn!(
            "line {}: ignoring {} cell(s) after `{}`",
            line_number,
            trailing.len(),
            EXTRAS_HEADER
        );
    }

    Ok(Entry::String(string))
}

fn parse_extras(cell: &str, line_number: usize, string: &mut StringEntry) -> Result<(), Error> {
    for item in cell.split(EXTRA_SEPARATOR).map(str::trim).filter(|i| !i.is_empty()) {
        let Some((name, value)) = item.split_once(EXTRA_VALUE_SEPARATOR) else {
            return Err(Error::DataMismatch(format!(
                "line {}: extra argument `{}` is not of the form name{}value",
                line_number, item, EXTRA_VALUE_SEPARATOR
            )));
        };
        let name = name.trim();
        match name {
            "translatable" => string.translatable = Some(value.trim() != "false"),
            _ if Extra::is_reserved_name(name) => tracing::warn!(
                "line {}: ignoring reserved extra argument `{}`",
                line_number,
                item
            ),
            _ => string.extras.push(Extra::new(name, value)),
        }
    }
    Ok(())
}
