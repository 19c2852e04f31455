//! Core types shared by the XML and table formats.
//! Parsers decode into these; encoders serialize these.

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Language code of the canonical `values/strings.xml`.
pub const DEFAULT_LANGUAGE: &str = "default";

lazy_static! {
    /// Codes that map onto a discoverable `values-xx` folder.
    static ref LANGUAGE_CODE_REGEX: Regex = Regex::new(r"^[a-z]{2}$").unwrap();
}

/// An XML attribute of a `<string>` other than `name` and `translatable`,
/// carried through the table untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extra {
    pub name: String,
    pub value: String,
}

impl Extra {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether the attribute name is handled structurally instead of as an extra.
    pub fn is_reserved_name(name: &str) -> bool {
        name == "name" || name == "translatable"
    }
}

/// One `<string>` resource together with its translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringEntry {
    /// Resource identifier, the `name` attribute.
    pub key: String,

    /// Text in the canonical language. In a single-language XML document
    /// this holds that document's text.
    pub default: String,

    /// Language code to translated text. Missing or empty means not translated yet.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, String>,

    /// The `translatable` attribute, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translatable: Option<bool>,

    /// Remaining attributes in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<Extra>,
}

impl StringEntry {
    pub fn new(key: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default: default.into(),
            translations: BTreeMap::new(),
            translatable: None,
            extras: Vec::new(),
        }
    }

    pub fn with_translatable(mut self, translatable: bool) -> Self {
        self.translatable = Some(translatable);
        self
    }

    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.extras.push(extra);
        self
    }

    pub fn with_translation(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_translation(language, text);
        self
    }

    pub fn is_translatable(&self) -> bool {
        self.translatable != Some(false)
    }

    /// Text for `language`, treating [`DEFAULT_LANGUAGE`] as the canonical text.
    /// Empty translations are reported as missing.
    pub fn text(&self, language: &str) -> Option<&str> {
        let text = if language == DEFAULT_LANGUAGE {
            Some(self.default.as_str())
        } else {
            self.translations.get(language).map(String::as_str)
        };
        text.filter(|t| !t.is_empty())
    }

    pub fn set_translation(&mut self, language: impl Into<String>, text: impl Into<String>) {
        self.translations.insert(language.into(), text.into());
    }
}

/// One logical line of a resource file or table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    String(StringEntry),
    Comment(String),
    Blank,
}

impl Entry {
    pub fn comment(text: impl Into<String>) -> Self {
        Entry::Comment(text.into())
    }
}

impl From<StringEntry> for Entry {
    fn from(value: StringEntry) -> Self {
        Entry::String(value)
    }
}

/// Borrowed view of a table entry, yielded in display order by [`Table::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRef<'a> {
    String(&'a StringEntry),
    Comment(&'a str),
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    String(String),
    Comment(String),
    Blank,
}

/// The whole translation table: an ordered list of rows plus the string
/// records they point to, keyed by resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    languages: Vec<String>,
    rows: Vec<Row>,
    strings: HashMap<String, StringEntry>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_languages(languages: Vec<String>) -> Self {
        Self {
            languages,
            ..Self::default()
        }
    }

    /// Builds a table from entries in display order. Duplicate keys keep the
    /// position of their first occurrence and the content of their last.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.push(entry);
        }
        table
    }

    /// Language columns, in column order. Never contains [`DEFAULT_LANGUAGE`].
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Appends a language column unless it already exists.
    pub fn add_language(&mut self, language: &str) {
        if !self.languages.iter().any(|l| l == language) {
            self.languages.push(language.to_string());
        }
    }

    /// Appends an entry. Returns the record it replaced when the key already existed.
    pub fn push(&mut self, entry: Entry) -> Option<StringEntry> {
        match entry {
            Entry::Blank => {
                self.rows.push(Row::Blank);
                None
            }
            Entry::Comment(text) => {
                self.rows.push(Row::Comment(text));
                None
            }
            Entry::String(string) => {
                let key = string.key.clone();
                let replaced = self.strings.insert(key.clone(), string);
                if replaced.is_some() {
                    tracing::warn!("duplicate key `{}`, keeping the last definition", key);
                } else {
                    self.rows.push(Row::String(key));
                }
                replaced
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&StringEntry> {
        self.strings.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut StringEntry> {
        self.strings.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    /// Number of rows, including comments and blank lines.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of string records.
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// All entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = EntryRef<'_>> {
        self.rows.iter().filter_map(|row| match row {
            Row::String(key) => self.strings.get(key).map(EntryRef::String),
            Row::Comment(text) => Some(EntryRef::Comment(text)),
            Row::Blank => Some(EntryRef::Blank),
        })
    }

    /// String records in display order.
    pub fn strings(&self) -> impl Iterator<Item = &StringEntry> {
        self.entries().filter_map(|entry| match entry {
            EntryRef::String(s) => Some(s),
            _ => None,
        })
    }

    /// Keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings().map(|s| s.key.as_str())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Table", 2)?;
        state.serialize_field("languages", &self.languages)?;
        state.serialize_field("entries", &self.entries().collect::<Vec<_>>())?;
        state.end()
    }
}

/// Validates a language code taken from a table header. Codes are lowercased
/// and must be two letters, so they name a `values-xx` folder that is found
/// again on the next forward conversion.
pub fn parse_language_code(code: &str) -> Result<String, Error> {
    let code = code.trim().to_ascii_lowercase();
    let code = code.as_str();
    if code.is_empty() {
        return Err(Error::InvalidHeader("empty language column".to_string()));
    }
    if code == DEFAULT_LANGUAGE {
        return Err(Error::InvalidHeader(format!(
            "`{}` is reserved for the canonical column",
            DEFAULT_LANGUAGE
        )));
    }
    code.parse::<LanguageIdentifier>()
        .map_err(|e| Error::InvalidHeader(format!("invalid language code `{}`: {}", code, e)))?;
    if !LANGUAGE_CODE_REGEX.is_match(code) {
        return Err(Error::InvalidHeader(format!(
            "language code `{}` is not a two-letter code",
            code
        )));
    }
    Ok(code.to_string())
}
