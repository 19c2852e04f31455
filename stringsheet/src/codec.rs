//! This module provides the `Codec` struct and the two conversion pipelines:
//! an Android resource folder into one table file, and a table file back into
//! a resource folder.
//!
//! A resource folder is laid out as:
//!
//! ```text
//! res/
//!   values/strings.xml        canonical language
//!   values-xx/strings.xml     one per language, xx = two-letter code
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    formats::AndroidStringsFormat,
    merge::MergeReport,
    options::TableOptions,
    traits::Parser,
    types::{DEFAULT_LANGUAGE, Table},
};

/// Folder of the canonical language.
pub const VALUES_FOLDER: &str = "values";

/// Name of the string resource file inside every values folder.
pub const STRINGS_FILE: &str = "strings.xml";

lazy_static! {
    static ref LANGUAGE_FOLDER_REGEX: Regex = Regex::new(r"^values-([a-z]{2})$").unwrap();
}

/// A `values-xx` folder found in a resource folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFolder {
    pub language: String,
    pub path: PathBuf,
}

impl LanguageFolder {
    pub fn strings_file(&self) -> PathBuf {
        self.path.join(STRINGS_FILE)
    }
}

/// Lists the `values-xx` folders of `res_folder`, sorted by language code.
pub fn discover_language_folders<P: AsRef<Path>>(
    res_folder: P,
) -> Result<Vec<LanguageFolder>, Error> {
    let res_folder = res_folder.as_ref();
    let mut folders = Vec::new();
    for dir_entry in fs::read_dir(res_folder).map_err(|e| Error::Io(e).in_file(res_folder))? {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type()?.is_dir() {
            continue;
        }
        let file_name = dir_entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(captures) = LANGUAGE_FOLDER_REGEX.captures(name) {
            folders.push(LanguageFolder {
                language: captures[1].to_string(),
                path: dir_entry.path(),
            });
        }
    }
    folders.sort_by(|a, b| a.language.cmp(&b.language));
    Ok(folders)
}

/// Folder name holding `language`: `values` for the default, `values-xx` otherwise.
pub fn values_folder_name(language: &str) -> String {
    if language == DEFAULT_LANGUAGE {
        VALUES_FOLDER.to_string()
    } else {
        format!("{}-{}", VALUES_FOLDER, language)
    }
}

/// Loads the canonical `values/strings.xml` of `res_folder`.
pub fn load_default_table<P: AsRef<Path>>(
    res_folder: P,
    options: &TableOptions,
) -> Result<Table, Error> {
    let path = res_folder.as_ref().join(VALUES_FOLDER).join(STRINGS_FILE);
    if !path.is_file() {
        return Err(Error::MissingDefaultResource(path));
    }
    let format = AndroidStringsFormat::read_from(&path, options).map_err(|e| e.in_file(&path))?;
    Ok(Table::from(format))
}

/// Holds one translation table and moves it between resource folders and table files.
pub struct Codec {
    /// The table managed by this codec.
    pub table: Table,
    options: TableOptions,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(TableOptions::default())
    }
}

impl Codec {
    /// Creates a codec with an empty table.
    pub fn new(options: TableOptions) -> Self {
        Codec {
            table: Table::new(),
            options,
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Replaces the table with the contents of a resource folder: the
    /// canonical file first, then every language folder merged into it.
    ///
    /// Language folders without a `strings.xml` are skipped.
    ///
    /// # Returns
    ///
    /// One [`MergeReport`] per merged language, in column order.
    pub fn read_resource_folder<P: AsRef<Path>>(
        &mut self,
        res_folder: P,
    ) -> Result<Vec<MergeReport>, Error> {
        let res_folder = res_folder.as_ref();
        let mut table = load_default_table(res_folder, &self.options)?;
        tracing::info!(
            "loaded {} string(s) from the default resource",
            table.string_count()
        );

        let mut reports = Vec::new();
        for folder in discover_language_folders(res_folder)? {
            let path = folder.strings_file();
            if !path.is_file() {
                tracing::info!(
                    "skipping {}: no {}",
                    folder.path.display(),
                    STRINGS_FILE
                );
                continue;
            }
            tracing::info!("found language: {}", folder.language);
            let format =
                AndroidStringsFormat::read_from(&path, &self.options).map_err(|e| e.in_file(&path))?;
            reports.push(table.merge_language(&folder.language, format.entries));
        }

        self.table = table;
        Ok(reports)
    }

    /// Writes the table to `path`. Nothing is created when rendering fails.
    pub fn write_table_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let bytes = self.table.to_bytes(&self.options)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes).map_err(|e| Error::Io(e).in_file(path))?;
        tracing::info!(
            "wrote {} row(s) and {} language(s) to {}",
            self.table.len(),
            self.table.languages().len(),
            path.display()
        );
        Ok(())
    }

    /// Replaces the table with the contents of a table file.
    pub fn read_table_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        self.table = Table::read_from(path, &self.options).map_err(|e| e.in_file(path))?;
        tracing::info!(
            "read {} row(s) with language(s) [{}] from {}",
            self.table.len(),
            self.table.languages().join(", "),
            path.display()
        );
        Ok(())
    }

    /// Renders the XML document of every language, default first.
    pub fn render_resource_files(&self) -> Result<Vec<(String, Vec<u8>)>, Error> {
        std::iter::once(DEFAULT_LANGUAGE)
            .chain(self.table.languages().iter().map(String::as_str))
            .map(|language| {
                let format = AndroidStringsFormat::from_table(&self.table, language);
                Ok((language.to_string(), format.to_bytes(&self.options)?))
            })
            .collect()
    }

    /// Writes one `strings.xml` per language into `res_folder`, creating
    /// folders as needed. Every document is rendered before the first write.
    ///
    /// # Returns
    ///
    /// The written file paths, default first.
    pub fn write_resource_folder<P: AsRef<Path>>(&self, res_folder: P) -> Result<Vec<PathBuf>, Error> {
        let res_folder = res_folder.as_ref();
        let documents = self.render_resource_files()?;

        let mut written = Vec::with_capacity(documents.len());
        for (language, bytes) in documents {
            let folder = res_folder.join(values_folder_name(&language));
            fs::create_dir_all(&folder).map_err(|e| Error::Io(e).in_file(&folder))?;
            let path = folder.join(STRINGS_FILE);
            fs::write(&path, bytes).map_err(|e| Error::Io(e).in_file(&path))?;
            tracing::info!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// Dumps the table as pretty-printed JSON.
    pub fn write_json<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, &self.table).map_err(Error::Parse)
    }
}

/// Converts a resource folder into a table file.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
    res_folder: P,
    table_file: Q,
    options: TableOptions,
) -> Result<Vec<MergeReport>, Error> {
    let mut codec = Codec::new(options);
    let reports = codec.read_resource_folder(res_folder)?;
    codec.write_table_file(table_file)?;
    Ok(reports)
}

/// Converts a table file back into a resource folder.
pub fn convert_reverse<P: AsRef<Path>, Q: AsRef<Path>>(
    table_file: P,
    res_folder: Q,
    options: TableOptions,
) -> Result<Vec<PathBuf>, Error> {
    let mut codec = Codec::new(options);
    codec.read_table_file(table_file)?;
    codec.write_resource_folder(res_folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_values_folder_name() {
        assert_eq!(values_folder_name(DEFAULT_LANGUAGE), "values");
        assert_eq!(values_folder_name("fr"), "values-fr");
    }

    #[test]
    fn test_discover_language_folders() {
        let dir = TempDir::new().unwrap();
        for name in ["values", "values-fr", "values-de", "values-night", "values-pt-rBR", "drawable"] {
            fs::create_dir_all(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("values-es"), "not a folder").unwrap();

        let folders = discover_language_folders(dir.path()).unwrap();
        let languages: Vec<_> = folders.iter().map(|f| f.language.as_str()).collect();
        assert_eq!(languages, vec!["de", "fr"]);
        assert_eq!(folders[0].strings_file(), dir.path().join("values-de").join("strings.xml"));
    }

    #[test]
    fn test_load_default_table_missing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("values")).unwrap();
        let err = load_default_table(dir.path(), &TableOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingDefaultResource(_)));
    }

    #[test]
    fn test_read_resource_folder_skips_language_without_file() {
        let dir = TempDir::new().unwrap();
        write(
            &dir.path().join("values/strings.xml"),
            r#"<resources><string name="hello">Hello</string></resources>"#,
        );
        write(
            &dir.path().join("values-fr/strings.xml"),
            r#"<resources><string name="hello">Bonjour</string></resources>"#,
        );
        fs::create_dir_all(dir.path().join("values-de")).unwrap();

        let mut codec = Codec::default();
        let reports = codec.read_resource_folder(dir.path()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].language, "fr");
        assert_eq!(codec.table.languages(), ["fr"]);
        assert_eq!(codec.table.get("hello").unwrap().text("fr"), Some("Bonjour"));
    }

    #[test]
    fn test_read_table_file_reports_path_on_error() {
        let dir = TempDir::new().unwrap();
        let table_file = dir.path().join("strings.tsv");
        fs::write(&table_file, "key\tdefault\tfr\textra_arguments\nhello\n").unwrap();

        let mut codec = Codec::default();
        let err = codec.read_table_file(&table_file).unwrap_err();
        assert!(err.to_string().contains("strings.tsv"));
        assert!(matches!(err.root(), Error::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_failed_render_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let table_file = dir.path().join("out.tsv");
        let mut codec = Codec::default();
        codec.table = Table::from_entries(vec![
            crate::types::StringEntry::new("bad", "line\nbreak").into(),
        ]);
        assert!(codec.write_table_file(&table_file).is_err());
        assert!(!table_file.exists());
    }

    #[test]
    fn test_write_json() {
        let mut codec = Codec::default();
        codec.table = Table::from_entries(vec![crate::types::Entry::comment("c")]);
        let mut out = Vec::new();
        codec.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["entries"][0]["comment"], "c");
    }
}
