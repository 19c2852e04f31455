//! Traits for format-agnostic parsing and serialization in stringsheet.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{error::Error, options::TableOptions};

/// A trait for parsing and writing one resource file or table.
///
/// # Example
///
/// ```rust,no_run
/// use stringsheet::{TableOptions, traits::Parser};
/// let options = TableOptions::default();
/// let format = stringsheet::formats::AndroidStringsFormat::read_from("values/strings.xml", &options)?;
/// format.write_to("values/strings_copy.xml", &options)?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R, options: &TableOptions) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P, options: &TableOptions) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, options)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W, options: &TableOptions) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P, options: &TableOptions) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer, options)?;
        writer.flush()?;
        Ok(())
    }

    /// Parse from a string.
    fn from_str(s: &str, options: &TableOptions) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s), options)
    }

    /// Write into an in-memory buffer.
    fn to_bytes(&self, options: &TableOptions) -> Result<Vec<u8>, Error> {
        let mut buffer = Vec::new();
        self.to_writer(&mut buffer, options)?;
        Ok(buffer)
    }
}
