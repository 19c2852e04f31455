#![forbid(unsafe_code)]
//! Android string resources as one translation table.
//!
//! Reads a resource folder (`values/strings.xml` plus one `values-xx/strings.xml`
//! per language) into a single [`Table`] keyed by string name, writes it as a
//! delimited text file translators can edit in a spreadsheet, and turns such a
//! file back into the resource folder. Comments, blank lines, `translatable`
//! flags and extra attributes survive the round trip.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringsheet::{TableOptions, convert, convert_reverse};
//!
//! // res/values*/strings.xml -> strings.tsv
//! let reports = convert("app/src/main/res", "strings.tsv", TableOptions::default())?;
//! for report in &reports {
//!     println!("{}: {} translations", report.language, report.applied);
//! }
//!
//! // strings.tsv -> res/values*/strings.xml
//! convert_reverse("strings.tsv", "app/src/main/res", TableOptions::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Table layout
//!
//! ```text
//! key      default  fr       extra_arguments
//!
//! %%greeting%%
//! hello    Hi       Salut
//! bye      Bye      not-translatable
//! ```

pub mod codec;
pub mod error;
pub mod escape;
pub mod formats;
pub mod merge;
pub mod options;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{Codec, convert, convert_reverse, discover_language_folders, load_default_table},
    error::Error,
    merge::MergeReport,
    options::TableOptions,
    types::{DEFAULT_LANGUAGE, Entry, EntryRef, Extra, StringEntry, Table},
};
