pub mod android_strings;
pub mod table;

// Reexporting the formats for easier access
pub use android_strings::Format as AndroidStringsFormat;
pub use table::{DEFAULT_HEADER, EXTRAS_HEADER, KEY_HEADER};
