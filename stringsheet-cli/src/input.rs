use std::path::Path;

use stringsheet::{Codec, Error, TableOptions};

/// Loads `input` into a codec. A directory is read as a resource folder,
/// anything else as a table file.
pub fn load_input(input: &str, options: TableOptions) -> Result<Codec, Error> {
    let mut codec = Codec::new(options);
    if Path::new(input).is_dir() {
        codec.read_resource_folder(input)?;
    } else {
        codec.read_table_file(input)?;
    }
    Ok(codec)
}
