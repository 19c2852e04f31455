use std::path::Path;
use stringsheet::TableOptions;

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate an input that may be either a resource folder or a table file
pub fn validate_input_path(path: &str) -> Result<(), String> {
    if !Path::new(path).exists() {
        return Err(format!("Input does not exist: {}", path));
    }
    Ok(())
}

/// Validate the resource folder. A missing folder is left to the converter,
/// which reports the missing default resource.
pub fn validate_res_folder(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);
    if path_obj.exists() && !path_obj.is_dir() {
        return Err(format!("Resource folder is not a directory: {}", path));
    }
    Ok(())
}

/// Validate the output file does not point at a directory
pub fn validate_output_file(path: &str) -> Result<(), String> {
    if Path::new(path).is_dir() {
        return Err(format!("Output path is a directory: {}", path));
    }
    Ok(())
}

/// Builds table options from the `--separator` argument. `tab` and a
/// literal `\t` are accepted for shells where a raw tab is awkward.
pub fn validate_separator(separator: Option<&str>) -> Result<TableOptions, String> {
    let Some(separator) = separator else {
        return Ok(TableOptions::default());
    };

    let separator = match separator {
        "tab" | "\\t" => "\t",
        other => other,
    };

    let mut chars = separator.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(format!(
            "Separator must be a single character, got {:?}",
            separator
        ));
    };

    TableOptions::new()
        .with_separator_char(c)
        .map_err(|e| e.to_string())
}
