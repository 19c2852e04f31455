use std::fs::File;
use std::io::Write;

use stringsheet::TableOptions;
use stringsheet_cli::load_input;

/// Run the debug command: load a resource folder or table file and output the table as JSON.
pub fn run_debug_command(
    input: String,
    options: TableOptions,
    output: Option<String>,
) -> Result<(), String> {
    let codec = load_input(&input, options).map_err(|e| format!("Error reading {}: {}", input, e))?;

    let mut json = Vec::new();
    codec
        .write_json(&mut json)
        .map_err(|e| format!("Error serializing to JSON: {}", e))?;

    match output {
        Some(output_path) => {
            File::create(&output_path)
                .and_then(|mut f| f.write_all(&json))
                .map_err(|e| format!("Error writing to {}: {}", output_path, e))?;
            println!("✅ Debug output written to: {}", output_path);
        }
        None => {
            println!("{}", String::from_utf8_lossy(&json));
        }
    }
    Ok(())
}
