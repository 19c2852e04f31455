use stringsheet::{Codec, MergeReport, TableOptions};

use stringsheet_cli::validation::{validate_file_path, validate_output_file, validate_res_folder};

/// Run the convert command in either direction.
pub fn run_convert_command(
    res_folder: String,
    table_file: String,
    options: TableOptions,
    reverse: bool,
) -> Result<(), String> {
    validate_res_folder(&res_folder)?;
    if reverse {
        validate_file_path(&table_file)?;
        table_to_resources(&table_file, &res_folder, options)
    } else {
        validate_output_file(&table_file)?;
        resources_to_table(&res_folder, &table_file, options)
    }
}

fn resources_to_table(
    res_folder: &str,
    table_file: &str,
    options: TableOptions,
) -> Result<(), String> {
    let mut codec = Codec::new(options);
    let reports = codec
        .read_resource_folder(res_folder)
        .map_err(|e| e.to_string())?;
    for report in &reports {
        print_report(report);
    }
    codec
        .write_table_file(table_file)
        .map_err(|e| e.to_string())?;
    println!(
        "✅ Wrote {} key(s) in {} language(s) to {}",
        codec.table.string_count(),
        codec.table.languages().len() + 1,
        table_file
    );
    Ok(())
}

fn table_to_resources(
    table_file: &str,
    res_folder: &str,
    options: TableOptions,
) -> Result<(), String> {
    let mut codec = Codec::new(options);
    codec
        .read_table_file(table_file)
        .map_err(|e| e.to_string())?;
    let written = codec
        .write_resource_folder(res_folder)
        .map_err(|e| e.to_string())?;
    for path in &written {
        println!("  {}", path.display());
    }
    println!("✅ Wrote {} file(s) to {}", written.len(), res_folder);
    Ok(())
}

fn print_report(report: &MergeReport) {
    if report.is_clean() {
        println!("✅ {}: {} translation(s)", report.language, report.applied);
        return;
    }
    println!(
        "⚠️  {}: {} translation(s), {} unknown key(s), {} duplicate key(s)",
        report.language,
        report.applied,
        report.unknown_keys.len(),
        report.duplicate_keys.len()
    );
}
