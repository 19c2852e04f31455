use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn stringsheet_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("stringsheet"))
}

fn write_res_folder(res: &Path) {
    fs::create_dir_all(res.join("values")).unwrap();
    fs::create_dir_all(res.join("values-fr")).unwrap();
    fs::write(
        res.join("values/strings.xml"),
        r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <!--greeting-->
    <string name="hello">Hi</string>
    <string name="bye" translatable="false">Bye</string>
</resources>
"#,
    )
    .unwrap();
    fs::write(
        res.join("values-fr/strings.xml"),
        r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="hello">Salut</string>
    <string name="stale">Vieux</string>
</resources>
"#,
    )
    .unwrap();
}

#[test]
fn test_convert_forward() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    let table = temp_dir.path().join("strings.tsv");
    write_res_folder(&res);

    let output = stringsheet_cmd()
        .args(["convert", res.to_str().unwrap(), table.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 unknown key(s)"));
    assert_eq!(
        fs::read_to_string(&table).unwrap(),
        "key\tdefault\tfr\textra_arguments\n\n%%greeting%%\nhello\tHi\tSalut\t\nbye\tBye\tnot-translatable\t\n"
    );
}

#[test]
fn test_convert_reverse_with_separator() {
    let temp_dir = TempDir::new().unwrap();
    let table = temp_dir.path().join("strings.csv");
    let res = temp_dir.path().join("res");
    fs::write(
        &table,
        "key,default,de,extra_arguments\ntitle,Title,Titel,maxLines=1\n",
    )
    .unwrap();

    let output = stringsheet_cmd()
        .args([
            "convert",
            res.to_str().unwrap(),
            table.to_str().unwrap(),
            "--reverse",
            "-s",
            ",",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let default = fs::read_to_string(res.join("values/strings.xml")).unwrap();
    assert!(default.contains(r#"<string name="title" maxLines="1">Title</string>"#));
    let german = fs::read_to_string(res.join("values-de/strings.xml")).unwrap();
    assert!(german.contains(r#"<string name="title">Titel</string>"#));
}

#[test]
fn test_convert_missing_default_resource_fails() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    fs::create_dir_all(res.join("values-fr")).unwrap();
    let table = temp_dir.path().join("strings.tsv");

    let output = stringsheet_cmd()
        .args(["convert", res.to_str().unwrap(), table.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("missing default resource"));
    assert!(!table.exists());
}

#[test]
fn test_convert_malformed_row_fails() {
    let temp_dir = TempDir::new().unwrap();
    let table = temp_dir.path().join("strings.tsv");
    let res = temp_dir.path().join("res");
    fs::write(&table, "key\tdefault\tfr\tde\textra_arguments\nhello\tHi\n").unwrap();

    let output = stringsheet_cmd()
        .args(["convert", res.to_str().unwrap(), table.to_str().unwrap(), "-r"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed row at line 2"));
    assert!(!res.exists());
}

#[test]
fn test_convert_rejects_bad_separator() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    write_res_folder(&res);
    let table = temp_dir.path().join("strings.tsv");

    let output = stringsheet_cmd()
        .args([
            "convert",
            res.to_str().unwrap(),
            table.to_str().unwrap(),
            "--separator",
            "::",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("single character"));
    assert!(!table.exists());
}

#[test]
fn test_stats_json_on_resource_folder() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    write_res_folder(&res);

    let output = stringsheet_cmd()
        .args(["stats", res.to_str().unwrap(), "--json", "-q"])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["summary"]["languages"], 1);
    assert_eq!(v["summary"]["keys"], 2);
    let fr = &v["languages"][0];
    assert_eq!(fr["language"], "fr");
    assert_eq!(fr["translated"], 1);
    assert_eq!(fr["missing"], 0);
    assert_eq!(fr["not_translatable"], 1);
    assert_eq!(fr["completion_percent"], 100.0);
}

#[test]
fn test_debug_table_file_to_output() {
    let temp_dir = TempDir::new().unwrap();
    let table = temp_dir.path().join("strings.tsv");
    let json_file = temp_dir.path().join("table.json");
    fs::write(
        &table,
        "key\tdefault\tfr\textra_arguments\n%%greeting%%\nhello\tHi\tSalut\t\n",
    )
    .unwrap();

    let output = stringsheet_cmd()
        .args([
            "debug",
            table.to_str().unwrap(),
            "-o",
            json_file.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_file).unwrap()).unwrap();
    assert_eq!(v["languages"][0], "fr");
    assert_eq!(v["entries"][0]["comment"], "greeting");
    assert_eq!(v["entries"][1]["string"]["key"], "hello");
    assert_eq!(v["entries"][1]["string"]["translations"]["fr"], "Salut");
}

#[test]
fn test_debug_missing_input_fails() {
    let output = stringsheet_cmd()
        .args(["debug", "/definitely/not/here.tsv"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Input does not exist"));
}
