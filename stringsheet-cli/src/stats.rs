use serde::Serialize;
use serde_json::json;
use stringsheet::{EntryRef, Table};

/// Translation coverage of one language column.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LanguageStats {
    pub language: String,
    pub translated: usize,
    pub missing: usize,
    pub not_translatable: usize,
    pub completion_percent: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Counts translated and missing strings for every language of `table`.
/// Non-translatable strings are left out of the completion percentage.
pub fn collect_stats(table: &Table) -> Vec<LanguageStats> {
    table
        .languages()
        .iter()
        .map(|language| {
            let mut stats = LanguageStats {
                language: language.clone(),
                ..LanguageStats::default()
            };
            for string in table.strings() {
                if !string.is_translatable() {
                    stats.not_translatable += 1;
                } else if string.text(language).is_some() {
                    stats.translated += 1;
                } else {
                    stats.missing += 1;
                }
            }
            let denominator = stats.translated + stats.missing;
            let percent = if denominator == 0 {
                100.0
            } else {
                (stats.translated as f64) * 100.0 / (denominator as f64)
            };
            stats.completion_percent = round2(percent);
            stats
        })
        .collect()
}

pub fn print_stats(table: &Table, json_output: bool) {
    let per_lang = collect_stats(table);
    let comments = table
        .entries()
        .filter(|e| matches!(e, EntryRef::Comment(_)))
        .count();

    if json_output {
        let body = json!({
            "summary": {
                "languages": per_lang.len(),
                "keys": table.string_count(),
                "comments": comments,
            },
            "languages": per_lang,
        });
        match serde_json::to_string_pretty(&body) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error serializing stats: {}", e),
        }
        return;
    }

    println!("=== Stats ===");
    println!("Languages: {}", per_lang.len());
    println!("Keys: {}", table.string_count());
    println!("Comments: {}", comments);

    for stats in &per_lang {
        println!("\nLanguage: {}", stats.language);
        println!("  Translated: {}", stats.translated);
        println!("  Missing: {}", stats.missing);
        println!("  Not translatable: {}", stats.not_translatable);
        println!("  Completion: {:.2}%", stats.completion_percent);
    }
}
