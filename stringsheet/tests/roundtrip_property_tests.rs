use proptest::prelude::*;
use stringsheet::formats::AndroidStringsFormat;
use stringsheet::traits::Parser;
use stringsheet::{Entry, StringEntry, Table, TableOptions};

#[derive(Debug, Clone)]
enum Line {
    String {
        default: String,
        fr: String,
        de: String,
        translatable: bool,
    },
    Comment(String),
    Blank,
}

fn line_strategy() -> impl Strategy<Value = Line> {
    let text = "[A-Za-z0-9 .,!?']{0,20}";
    prop_oneof![
        6 => (text, text, text, any::<bool>()).prop_map(|(default, fr, de, translatable)| {
            Line::String {
                default,
                fr,
                de,
                translatable,
            }
        }),
        1 => "[A-Za-z0-9 ]{0,20}".prop_map(Line::Comment),
        1 => Just(Line::Blank),
    ]
}

fn build_table(lines: Vec<Line>) -> Table {
    let mut table = Table::new();
    table.add_language("de");
    table.add_language("fr");
    for (index, line) in lines.into_iter().enumerate() {
        let entry = match line {
            Line::String {
                default,
                fr,
                de,
                translatable,
            } => {
                let mut string = StringEntry::new(format!("key_{index}"), default);
                if !translatable {
                    string.translatable = Some(false);
                }
                for (language, text) in [("fr", fr), ("de", de)] {
                    if !text.is_empty() {
                        string.set_translation(language, text);
                    }
                }
                Entry::String(string)
            }
            Line::Comment(text) => Entry::Comment(text),
            Line::Blank => Entry::Blank,
        };
        table.push(entry);
    }
    table
}

fn render(table: &Table, options: &TableOptions) -> String {
    String::from_utf8(table.to_bytes(options).unwrap()).unwrap()
}

proptest! {
    #[test]
    fn table_text_is_stable_after_one_pass(lines in prop::collection::vec(line_strategy(), 0..30)) {
        let options = TableOptions::default();
        let first = render(&build_table(lines), &options);
        let parsed = Table::from_str(&first, &options).unwrap();
        let second = render(&parsed, &options);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn table_keeps_keys_and_translations(lines in prop::collection::vec(line_strategy(), 0..30)) {
        let options = TableOptions::default();
        let table = build_table(lines);
        let parsed = Table::from_str(&render(&table, &options), &options).unwrap();

        prop_assert_eq!(table.keys().collect::<Vec<_>>(), parsed.keys().collect::<Vec<_>>());
        for string in table.strings() {
            let other = parsed.get(&string.key).unwrap();
            prop_assert_eq!(&string.default, &other.default);
            prop_assert_eq!(string.is_translatable(), other.is_translatable());
            if string.is_translatable() {
                prop_assert_eq!(&string.translations, &other.translations);
            }
        }
    }

    #[test]
    fn xml_text_survives_escaping(text in "[ -~]{0,40}") {
        let options = TableOptions::default();
        let format = AndroidStringsFormat::new(vec![StringEntry::new("value", text.clone()).into()]);
        let bytes = format.to_bytes(&options).unwrap();
        let parsed = AndroidStringsFormat::from_reader(bytes.as_slice(), &options).unwrap();
        prop_assert_eq!(&parsed.strings().next().unwrap().default, &text);
    }
}
