//! Escaping of invisible characters that do not survive plain text editors.

use std::borrow::Cow;

/// Invisible characters and the notation they take in a table cell.
const INVISIBLE_CHARS: [(char, &str); 2] = [('\u{200B}', "\\u200b"), ('\u{2011}', "\\u2011")];

/// Replaces the zero-width space and the non-breaking hyphen with their
/// `\uXXXX` notation. Everything else passes through.
pub fn escape_invisible(value: &str) -> Cow<'_, str> {
    if !value
        .chars()
        .any(|c| INVISIBLE_CHARS.iter().any(|(raw, _)| *raw == c))
    {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match INVISIBLE_CHARS.iter().find(|(raw, _)| *raw == c) {
            Some((_, notation)) => escaped.push_str(notation),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Inverse of [`escape_invisible`]. The hex digits are matched case-insensitively.
pub fn unescape_invisible(value: &str) -> Cow<'_, str> {
    if !value.contains("\\u") {
        return Cow::Borrowed(value);
    }

    let mut unescaped = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find("\\u") {
        unescaped.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let matched = INVISIBLE_CHARS.iter().find(|(_, notation)| {
            candidate
                .get(..notation.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(notation))
        });
        match matched {
            Some((raw, notation)) => {
                unescaped.push(*raw);
                rest = &candidate[notation.len()..];
            }
            None => {
                unescaped.push_str("\\u");
                rest = &candidate[2..];
            }
        }
    }
    unescaped.push_str(rest);
    Cow::Owned(unescaped)
}
