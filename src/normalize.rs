use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

pub const STOPWORDS: [&str; 7] = ["fc", "cf", "sc", "afc", "u19", "u20", "u21"];

/// Unicode whitespace plus the ASCII separators `\x1c`..=`\x1f`.
pub fn is_name_space(ch: char) -> bool {
    ch.is_whitespace() || ('\x1c'..='\x1f').contains(&ch)
}

pub fn trim_name(input: &str) -> &str {
    input.trim_matches(is_name_space)
}

/// `"Real Madrid CF"` becomes `"real-madrid"`. May return an empty string, which callers
/// reject as invalid input.
pub fn normalize_name(input: &str) -> String {
    let trimmed = trim_name(input);
    if trimmed.is_empty() {
        return String::new();
    }

    let lower = trimmed.to_lowercase();
    let folded: String = lower
        .nfd()
        .filter(|ch| ch.general_category() != GeneralCategory::NonspacingMark)
        .collect();

    let joined = folded
        .split(is_name_space)
        .filter(|token| !token.is_empty() && !STOPWORDS.contains(token))
        .collect::<Vec<_>>()
        .join("-");

    let mut out = String::with_capacity(joined.len());
    let mut prev_hyphen = false;
    for ch in joined.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            prev_hyphen = false;
        } else if ch == '-' {
            if !prev_hyphen && !out.is_empty() {
                out.push('-');
            }
            prev_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

// "spain-laliga" -> "Spain Laliga". A cased character opens a word unless the previous
// character was cased too.
pub fn league_display_name(league_id: &str) -> String {
    let mut out = String::with_capacity(league_id.len());
    let mut prev_cased = false;
    for ch in league_id.replace('-', " ").chars() {
        if !is_cased(ch) {
            out.push(ch);
            prev_cased = false;
            continue;
        }
        if prev_cased {
            out.extend(ch.to_lowercase());
        } else {
            push_titlecase(&mut out, ch);
        }
        prev_cased = true;
    }
    out
}

fn is_cased(ch: char) -> bool {
    ch.is_lowercase()
        || ch.is_uppercase()
        || ch.general_category() == GeneralCategory::TitlecaseLetter
}

// Titlecase differs from uppercase only for the Latin digraphs and the Greek letters with
// ypogegrammeni.
fn push_titlecase(out: &mut String, ch: char) {
    let titled = match ch {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        '\u{1F80}'..='\u{1FAF}' => {
            let code = ch as u32;
            char::from_u32(code | 0x8).unwrap_or(ch)
        }
        '\u{1FB3}' | '\u{1FBC}' => '\u{1FBC}',
        '\u{1FC3}' | '\u{1FCC}' => '\u{1FCC}',
        '\u{1FF3}' | '\u{1FFC}' => '\u{1FFC}',
        _ => {
            out.extend(ch.to_uppercase());
            return;
        }
    };
    out.push(titled);
}
