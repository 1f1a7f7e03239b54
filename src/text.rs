//! Plain-text normalization for descriptions coming off the service.
//!
//! Descriptions arrive HTML-flavored and sometimes carry literal backslash
//! escapes. `clean` reduces them to single-line plain text; it never fails,
//! falling back to tag-stripping alone when escape decoding goes wrong.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static TAG_RE: OnceLock<Regex> = OnceLock::new();

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"))
}

pub fn clean(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let decoded = match decode_escapes(raw) {
        Some(s) => s,
        None => return collapse(&decode_entities(&strip_tags(raw))),
    };

    let stripped = decode_entities(&strip_tags(&decoded));
    let normalized: String = stripped.nfkc().collect();
    collapse(&normalized)
}

/// Replace markup tags with a space so adjacent blocks don't glue together.
fn strip_tags(s: &str) -> String {
    tag_re().replace_all(s, " ").into_owned()
}

/// The handful of named entities the service actually emits.
fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&rsquo;", "\u{2019}")
        .replace("&amp;", "&")
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode literal backslash escapes (`\n`, `\t`, `\"`, `\uXXXX` including
/// surrogate pairs). Unknown escapes pass through verbatim; a malformed
/// `\u` sequence aborts the decode entirely.
fn decode_escapes(s: &str) -> Option<String> {
    if !s.contains('\\') {
        return Some(s.to_string());
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('/') => out.push('/'),
            Some('\\') => out.push('\\'),
            Some('u') => out.push(decode_unicode_escape(&mut chars)?),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Some(out)
}

fn decode_unicode_escape(chars: &mut std::str::Chars<'_>) -> Option<char> {
    let high = hex4(chars)?;
    if (0xD800..0xDC00).contains(&high) {
        // High surrogate, must be followed by \uDC00-\uDFFF.
        if chars.next() != Some('\\') || chars.next() != Some('u') {
            return None;
        }
        let low = hex4(chars)?;
        if !(0xDC00..0xE000).contains(&low) {
            return None;
        }
        let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(combined);
    }
    char::from_u32(high)
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
        let digit = chars.next()?.to_digit(16)?;
        value = value * 16 + digit;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup_and_collapses_whitespace() {
        assert_eq!(
            clean("<p>A  bolt of\nlightning</p> <em>arcs</em>\r\nout."),
            "A bolt of lightning arcs out."
        );
    }

    #[test]
    fn decodes_backslash_escapes() {
        assert_eq!(clean("first\\nsecond"), "first second");
        assert_eq!(clean("fey\\u00e9"), "fey\u{00e9}");
        assert_eq!(clean("pair \\ud83d\\ude00 done"), "pair \u{1f600} done");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(clean("slashing &amp; piercing"), "slashing & piercing");
        assert_eq!(clean("a&nbsp;&nbsp;b"), "a b");
    }

    #[test]
    fn malformed_unicode_escape_falls_back_to_tag_stripping() {
        assert_eq!(clean("<b>ok</b> \\uZZZZ"), "ok \\uZZZZ");
    }

    #[test]
    fn applies_nfkc_normalization() {
        // U+FB01 LATIN SMALL LIGATURE FI decomposes under NFKC.
        assert_eq!(clean("\u{fb01}re"), "fire");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n  "), "");
    }
}
