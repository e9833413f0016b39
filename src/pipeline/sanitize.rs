use std::sync::LazyLock;

use regex::{Captures, Regex};

const FENCE: &str = "```";

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").expect("trailing comma pattern is valid"));

static FOREIGN_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(True|TRUE|False|FALSE|None|NONE|Null|NULL)\b")
        .expect("literal pattern is valid")
});

/// Repairs the formatting defects models commonly wrap around a JSON object.
///
/// The passes run in a fixed order and repeat until the text stops changing,
/// so `sanitize(&sanitize(x)) == sanitize(x)` even when removing a comma
/// exposes whitespace or a fence. Nothing is added to the payload beyond
/// lowercase literal spellings.
///
/// Slicing from the first `{` to the last `}` can cut the wrong span when the
/// text holds several objects or braces inside string values.
pub fn sanitize(raw: &str) -> String {
    let mut current = sanitize_once(raw);
    loop {
        // every pass shortens the text or only lowercases literals
        let next = sanitize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_once(raw: &str) -> String {
    let unfenced = strip_code_fences(raw);
    let sliced = slice_outer_object(unfenced);
    let without_commas = remove_trailing_commas(sliced);
    normalize_literals(&without_commas)
}

pub(crate) fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    loop {
        let before = text.len();

        if let Some(rest) = text.strip_prefix(FENCE) {
            // drop the language tag, e.g. ```json
            let tag_len = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '+')))
                .unwrap_or(rest.len());
            text = rest[tag_len..].trim();
        }
        if let Some(rest) = text.strip_suffix(FENCE) {
            text = rest.trim();
        }

        if text.len() == before {
            return text;
        }
    }
}

pub(crate) fn slice_outer_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

pub(crate) fn remove_trailing_commas(text: &str) -> String {
    let mut current = text.to_string();
    // ",,}" only collapses one comma per pass
    while TRAILING_COMMA.is_match(&current) {
        current = TRAILING_COMMA.replace_all(&current, "$1").into_owned();
    }
    current
}

pub(crate) fn normalize_literals(text: &str) -> String {
    FOREIGN_LITERAL
        .replace_all(text, |caps: &Captures| match &caps[1] {
            "True" | "TRUE" => "true",
            "False" | "FALSE" => "false",
            _ => "null",
        })
        .into_owned()
}
