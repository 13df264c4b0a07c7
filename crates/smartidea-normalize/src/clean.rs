//! Text clean-up applied before and after block extraction.

use once_cell::sync::Lazy;
use regex::Regex;

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```json\s*").expect("valid regex"));
static BARE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```\s*").expect("valid regex"));

/// Remove markdown code fences and wrapping quote characters, then trim.
pub fn strip_fences(raw: &str) -> String {
    let without_json = JSON_FENCE.replace_all(raw, "");
    let without_fences = BARE_FENCE.replace_all(&without_json, "");
    without_fences
        .trim()
        .trim_start_matches(['"', '\''])
        .trim_end_matches(['"', '\''])
        .trim()
        .to_string()
}

/// Remove `//` line comments and `/* */` block comments outside string
/// literals.
///
/// An unterminated block comment swallows the rest of the input.
pub fn strip_comments(block: &str) -> String {
    let mut out = String::with_capacity(block.len());
    let mut chars = block.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                // Keep the newline so line structure survives.
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out.trim().to_string()
}
