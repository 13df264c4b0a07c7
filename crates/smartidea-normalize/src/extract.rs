//! Balanced-block extraction from free text.
//!
//! Model output routinely wraps JSON in prose ("Sure! Here are your
//! ideas: [...] Let me know..."), emits several candidate blocks, or is cut
//! off mid-object. [`extract_blocks`] finds every top-level `[...]` / `{...}`
//! span in one left-to-right pass:
//!
//! - brackets inside string literals are ignored; a backslash inside a string
//!   consumes the next character
//! - `[]` and `{}` depths are tracked independently; a block ends when both
//!   return to zero
//! - a block still open at end of text is dropped together with the rest of
//!   the text
//! - if either depth goes negative the opening bracket was unmatched and
//!   scanning resumes one byte after it
//!
//! All delimiters are ASCII, so scanning bytes keeps every slice on a UTF-8
//! boundary.

/// Iterator over balanced blocks, produced lazily in order of appearance.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    text: &'a str,
    pos: usize,
}

/// Extract balanced `[...]` / `{...}` blocks from `text`.
pub fn extract_blocks(text: &str) -> Blocks<'_> {
    Blocks { text, pos: 0 }
}

enum Scan {
    /// Block closes at this exclusive end offset.
    Complete(usize),
    /// A stray closer drove a depth below zero.
    Unmatched,
    /// End of text reached with the block still open.
    Truncated,
}

fn scan_block(bytes: &[u8], start: usize) -> Scan {
    let mut square: i32 = 0;
    let mut curly: i32 = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        if in_string {
            match b {
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => {
                in_string = true;
                continue;
            }
            b'[' => square += 1,
            b']' => square -= 1,
            b'{' => curly += 1,
            b'}' => curly -= 1,
            _ => continue,
        }

        if square < 0 || curly < 0 {
            return Scan::Unmatched;
        }
        if square == 0 && curly == 0 {
            return Scan::Complete(i + 1);
        }
    }

    Scan::Truncated
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        loop {
            let offset = bytes
                .get(self.pos..)?
                .iter()
                .position(|&b| b == b'[' || b == b'{')?;
            let start = self.pos + offset;

            match scan_block(bytes, start) {
                Scan::Complete(end) => {
                    self.pos = end;
                    return Some(&self.text[start..end]);
                }
                Scan::Unmatched => self.pos = start + 1,
                Scan::Truncated => {
                    self.pos = bytes.len();
                    return None;
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Blocks<'_> {}

/// Byte offset of the first `[` whose block never closes, if the text's
/// first array is truncated.
///
/// Returns `None` when there is no `[` or when the first array closes.
pub(crate) fn truncated_array_start(text: &str) -> Option<usize> {
    let start = text.find('[')?;
    match scan_block(text.as_bytes(), start) {
        Scan::Truncated => Some(start),
        Scan::Complete(_) | Scan::Unmatched => None,
    }
}
