//! Inline `#tag` extraction from annotation text.
//!
//! A tag starts at `#` and runs to a terminator:
//!
//! - `(#grouped token)` or `#(grouped token)`: when the `#` sits next to an
//!   opening delimiter (`'`, `(`, `[`, `{`, `"`, `*`), the tag runs to the
//!   matching close. The delimiter before the `#` is checked first.
//! - `#plain`: otherwise the tag ends at whitespace, `.`, or the next `#`.
//!
//! A tag with no terminator runs to the end of the text. Empty tags are dropped.
//!
//! ```text
//! "see #foo.bar"          -> ["foo"]
//! "#(grouped token) rest" -> ["grouped token"]
//! "#a#b"                  -> ["a", "b"]
//! ```

use std::ops::Range;

const HASH: u8 = b'#';

const CUTOFFS: [u8; 6] = [b' ', b'\t', b'\n', b'\r', 0x0b, b'.'];

fn closing(open: u8) -> Option<u8> {
    match open {
        b'\'' => Some(b'\''),
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        b'"' => Some(b'"'),
        b'*' => Some(b'*'),
        _ => None,
    }
}

/// Extract every tag in `text`, in order of appearance, duplicates kept.
pub fn extract(text: &str) -> Vec<String> {
    spans(text)
        .into_iter()
        .map(|span| text[span].to_string())
        .collect()
}

/// Byte ranges of every tag body in `text`, excluding the `#` and delimiters.
///
/// Renderers use these to highlight tags in place.
pub fn spans(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(offset) = bytes[pos..].iter().position(|&b| b == HASH) {
        let hash = pos + offset;
        let (span, resume) = token_at(bytes, hash);
        if !span.is_empty() {
            spans.push(span);
        }
        pos = resume;
    }

    spans
}

/// Locate the tag body for the `#` at `hash`, and where scanning resumes.
///
/// All delimiters are ASCII so every returned index is a char boundary.
fn token_at(bytes: &[u8], hash: usize) -> (Range<usize>, usize) {
    let len = bytes.len();

    let before = hash.checked_sub(1).and_then(|i| closing(bytes[i]));
    let paired = match before {
        Some(close) => Some((hash + 1, close)),
        None => bytes
            .get(hash + 1)
            .and_then(|&b| closing(b))
            .map(|close| (hash + 2, close)),
    };

    if let Some((start, close)) = paired {
        let start = start.min(len);
        let end = find_from(bytes, start, |b| b == close).unwrap_or(len);
        return (start..end, (end + 1).min(len));
    }

    let start = hash + 1;
    let end = find_from(bytes, start, |b| b == HASH || CUTOFFS.contains(&b)).unwrap_or(len);
    // A `#` terminator opens the next tag, so scanning resumes on it.
    let resume = if end < len && bytes[end] == HASH {
        end
    } else {
        (end + 1).min(len)
    };
    (start..end, resume)
}

fn find_from(bytes: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> Option<usize> {
    bytes
        .get(start..)?
        .iter()
        .position(|&b| pred(b))
        .map(|i| start + i)
}
