//! Hashtag detection
//!
//! Hashtags are tagged, never rewritten. Highlighting them is up to
//! whoever displays the text.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Hashtag;

static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[A-Za-z0-9_]+").unwrap());

/// Byte ranges of hashtags in `text`.
///
/// A `#` directly after a letter or digit (`C#`, `a#b`) does not start a
/// tag. A trailing `_` is left out only when it closes an italic span
/// opened earlier on the same line (`_#launch_`).
pub fn hashtag_ranges(text: &str) -> Vec<Range<usize>> {
    HASHTAG
        .find_iter(text)
        .filter(|m| {
            text[..m.start()]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric())
        })
        .filter_map(|m| {
            let mut end = m.end();
            if m.as_str().ends_with('_') && in_italic_span(text, m.start()) {
                end -= 1;
            }
            (end - m.start() > 1).then(|| m.start()..end)
        })
        .collect()
}

/// Whether an italic marker is open at `pos`
fn in_italic_span(text: &str, pos: usize) -> bool {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..pos].matches('_').count() % 2 == 1
}

/// Hashtags in `text`
pub fn find_hashtags(text: &str) -> Vec<Hashtag> {
    hashtag_ranges(text)
        .into_iter()
        .map(|range| Hashtag {
            tag: text[range.clone()].to_string(),
            range,
        })
        .collect()
}
