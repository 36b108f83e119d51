//! Marked plain text back to a document
//!
//! The inverse of [`normalize`](crate::normalize): reads the markers the
//! normalizer writes so its output can be fed through again without
//! wrapping anything twice. Unmatched markers are left as literal text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Block, BlockKind, Document, Segment, Style, Styles};
use crate::options::Options;

// An empty ordered item is trimmed down to `1.`
static ORDERED_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.(?: |$)").unwrap());

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S+) \((https?://[^\s()]+)\)").unwrap());

/// Read normalized plain text into a document
pub fn normalize_to_document(text: &str, options: &Options) -> Document {
    if text.is_empty() {
        return Document::default();
    }

    let blocks = text
        .split('\n')
        .map(|line| parse_line(line.strip_suffix('\r').unwrap_or(line), options))
        .collect();

    Document::new(blocks)
}

fn parse_line(line: &str, options: &Options) -> Block {
    let bullet = options.bullet_prefix();

    let (kind, content) = if let Some(rest) = line.strip_prefix(bullet.as_str()) {
        (BlockKind::Bullet, rest)
    } else if line == bullet.trim_end() {
        (BlockKind::Bullet, "")
    } else if let Some(m) = ORDERED_PREFIX.find(line) {
        (BlockKind::Ordered, &line[m.end()..])
    } else {
        (BlockKind::Paragraph, line)
    };

    let mut block = Block::new(kind, Vec::new());
    let reader = InlineReader {
        bold: options.bold_marker.as_str(),
    };
    reader.read(content, Styles::none(), &mut block);
    block
}

struct InlineReader<'a> {
    bold: &'a str,
}

impl InlineReader<'_> {
    /// Read `s` into `block`, every segment carrying at least `styles`
    fn read(&self, s: &str, styles: Styles, block: &mut Block) {
        let mut literal_start = 0;
        let mut i = 0;

        while i < s.len() {
            let rest = &s[i..];

            if rest.starts_with('`') {
                if let Some(len) = s[i + 1..].find('`').filter(|&len| len > 0) {
                    push_literal(&s[literal_start..i], styles, block);
                    let code = &s[i + 1..i + 1 + len];
                    block.push(Segment {
                        text: code.to_string(),
                        styles: styles.with(Style::Code),
                        link: None,
                    });
                    i += len + 2;
                    literal_start = i;
                    continue;
                }
            }

            let span = [(self.bold, Style::Bold), ("_", Style::Italic)]
                .into_iter()
                .find_map(|(marker, style)| {
                    if !rest.starts_with(marker) {
                        return None;
                    }
                    let open = i + marker.len();
                    let close = find_closing(s, open, marker)?;
                    let content = &s[open..close];
                    (!content.trim().is_empty()).then_some((marker, style, content, close))
                });

            if let Some((marker, style, content, close)) = span {
                push_literal(&s[literal_start..i], styles, block);
                self.read(content, styles.with(style), block);
                i = close + marker.len();
                literal_start = i;
                continue;
            }

            i += rest.chars().next().map_or(1, char::len_utf8);
        }

        push_literal(&s[literal_start..], styles, block);
    }
}

/// Position of the next `marker` at or after `from`, skipping code spans
fn find_closing(s: &str, from: usize, marker: &str) -> Option<usize> {
    let mut q = from;
    while q < s.len() {
        let rest = &s[q..];
        if rest.starts_with(marker) {
            return Some(q);
        }
        if rest.starts_with('`') {
            if let Some(len) = s[q + 1..].find('`') {
                q += len + 2;
                continue;
            }
        }
        q += rest.chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Push unmarked text, splitting out `text (url)` links
fn push_literal(text: &str, styles: Styles, block: &mut Block) {
    let mut last = 0;
    for caps in LINK.captures_iter(text) {
        let (Some(whole), Some(word), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        block.push(Segment {
            text: text[last..whole.start()].to_string(),
            styles,
            link: None,
        });
        block.push(Segment {
            text: word.as_str().to_string(),
            styles,
            link: Some(url.as_str().to_string()),
        });
        last = whole.end();
    }
    block.push(Segment {
        text: text[last..].to_string(),
        styles,
        link: None,
    });
}
