//! Document normalization
//!
//! Turns a document into canonical plain text: one line per block, block
//! prefixes for list items, and inline styles spelled with the marker
//! table in [`Options::marker`].

use crate::ast::{Annotation, Block, BlockKind, Document, PlainText, Segment, Style};
use crate::error::ValidationError;
use crate::hashtag::{find_hashtags, hashtag_ranges};
use crate::options::{Options, Rendering};
use crate::unicode::Face;

/// Styles reported as annotations instead of markers
const ANNOTATED: [Style; 2] = [Style::Underline, Style::Strikethrough];

/// Normalize a document to plain text
pub fn normalize(document: &Document, options: &Options) -> Result<PlainText, ValidationError> {
    check_segments(document)?;

    let mut text = String::with_capacity(256);
    let mut annotations = Vec::new();
    // Position within the current run of ordered blocks
    let mut ordinal = 0u32;

    for (i, block) in document.blocks.iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        let line_start = text.len();

        match block.kind {
            BlockKind::Ordered => {
                ordinal += 1;
                text.push_str(&ordinal.to_string());
                text.push_str(". ");
            }
            BlockKind::Bullet => {
                ordinal = 0;
                text.push_str(&options.bullet_prefix());
            }
            BlockKind::Paragraph => ordinal = 0,
        }

        let rendered = match options.rendering {
            Rendering::Markers => render_markers(block, options),
            Rendering::Unicode => render_unicode(block),
        };
        let base = text.len();
        text.push_str(&rendered.text);

        let line_end = line_start + text[line_start..].trim_end().len();
        text.truncate(line_end);

        annotations.extend(rendered.annotations.into_iter().filter_map(|a| {
            let start = base + a.range.start;
            let end = (base + a.range.end).min(line_end);
            (start < end).then_some(Annotation {
                style: a.style,
                range: start..end,
            })
        }));
    }

    let hashtags = find_hashtags(&text);
    Ok(PlainText {
        text,
        hashtags,
        annotations,
    })
}

/// Reject segment sequences that cannot be laid out one block per line
fn check_segments(document: &Document) -> Result<(), ValidationError> {
    for (b, block) in document.blocks.iter().enumerate() {
        for (s, segment) in block.segments.iter().enumerate() {
            if segment.text.contains(['\n', '\r']) {
                return Err(ValidationError::MultilineSegment {
                    block: b,
                    segment: s,
                });
            }
            if let Some(url) = &segment.link {
                if url.is_empty() || url.contains(char::is_whitespace) {
                    return Err(ValidationError::InvalidLink {
                        block: b,
                        url: url.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Rendered text with annotations relative to its own start
#[derive(Debug, Default)]
struct Rendered {
    text: String,
    annotations: Vec<Annotation>,
}

impl Rendered {
    fn append(&mut self, other: Rendered) {
        let base = self.text.len();
        self.text.push_str(&other.text);
        self.annotations
            .extend(other.annotations.into_iter().map(|a| Annotation {
                style: a.style,
                range: base + a.range.start..base + a.range.end,
            }));
    }

    /// Wrap in `prefix`/`suffix`, keeping edge whitespace outside the markers
    fn wrap(self, prefix: &str, suffix: &str) -> Rendered {
        let lead = self.text.len() - self.text.trim_start().len();
        let core_end = self.text.trim_end().len();

        let mut text = String::with_capacity(self.text.len() + prefix.len() + suffix.len());
        text.push_str(&self.text[..lead]);
        text.push_str(prefix);
        text.push_str(&self.text[lead..core_end]);
        text.push_str(suffix);
        text.push_str(&self.text[core_end..]);

        let shift = |pos: usize, inclusive: bool| {
            let past = |edge: usize| if inclusive { pos >= edge } else { pos > edge };
            let mut out = pos;
            if past(lead) {
                out += prefix.len();
            }
            if past(core_end) {
                out += suffix.len();
            }
            out
        };

        let annotations = self
            .annotations
            .into_iter()
            .map(|a| Annotation {
                style: a.style,
                range: shift(a.range.start, true)..shift(a.range.end, false),
            })
            .collect();

        Rendered { text, annotations }
    }
}

/// What follows a segment's text: nothing, or the URL closing a link run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail<'a> {
    None,
    /// ` (url)` after a run with visible text
    Paren(&'a str),
    /// The bare URL for a run without visible text
    Bare(&'a str),
}

/// A segment paired with its tail
#[derive(Debug, Clone, Copy)]
struct Piece<'a> {
    segment: &'a Segment,
    tail: Tail<'a>,
}

/// Pair segments with tails.
///
/// Consecutive segments linking to the same URL are one link: the URL is
/// written once, after the last of them.
fn pieces(block: &Block) -> Vec<Piece<'_>> {
    let mut out = Vec::with_capacity(block.segments.len());
    for run in block.segments.chunk_by(|a, b| a.link == b.link) {
        let blank = run.iter().all(|s| s.text.trim().is_empty());
        let last = run.len() - 1;
        for (i, segment) in run.iter().enumerate() {
            let tail = match &segment.link {
                Some(url) if i == last && blank => Tail::Bare(url),
                Some(url) if i == last => Tail::Paren(url),
                _ => Tail::None,
            };
            out.push(Piece { segment, tail });
        }
    }
    out
}

fn render_markers(block: &Block, options: &Options) -> Rendered {
    render_level(&pieces(block), 0, options)
}

/// Render segments from one precedence level inward.
///
/// Consecutive segments that share the level's style form one run and get
/// a single marker pair, so `**_a_ b**` stays one bold span.
fn render_level(pieces: &[Piece<'_>], level: usize, options: &Options) -> Rendered {
    let Some(&style) = Style::PRECEDENCE.get(level) else {
        return render_leaves(pieces);
    };
    let Some((prefix, suffix)) = options.marker(style) else {
        return render_level(pieces, level + 1, options);
    };

    let mut out = Rendered::default();
    for run in pieces.chunk_by(|a, b| {
        a.segment.styles.contains(style) == b.segment.styles.contains(style)
    }) {
        let inner = render_level(run, level + 1, options);
        let styled = run[0].segment.styles.contains(style);

        if styled && !inner.text.trim().is_empty() && !is_wrapped(inner.text.trim(), prefix, suffix) {
            out.append(inner.wrap(prefix, suffix));
        } else {
            out.append(inner);
        }
    }
    out
}

/// Whether `text` already carries this marker pair
fn is_wrapped(text: &str, prefix: &str, suffix: &str) -> bool {
    text.len() > prefix.len() + suffix.len() && text.starts_with(prefix) && text.ends_with(suffix)
}

fn render_leaves(pieces: &[Piece<'_>]) -> Rendered {
    let mut out = Rendered::default();
    for piece in pieces {
        let start = out.text.len();
        push_visible(*piece, &mut out.text, |s, text| text.push_str(s));
        annotate(piece.segment, start, out.text.len(), &mut out.annotations);
    }
    out
}

fn annotate(segment: &Segment, start: usize, end: usize, annotations: &mut Vec<Annotation>) {
    if start == end {
        return;
    }
    for style in ANNOTATED {
        if segment.styles.contains(style) {
            annotations.push(Annotation {
                style,
                range: start..end,
            });
        }
    }
}

/// Write a piece's visible text, routing the styleable part through `emit`.
///
/// The URL of a link run is never styled.
fn push_visible<F>(piece: Piece<'_>, out: &mut String, mut emit: F)
where
    F: FnMut(&str, &mut String),
{
    let text = piece.segment.text.as_str();
    match piece.tail {
        Tail::None => emit(text, out),
        Tail::Bare(url) => {
            out.push_str(text);
            out.push_str(url);
        }
        Tail::Paren(url) => {
            let trimmed = text.trim();
            let lead = if trimmed.is_empty() {
                0
            } else {
                text.len() - text.trim_start().len()
            };
            let core_end = lead + trimmed.len();
            out.push_str(&text[..lead]);
            emit(trimmed, out);
            out.push_str(" (");
            out.push_str(url);
            out.push(')');
            out.push_str(&text[core_end..]);
        }
    }
}

/// Render with Unicode faces; hashtags are left in ASCII so they stay tags
fn render_unicode(block: &Block) -> Rendered {
    let pieces = pieces(block);
    let raw: String = pieces.iter().map(|p| raw_visible(*p)).collect();
    let protected = hashtag_ranges(&raw);

    let mut out = Rendered::default();
    // Offset of the current piece in `raw`
    let mut raw_pos = 0;

    for piece in pieces {
        let start = out.text.len();
        let face = Face::for_styles(piece.segment.styles);

        push_visible(piece, &mut out.text, |part, text| {
            let offset = raw_pos + (text.len() - start);
            for (i, c) in part.char_indices() {
                let in_tag = protected.iter().any(|r| r.contains(&(offset + i)));
                match face {
                    Some(face) if !in_tag => text.push(face.apply(c)),
                    _ => text.push(c),
                }
            }
        });

        raw_pos += raw_visible(piece).len();
        annotate(piece.segment, start, out.text.len(), &mut out.annotations);
    }
    out
}

/// A piece's visible text without any styling
fn raw_visible(piece: Piece<'_>) -> String {
    let mut text = String::new();
    push_visible(piece, &mut text, |part, out| out.push_str(part));
    text
}
