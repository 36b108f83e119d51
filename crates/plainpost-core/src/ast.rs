//! Document model
//!
//! A document is a flat sequence of line-level blocks, each made of
//! segments: runs of text that share one set of inline styles. Both the
//! HTML front end and the marked-text reader produce this model, and the
//! normalizer consumes it.

use std::ops::Range;

/// An inline style flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
}

impl Style {
    /// Nesting order, outermost first
    pub const PRECEDENCE: [Style; 5] = [
        Style::Bold,
        Style::Italic,
        Style::Underline,
        Style::Strikethrough,
        Style::Code,
    ];

    fn bit(self) -> u8 {
        match self {
            Style::Bold => 1,
            Style::Italic => 1 << 1,
            Style::Underline => 1 << 2,
            Style::Strikethrough => 1 << 3,
            Style::Code => 1 << 4,
        }
    }
}

/// A set of inline styles.
///
/// Adding a style that is already present changes nothing, which is how
/// nested identical styles (bold inside bold) collapse to one marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Styles(u8);

impl Styles {
    /// The empty set
    pub const fn none() -> Self {
        Styles(0)
    }

    pub fn contains(&self, style: Style) -> bool {
        self.0 & style.bit() != 0
    }

    pub fn insert(&mut self, style: Style) {
        self.0 |= style.bit();
    }

    /// Copy of this set with `style` added
    pub fn with(mut self, style: Style) -> Self {
        self.insert(style);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Styles in precedence order
    pub fn iter(&self) -> impl Iterator<Item = Style> + '_ {
        Style::PRECEDENCE.into_iter().filter(|s| self.contains(*s))
    }
}

impl FromIterator<Style> for Styles {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        let mut styles = Styles::none();
        for style in iter {
            styles.insert(style);
        }
        styles
    }
}

/// A run of text sharing the same inline styles
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    pub text: String,
    pub styles: Styles,
    /// Target URL when this segment is a link
    pub link: Option<String>,
}

impl Segment {
    /// Unstyled text
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: Styles::none(),
            link: None,
        }
    }

    pub fn styled(text: impl Into<String>, styles: &[Style]) -> Self {
        Self {
            text: text.into(),
            styles: styles.iter().copied().collect(),
            link: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: Styles::none(),
            link: Some(url.into()),
        }
    }

    /// Whether `other` can be folded into this segment without changing output
    pub fn continues(&self, other: &Segment) -> bool {
        self.styles == other.styles && self.link == other.link
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.link.is_none()
    }
}

/// Line-level block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    #[default]
    Paragraph,
    Bullet,
    Ordered,
}

/// A line-level unit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub kind: BlockKind,
    pub segments: Vec<Segment>,
}

impl Block {
    pub fn new(kind: BlockKind, segments: Vec<Segment>) -> Self {
        Self { kind, segments }
    }

    pub fn paragraph(segments: Vec<Segment>) -> Self {
        Self::new(BlockKind::Paragraph, segments)
    }

    pub fn bullet(segments: Vec<Segment>) -> Self {
        Self::new(BlockKind::Bullet, segments)
    }

    pub fn ordered(segments: Vec<Segment>) -> Self {
        Self::new(BlockKind::Ordered, segments)
    }

    /// Append a segment, merging it into the previous one when styles match
    pub fn push(&mut self, segment: Segment) {
        if segment.text.is_empty() && segment.link.is_none() {
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            if last.continues(&segment) {
                last.text.push_str(&segment.text);
                return;
            }
        }
        self.segments.push(segment);
    }

    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|s| s.is_blank())
    }
}

/// An ordered sequence of blocks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A hashtag found in normalized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hashtag {
    /// Tag text including the leading `#`
    pub tag: String,
    /// Byte range in [`PlainText::text`]
    pub range: Range<usize>,
}

/// A style that has no plain-text marker, kept as a side annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub style: Style,
    /// Byte range in [`PlainText::text`]
    pub range: Range<usize>,
}

/// Result of normalization
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlainText {
    pub text: String,
    pub hashtags: Vec<Hashtag>,
    pub annotations: Vec<Annotation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_collapse() {
        let mut styles = Styles::none();
        styles.insert(Style::Bold);
        styles.insert(Style::Bold);
        assert_eq!(styles.iter().collect::<Vec<_>>(), vec![Style::Bold]);
    }

    #[test]
    fn test_styles_iterate_in_precedence_order() {
        let styles: Styles = [Style::Code, Style::Italic, Style::Bold].into_iter().collect();
        assert_eq!(
            styles.iter().collect::<Vec<_>>(),
            vec![Style::Bold, Style::Italic, Style::Code]
        );
    }

    #[test]
    fn test_block_push_merges_matching_segments() {
        let mut block = Block::paragraph(vec![]);
        block.push(Segment::styled("Hello ", &[Style::Bold]));
        block.push(Segment::styled("World", &[Style::Bold]));
        block.push(Segment::plain("!"));
        assert_eq!(block.segments.len(), 2);
        assert_eq!(block.segments[0].text, "Hello World");
    }

    #[test]
    fn test_block_push_keeps_links_apart() {
        let mut block = Block::paragraph(vec![]);
        block.push(Segment::link("a", "https://a.example"));
        block.push(Segment::link("b", "https://b.example"));
        assert_eq!(block.segments.len(), 2);
    }

    #[test]
    fn test_blank_block() {
        let block = Block::paragraph(vec![Segment::plain("  ")]);
        assert!(block.is_blank());
        assert!(!Block::paragraph(vec![Segment::link("", "https://x.com")]).is_blank());
    }
}
