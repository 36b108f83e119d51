//! DOM tree to document conversion.
//!
//! Walks the node tree once, asking the rule table what each element
//! means. Inline effects accumulate in a `Context` passed down the tree;
//! block effects open and close blocks on the `Converter`.

use plainpost_core::{Block, BlockKind, Document, Segment, Styles};

use crate::node::{Node, NodeType};
use crate::rules::{Effect, Rules};
use crate::utilities::{clean_attribute, collapse_whitespace, encode_whitespace};

/// Convert a parsed tree into a document
pub fn convert(root: &Node, rules: &Rules) -> Document {
    let mut converter = Converter::new(rules);
    converter.walk(root, &Context::default());
    converter.finish()
}

/// Inline state inherited from ancestors
#[derive(Debug, Clone, Default)]
struct Context {
    styles: Styles,
    link: Option<String>,
    /// Inside an element with a block effect
    in_block: bool,
    /// Inside `pre`, where newlines are kept
    in_pre: bool,
}

/// The block currently receiving text
struct Open {
    block: Block,
    /// Opened by an element rather than by stray text or a line break
    explicit: bool,
}

struct Converter<'a> {
    rules: &'a Rules,
    blocks: Vec<Block>,
    open: Option<Open>,
    /// Enclosing lists, innermost last; `true` for ordered
    lists: Vec<bool>,
    /// Segments written so far that carry a link
    link_segments: usize,
}

impl<'a> Converter<'a> {
    fn new(rules: &'a Rules) -> Self {
        Self {
            rules,
            blocks: Vec::new(),
            open: None,
            lists: Vec::new(),
            link_segments: 0,
        }
    }

    fn walk(&mut self, node: &Node, ctx: &Context) {
        match node.node_type {
            NodeType::Text => {
                if let Some(value) = &node.value {
                    self.text(value, ctx);
                }
            }
            NodeType::Element => self.element(node, ctx),
        }
    }

    fn element(&mut self, node: &Node, ctx: &Context) {
        let effects = self.rules.effects_for(node);
        if effects.contains(&Effect::Skip) {
            return;
        }

        let mut inner = ctx.clone();
        let mut block_kind = None;
        let mut lists_pushed = 0;

        for effect in effects {
            match effect {
                Effect::Style(style) => inner.styles.insert(style),
                Effect::Link => {
                    if let Some(href) = clean_attribute(node.attr("href")) {
                        inner.link = Some(encode_whitespace(&href));
                    }
                }
                Effect::Paragraph => {
                    block_kind.get_or_insert(BlockKind::Paragraph);
                    if node.tag_name() == "pre" {
                        inner.in_pre = true;
                    }
                }
                Effect::List { ordered } => {
                    self.lists.push(ordered);
                    lists_pushed += 1;
                }
                Effect::ListItem => {
                    let kind = match self.lists.last() {
                        Some(true) => BlockKind::Ordered,
                        _ => BlockKind::Bullet,
                    };
                    block_kind = Some(kind);
                }
                Effect::LineBreak => self.line_break(),
                Effect::Separator => self.separator(),
                Effect::Skip => {}
            }
        }

        let opened = match block_kind {
            Some(kind) => {
                inner.in_block = true;
                self.open_block(kind)
            }
            None => false,
        };

        let links_before = self.link_segments;
        for child in node.children() {
            self.walk(child, &inner);
        }

        // A link without text still shows its URL
        if inner.link.is_some() && inner.link != ctx.link && self.link_segments == links_before {
            self.current().push(Segment {
                text: String::new(),
                styles: inner.styles,
                link: inner.link.clone(),
            });
        }

        if opened {
            self.close_block();
        }
        for _ in 0..lists_pushed {
            self.lists.pop();
        }
    }

    fn text(&mut self, value: &str, ctx: &Context) {
        if ctx.in_pre {
            for (i, line) in value.split('\n').enumerate() {
                if i > 0 {
                    self.line_break();
                }
                self.append(line.trim_end_matches('\r'), ctx);
            }
            return;
        }

        if ctx.in_block {
            self.append(&collapse_whitespace(value), ctx);
            return;
        }

        // Loose text between blocks
        if self.open.is_none() && value.trim().is_empty() {
            return;
        }
        for (i, line) in value.split('\n').enumerate() {
            if i > 0 {
                if let Some(open) = self.open.take() {
                    self.blocks.push(open.block);
                }
                self.open = Some(Open {
                    block: Block::paragraph(Vec::new()),
                    explicit: false,
                });
            }
            self.append(&collapse_whitespace(line), ctx);
        }
    }

    fn append(&mut self, text: &str, ctx: &Context) {
        let at_line_start = self
            .open
            .as_ref()
            .and_then(|open| {
                open.block
                    .segments
                    .iter()
                    .rev()
                    .find_map(|segment| segment.text.chars().last())
            })
            .map_or(true, char::is_whitespace);

        let text = if at_line_start && !ctx.in_pre {
            text.trim_start()
        } else {
            text
        };
        if text.is_empty() {
            return;
        }

        self.current().push(Segment {
            text: text.to_string(),
            styles: ctx.styles,
            link: ctx.link.clone(),
        });
        if ctx.link.is_some() {
            self.link_segments += 1;
        }
    }

    /// The open block, opening an implicit paragraph if there is none
    fn current(&mut self) -> &mut Block {
        &mut self
            .open
            .get_or_insert_with(|| Open {
                block: Block::paragraph(Vec::new()),
                explicit: false,
            })
            .block
    }

    /// Start a block; `false` when an enclosing list item is reused instead
    fn open_block(&mut self, kind: BlockKind) -> bool {
        if let Some(open) = &self.open {
            let in_item = matches!(open.block.kind, BlockKind::Bullet | BlockKind::Ordered);
            if open.explicit && in_item && kind == BlockKind::Paragraph && open.block.is_blank() {
                return false;
            }
        }

        if let Some(open) = self.open.take() {
            if !open.block.is_blank() {
                self.blocks.push(open.block);
            }
        }
        self.open = Some(Open {
            block: Block::new(kind, Vec::new()),
            explicit: true,
        });
        true
    }

    fn close_block(&mut self) {
        if let Some(open) = self.open.take() {
            if open.explicit || !open.block.is_blank() {
                self.blocks.push(open.block);
            }
        }
    }

    /// End the current block, blank or not; text continues in a paragraph
    fn line_break(&mut self) {
        let block = self
            .open
            .take()
            .map_or_else(|| Block::paragraph(Vec::new()), |open| open.block);
        self.blocks.push(block);
        self.open = Some(Open {
            block: Block::paragraph(Vec::new()),
            explicit: false,
        });
    }

    fn separator(&mut self) {
        self.close_block();
        self.blocks.push(Block::paragraph(Vec::new()));
    }

    fn finish(mut self) -> Document {
        self.close_block();

        let mut blocks = self.blocks;
        let first = blocks.iter().position(|b| !b.is_blank()).unwrap_or(blocks.len());
        blocks.drain(..first);
        while blocks.last().is_some_and(Block::is_blank) {
            blocks.pop();
        }
        Document::new(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;
    use plainpost_core::Style;

    fn blocks(html: &str) -> Vec<Block> {
        convert(&parse_html(html), &Rules::new()).blocks
    }

    fn texts(html: &str) -> Vec<String> {
        blocks(html)
            .iter()
            .map(|b| b.segments.iter().map(|s| s.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_paragraph_with_bold() {
        assert_eq!(
            blocks("<p>Hello <b>World</b></p>"),
            vec![Block::paragraph(vec![
                Segment::plain("Hello "),
                Segment::styled("World", &[Style::Bold]),
            ])]
        );
    }

    #[test]
    fn test_list_kinds() {
        let kinds: Vec<_> = blocks("<ol><li>a</li><li>b</li></ol><p>x</p><ul><li>c</li></ul>")
            .iter()
            .map(|b| b.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Ordered,
                BlockKind::Ordered,
                BlockKind::Paragraph,
                BlockKind::Bullet
            ]
        );
    }

    #[test]
    fn test_paragraph_inside_list_item() {
        assert_eq!(
            blocks("<ul><li><p>a</p></li></ul>"),
            vec![Block::bullet(vec![Segment::plain("a")])]
        );
    }

    #[test]
    fn test_nested_lists_flatten() {
        assert_eq!(
            blocks("<ul><li>a<ol><li>b</li></ol></li></ul>"),
            vec![
                Block::bullet(vec![Segment::plain("a")]),
                Block::ordered(vec![Segment::plain("b")]),
            ]
        );
    }

    #[test]
    fn test_line_break() {
        assert_eq!(texts("<p>a<br>b</p>"), vec!["a", "b"]);
        assert_eq!(texts("<p>a<br><br>b</p>"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_empty_paragraphs() {
        assert_eq!(texts("<p>a</p><p></p><p>b</p>"), vec!["a", "", "b"]);
        assert_eq!(texts("<p></p><p>a</p><p><br></p>"), vec!["a"]);
    }

    #[test]
    fn test_separator() {
        assert_eq!(texts("<p>a</p><hr><p>b</p>"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_unknown_tags_are_transparent() {
        assert_eq!(texts("<foo>x</foo>"), vec!["x"]);
    }

    #[test]
    fn test_loose_text_lines() {
        assert_eq!(texts("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(texts("<p>x</p>\n<p>y</p>"), vec!["x", "y"]);
    }

    #[test]
    fn test_whitespace_collapses_in_blocks() {
        assert_eq!(texts("<p>  a \n  b </p>"), vec!["a b "]);
        assert_eq!(texts("<p><b>a </b> b</p>"), vec!["a b"]);
    }

    #[test]
    fn test_pre_keeps_lines() {
        assert_eq!(texts("<pre>a\n  b</pre>"), vec!["a", "  b"]);
    }

    #[test]
    fn test_link() {
        assert_eq!(
            blocks(r#"<p><a href=" https://x.com ">site</a></p>"#),
            vec![Block::paragraph(vec![Segment::link("site", "https://x.com")])]
        );
    }

    #[test]
    fn test_empty_link_keeps_url() {
        assert_eq!(
            blocks(r#"<p><a href="https://x.com"></a></p>"#),
            vec![Block::paragraph(vec![Segment::link("", "https://x.com")])]
        );
    }

    #[test]
    fn test_link_around_block() {
        assert_eq!(
            blocks(r#"<a href="https://x.com"><p>x</p></a>"#),
            vec![Block::paragraph(vec![Segment::link("x", "https://x.com")])]
        );
    }

    #[test]
    fn test_link_whitespace_is_encoded() {
        assert_eq!(
            blocks(r#"<p><a href="https://x.com/a b">site</a></p>"#),
            vec![Block::paragraph(vec![Segment::link("site", "https://x.com/a%20b")])]
        );
    }

    #[test]
    fn test_link_without_href_is_text() {
        assert_eq!(texts("<p><a>site</a></p>"), vec!["site"]);
    }

    #[test]
    fn test_skipped_content() {
        assert_eq!(texts("<p>a<script>var x;</script></p>"), vec!["a"]);
    }

    #[test]
    fn test_heading_is_bold_paragraph() {
        assert_eq!(
            blocks("<h2>Title</h2>"),
            vec![Block::paragraph(vec![Segment::styled("Title", &[Style::Bold])])]
        );
    }

    #[test]
    fn test_contenteditable_span() {
        assert_eq!(
            blocks(r#"<div><span style="font-weight: 700">x</span></div>"#),
            vec![Block::paragraph(vec![Segment::styled("x", &[Style::Bold])])]
        );
    }
}
