//! HTML parsing support.
//!
//! Parses an HTML fragment with scraper (html5ever) and converts it to the
//! [`Node`] tree the converter walks. Entities are decoded here; comments
//! and processing instructions are dropped.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML fragment into a Node tree.
///
/// Parsing is lenient: tags are not checked here, see
/// [`validate`](crate::validate) for that. The returned root is the
/// fragment's synthetic `html` element.
///
/// # Example
///
/// ```rust
/// use plainpost::parse_html;
///
/// let node = parse_html("<p>Hello <em>World</em></p>");
/// assert_eq!(node.text_content(), "Hello World");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let value = element.value();
    let mut node = Node::element_with_attrs(value.name(), value.attrs().collect());

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}
