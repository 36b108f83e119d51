//! Lightweight DOM node tree.
//!
//! HTML parsing produces this structure; the converter walks it to build a
//! document. Tag names are stored lowercase.

/// Node kinds the converter cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
}

/// A DOM node: an element with attributes and children, or a text node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub node_type: NodeType,

    /// Lowercase tag name, `#text` for text nodes
    pub tag: String,

    /// Text content for text nodes
    pub value: Option<String>,

    /// Attributes in source order
    pub attributes: Vec<(String, String)>,

    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            tag: tag_name.to_lowercase(),
            value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        node.attributes = attrs
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v.to_string()))
            .collect();
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            tag: "#text".to_string(),
            value: Some(content.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.attributes
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.value.clone().unwrap_or_default(),
            NodeType::Element => self.children().map(|c| c.text_content()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("DIV");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let node = Node::element_with_attrs("a", vec![("HREF", "https://example.com"), ("title", "Example")]);
        assert_eq!(node.attr("href"), Some("https://example.com"));
        assert_eq!(node.attr("Title"), Some("Example"));
        assert!(!node.has_attr("class"));
    }

    #[test]
    fn test_children() {
        let mut parent = Node::element("p");
        parent.add_child(Node::text("Hello"));
        parent.add_child(Node::element("b"));
        parent.add_child(Node::text("World"));

        assert_eq!(parent.children().count(), 3);
        assert_eq!(parent.element_children().count(), 1);
    }

    #[test]
    fn test_text_content() {
        let mut p = Node::element("p");
        p.add_child(Node::text("Hello "));
        let mut b = Node::element("b");
        b.add_child(Node::text("World"));
        p.add_child(b);

        assert_eq!(p.text_content(), "Hello World");
    }
}
