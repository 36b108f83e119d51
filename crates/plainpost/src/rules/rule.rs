//! Rule and Filter types for HTML conversion.

use plainpost_core::Style;

use crate::node::Node;

/// Type alias for predicate functions
pub type PredicateFn = Box<dyn Fn(&Node) -> bool + Send + Sync>;

/// What a matched element contributes to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Add an inline style to everything inside
    Style(Style),
    /// Turn the content into a link to the element's `href`
    Link,
    /// Start a paragraph block
    Paragraph,
    /// Contain list items; `ordered` picks their numbering
    List { ordered: bool },
    /// Start a bullet or ordered block, depending on the enclosing list
    ListItem,
    /// End the current block
    LineBreak,
    /// Emit an empty line
    Separator,
    /// Drop the element and its content
    Skip,
}

/// A filter determines which elements a rule applies to
pub enum Filter {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match elements of one tag that also satisfy a predicate
    Predicate { tag: String, predicate: PredicateFn },
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_lowercase())
    }

    /// Create a filter for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    /// Create a filter with a predicate, scoped to `tag`
    pub fn predicate<F>(tag: &str, f: F) -> Self
    where
        F: Fn(&Node) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate {
            tag: tag.to_lowercase(),
            predicate: Box::new(f),
        }
    }

    /// Check if this filter matches an element
    pub fn matches(&self, node: &Node) -> bool {
        let tag = node.tag_name();
        match self {
            Filter::TagName(t) => tag == t,
            Filter::TagNames(tags) => tags.iter().any(|t| t == tag),
            Filter::Predicate { tag: t, predicate } => tag == t && predicate(node),
        }
    }

    /// Whether this filter can ever match elements named `tag`
    pub fn names(&self, tag: &str) -> bool {
        match self {
            Filter::TagName(t) | Filter::Predicate { tag: t, .. } => t == tag,
            Filter::TagNames(tags) => tags.iter().any(|t| t == tag),
        }
    }
}

/// A rule maps matched HTML elements to a document effect
pub struct Rule {
    /// Filter to determine which elements this rule applies to
    pub filter: Filter,
    pub effect: Effect,
}

impl Rule {
    pub fn new(filter: Filter, effect: Effect) -> Self {
        Self { filter, effect }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag(tag: &str, effect: Effect) -> Self {
        Self::new(Filter::tag(tag), effect)
    }

    /// Create a rule that matches multiple tags
    pub fn for_tags(tags: &[&str], effect: Effect) -> Self {
        Self::new(Filter::tags(tags), effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filter_is_case_insensitive() {
        let filter = Filter::tag("STRONG");
        assert!(filter.matches(&Node::element("strong")));
        assert!(filter.names("strong"));
    }

    #[test]
    fn test_predicate_filter_is_scoped_to_tag() {
        let filter = Filter::predicate("span", |node| node.has_attr("data-bold"));
        assert!(filter.matches(&Node::element_with_attrs("span", vec![("data-bold", "")])));
        assert!(!filter.matches(&Node::element("span")));
        assert!(!filter.matches(&Node::element_with_attrs("div", vec![("data-bold", "")])));
        assert!(filter.names("span"));
    }
}
