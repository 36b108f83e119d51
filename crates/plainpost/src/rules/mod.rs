//! Rule system for HTML conversion.
//!
//! Maps elements to effects: inline styles, links, and block structure.
//! Tags without a rule are transparent and only their text survives.

mod editor;
mod rule;

pub use editor::editor_rules;
pub use rule::{Effect, Filter, PredicateFn, Rule};

use indexmap::IndexMap;

use crate::node::Node;
use crate::utilities::is_void;

/// Collection of rules for conversion
pub struct Rules {
    /// Custom rules added by the user (checked first)
    custom_rules: IndexMap<String, Rule>,
    /// Skip filters (drop element and content)
    skip_rules: Vec<Filter>,
    /// Built-in editor rules
    editor_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in editor rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            skip_rules: Vec::new(),
            editor_rules: editor_rules(),
        }
    }

    /// Add a custom rule, replacing any earlier rule with the same key
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Add a skip filter
    pub fn skip(&mut self, filter: Filter) {
        self.skip_rules.push(filter);
    }

    /// Effects of every rule matching `node`.
    ///
    /// Skip filters win outright. When any custom rule matches, the
    /// built-in rules are not consulted for this node.
    pub fn effects_for(&self, node: &Node) -> Vec<Effect> {
        if self.skip_rules.iter().any(|f| f.matches(node)) {
            return vec![Effect::Skip];
        }

        let custom: Vec<Effect> = self
            .custom_rules
            .values()
            .filter(|r| r.filter.matches(node))
            .map(|r| r.effect)
            .collect();
        if !custom.is_empty() {
            return custom;
        }

        self.editor_rules
            .iter()
            .filter(|r| r.filter.matches(node))
            .map(|r| r.effect)
            .collect()
    }

    /// Whether `tag` must be explicitly closed in input markup.
    ///
    /// True for every non-void tag some rule or skip filter names.
    pub fn is_tracked(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        if is_void(&tag) {
            return false;
        }
        self.custom_rules.values().any(|r| r.filter.names(&tag))
            || self.editor_rules.iter().any(|r| r.filter.names(&tag))
            || self.skip_rules.iter().any(|f| f.names(&tag))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
