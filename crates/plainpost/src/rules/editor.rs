//! Built-in rules for the markup rich-text editors emit.

use plainpost_core::Style;

use super::{Effect, Filter, Rule};
use crate::node::Node;
use crate::utilities::css_property;

/// Create all built-in rules
pub fn editor_rules() -> Vec<Rule> {
    let mut rules = vec![
        Rule::for_tags(&["strong", "b"], Effect::Style(Style::Bold)),
        Rule::for_tags(&["em", "i", "cite"], Effect::Style(Style::Italic)),
        Rule::for_tags(&["u", "ins"], Effect::Style(Style::Underline)),
        Rule::for_tags(&["s", "strike", "del"], Effect::Style(Style::Strikethrough)),
        Rule::for_tags(&["code", "kbd", "samp"], Effect::Style(Style::Code)),
        Rule::for_tag("a", Effect::Link),
        Rule::for_tags(
            &["p", "div", "blockquote", "pre", "h1", "h2", "h3", "h4", "h5", "h6"],
            Effect::Paragraph,
        ),
        // Headings have no plain-text syntax, bold is the closest
        Rule::for_tags(&["h1", "h2", "h3", "h4", "h5", "h6"], Effect::Style(Style::Bold)),
        Rule::for_tag("ul", Effect::List { ordered: false }),
        Rule::for_tag("ol", Effect::List { ordered: true }),
        Rule::for_tag("li", Effect::ListItem),
        Rule::for_tag("br", Effect::LineBreak),
        Rule::for_tag("hr", Effect::Separator),
        Rule::for_tags(&["script", "style", "template", "head", "title"], Effect::Skip),
    ];
    rules.extend(inline_style_rules());
    rules
}

/// `<span style="...">` as produced by contenteditable formatting commands
fn inline_style_rules() -> Vec<Rule> {
    vec![
        span_rule(Style::Bold, |css| {
            css_property(css, "font-weight").is_some_and(is_bold_weight)
        }),
        span_rule(Style::Italic, |css| {
            css_property(css, "font-style").is_some_and(|v| v.eq_ignore_ascii_case("italic"))
        }),
        span_rule(Style::Underline, |css| text_decoration(css, "underline")),
        span_rule(Style::Strikethrough, |css| text_decoration(css, "line-through")),
    ]
}

fn span_rule<F>(style: Style, declares: F) -> Rule
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Rule::new(
        Filter::predicate("span", move |node: &Node| node.attr("style").is_some_and(&declares)),
        Effect::Style(style),
    )
}

fn is_bold_weight(value: &str) -> bool {
    match value.to_ascii_lowercase().as_str() {
        "bold" | "bolder" => true,
        other => other.parse::<u16>().is_ok_and(|w| w >= 600),
    }
}

fn text_decoration(css: &str, line: &str) -> bool {
    ["text-decoration", "text-decoration-line"].iter().any(|prop| {
        css_property(css, prop).is_some_and(|v| {
            v.split_whitespace().any(|part| part.eq_ignore_ascii_case(line))
        })
    })
}
