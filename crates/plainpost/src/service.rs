//! Normalizer - the main entry point for editor HTML to plain text.

use plainpost_core::{
    normalize, normalize_to_document, BoldMarker, Document, Options, PlainText, Rendering,
};
use tracing::debug;

use crate::convert::convert;
use crate::html::parse_html;
use crate::rules::{Filter, Rule, Rules};
use crate::validate::validate;
use crate::{Error, Result};

/// The main service for normalizing editor output
pub struct Normalizer {
    options: Options,
    rules: Rules,
}

impl Normalizer {
    /// Create a new Normalizer with default options
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            rules: Rules::new(),
        }
    }

    /// Create a Normalizer with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Normalize editor HTML with this normalizer's options
    pub fn normalize_html(&self, html: &str) -> Result<PlainText> {
        self.normalize_html_with(html, &self.options)
    }

    /// Normalize editor HTML with per-call options
    pub fn normalize_html_with(&self, html: &str, options: &Options) -> Result<PlainText> {
        let document = self.to_document(html)?;
        let plain = normalize(&document, options)?;
        debug!(
            blocks = document.blocks.len(),
            hashtags = plain.hashtags.len(),
            "normalized html"
        );
        Ok(plain)
    }

    /// Validate and convert editor HTML without rendering it
    pub fn to_document(&self, html: &str) -> Result<Document> {
        if let Err(err) = validate(html, &self.rules) {
            debug!(%err, "rejected markup");
            return Err(err.into());
        }
        Ok(convert(&parse_html(html), &self.rules))
    }

    /// Re-normalize text that is already in marked plain-text form
    pub fn normalize_marked(&self, text: &str) -> Result<PlainText> {
        let document = normalize_to_document(text, &self.options);
        Ok(normalize(&document, &self.options)?)
    }

    /// This normalizer's options with named overrides applied.
    ///
    /// Values are parsed as `BoldMarker` and `Rendering`; anything else is
    /// [`Error::InvalidInput`].
    pub fn options_with(&self, bold: Option<&str>, rendering: Option<&str>) -> Result<Options> {
        let mut options = self.options.clone();
        if let Some(bold) = bold {
            options.bold_marker = bold.parse::<BoldMarker>().map_err(Error::InvalidInput)?;
        }
        if let Some(rendering) = rendering {
            options.rendering = rendering.parse::<Rendering>().map_err(Error::InvalidInput)?;
        }
        Ok(options)
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Drop elements matching the filter, content included
    pub fn skip(&mut self, filter: Filter) -> &mut Self {
        self.rules.skip(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Effect;
    use plainpost_core::{Style, ValidationError};

    fn text(html: &str) -> String {
        Normalizer::new().normalize_html(html).unwrap().text
    }

    #[test]
    fn test_simple_paragraph() {
        assert_eq!(text("<p>Hello World</p>"), "Hello World");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(text(""), "");
    }

    #[test]
    fn test_ordered_numbering_restarts() {
        assert_eq!(
            text("<ol><li>a</li><li>b</li></ol><p>x</p><ol><li>c</li></ol>"),
            "1. a\n2. b\nx\n1. c"
        );
    }

    #[test]
    fn test_bullets() {
        assert_eq!(text("<ul><li>one</li><li>two</li></ul>"), "• one\n• two");
    }

    #[test]
    fn test_bold_italic() {
        assert_eq!(text("<p><b><i>hi</i></b></p>"), "**_hi_**");
    }

    #[test]
    fn test_single_bold_marker() {
        let normalizer = Normalizer::with_options(Options {
            bold_marker: BoldMarker::Single,
            ..Default::default()
        });
        let result = normalizer.normalize_html("<p><strong><em>hi</em></strong></p>").unwrap();
        assert_eq!(result.text, "*_hi_*");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            text(r#"<p><a href="https://x.com">site</a></p>"#),
            "site (https://x.com)"
        );
    }

    #[test]
    fn test_link_wrapping_paragraph() {
        assert_eq!(
            text(r#"<a href="https://x.com"><p>x</p></a>"#),
            "x (https://x.com)"
        );
    }

    #[test]
    fn test_link_with_space_in_href() {
        assert_eq!(
            text(r#"<p><a href="https://x.com/a b">site</a></p>"#),
            "site (https://x.com/a%20b)"
        );
    }

    #[test]
    fn test_hashtag() {
        let result = Normalizer::new().normalize_html("<p>Big day #launch</p>").unwrap();
        assert_eq!(result.text, "Big day #launch");
        assert_eq!(result.hashtags[0].tag, "#launch");
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(text("<foo>x</foo>"), "x");
    }

    #[test]
    fn test_unclosed_tag() {
        let err = Normalizer::new().normalize_html("<b>hi").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnclosedTag { ref tag, offset: 0 }) if tag == "b"
        ));
    }

    #[test]
    fn test_unicode_rendering() {
        let normalizer = Normalizer::with_options(Options {
            rendering: Rendering::Unicode,
            ..Default::default()
        });
        let result = normalizer.normalize_html("<p><b>Hi</b> #go</p>").unwrap();
        assert_eq!(result.text, "𝐇𝐢 #go");
    }

    #[test]
    fn test_per_call_options() {
        let normalizer = Normalizer::new();
        let options = normalizer.options_with(Some("single"), None).unwrap();
        let result = normalizer.normalize_html_with("<b>x</b>", &options).unwrap();
        assert_eq!(result.text, "*x*");
        assert_eq!(normalizer.normalize_html("<b>x</b>").unwrap().text, "**x**");
    }

    #[test]
    fn test_invalid_option() {
        let err = Normalizer::new().options_with(None, Some("fancy")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_plugin() {
        let mut normalizer = Normalizer::new();
        normalizer.use_plugin(|n| {
            n.add_rule("mark", Rule::for_tag("mark", Effect::Style(Style::Bold)));
        });
        assert_eq!(
            normalizer.normalize_html("<p><mark>x</mark></p>").unwrap().text,
            "**x**"
        );
    }

    #[test]
    fn test_skip() {
        let mut normalizer = Normalizer::new();
        normalizer.skip(Filter::tag("del"));
        assert_eq!(normalizer.normalize_html("<p>a<del>b</del></p>").unwrap().text, "a");
    }

    #[test]
    fn test_normalize_marked() {
        let normalizer = Normalizer::new();
        let result = normalizer.normalize_marked("**_hi_** #launch").unwrap();
        assert_eq!(result.text, "**_hi_** #launch");
        assert_eq!(result.hashtags.len(), 1);
    }

    #[test]
    fn test_options_mut() {
        let mut normalizer = Normalizer::new();
        normalizer.options_mut().bullet_marker = '-';
        assert_eq!(normalizer.normalize_html("<ul><li>a</li></ul>").unwrap().text, "- a");
    }
}
