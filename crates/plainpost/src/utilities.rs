//! Utility functions and constants for HTML processing.

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose content is raw text, not markup
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag holds raw text
pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Collapse runs of whitespace into single spaces
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Value of a CSS property in an inline `style` attribute
pub fn css_property<'a>(style: &'a str, name: &str) -> Option<&'a str> {
    style.split(';').find_map(|decl| {
        let (prop, value) = decl.split_once(':')?;
        prop.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim())
    })
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Percent-encode whitespace inside a URL, leaving everything else alone
pub fn encode_whitespace(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if c.is_whitespace() {
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut [0; 4])));
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_void() {
        assert!(is_void("br"));
        assert!(is_void("HR"));
        assert!(!is_void("b"));
    }

    #[test]
    fn test_is_raw_text() {
        assert!(is_raw_text("script"));
        assert!(!is_raw_text("p"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
        assert_eq!(collapse_whitespace("\n  hi  "), " hi ");
    }

    #[test]
    fn test_css_property() {
        let style = "color: red; Font-Weight: bold;";
        assert_eq!(css_property(style, "font-weight"), Some("bold"));
        assert_eq!(css_property(style, "font-style"), None);
    }

    #[test]
    fn test_encode_whitespace() {
        assert_eq!(encode_whitespace("https://x.com/a b?q=1"), "https://x.com/a%20b?q=1");
        assert_eq!(encode_whitespace("https://x.com/a\tb"), "https://x.com/a%09b");
        assert_eq!(encode_whitespace("https://x.com/%20"), "https://x.com/%20");
    }

    #[test]
    fn test_clean_attribute() {
        assert_eq!(clean_attribute(Some("  https://x.com ")), Some("https://x.com".to_string()));
        assert_eq!(clean_attribute(Some("   ")), None);
        assert_eq!(clean_attribute(None), None);
    }
}
