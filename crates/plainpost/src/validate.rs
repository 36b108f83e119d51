//! Tag validation.
//!
//! The HTML parser repairs anything, so malformed editor output is caught
//! here first: every tag a rule knows about must be closed and properly
//! nested, and no tag may be left without its closing `>`. Tags no rule
//! knows about are ignored.

use once_cell::sync::Lazy;
use plainpost_core::ValidationError;
use regex::Regex;

use crate::rules::Rules;
use crate::utilities::is_raw_text;

static TAG_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(/)?([A-Za-z][A-Za-z0-9-]*)").unwrap());

/// Check tag structure of an HTML fragment
pub fn validate(html: &str, rules: &Rules) -> Result<(), ValidationError> {
    // Open tracked tags with their offsets
    let mut stack: Vec<(String, usize)> = Vec::new();
    let mut i = 0;

    while let Some(rel) = html[i..].find('<') {
        let start = i + rel;
        let rest = &html[start + 1..];

        if rest.starts_with("!--") {
            let end = html[start + 4..]
                .find("-->")
                .ok_or(ValidationError::UnterminatedTag { offset: start })?;
            i = start + 4 + end + 3;
            continue;
        }

        let starts_tag = rest
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
        if !starts_tag {
            // A bare `<`, as in `a < b` or `<3`
            i = start + 1;
            continue;
        }

        let end = find_tag_end(html, start + 1)
            .ok_or(ValidationError::UnterminatedTag { offset: start })?;
        let inner = &html[start + 1..end];
        i = end + 1;

        let Some(caps) = TAG_NAME.captures(inner) else {
            // Doctype, processing instruction or `</>`
            continue;
        };
        let closing = caps.get(1).is_some();
        let name = caps[2].to_lowercase();

        if !rules.is_tracked(&name) {
            continue;
        }

        if closing {
            match stack.pop() {
                Some((open, _)) if open == name => {}
                Some((open, _)) => {
                    return Err(ValidationError::MismatchedTag {
                        expected: open,
                        found: name,
                        offset: start,
                    })
                }
                None => {
                    return Err(ValidationError::UnexpectedClosingTag {
                        tag: name,
                        offset: start,
                    })
                }
            }
            continue;
        }

        if inner.trim_end().ends_with('/') {
            continue;
        }

        if is_raw_text(&name) {
            // Content is not markup; jump to the closing tag
            let close = format!("</{}", name);
            let pos = html[i..]
                .to_ascii_lowercase()
                .find(&close)
                .ok_or(ValidationError::UnclosedTag {
                    tag: name.clone(),
                    offset: start,
                })?;
            i += pos;
        }

        stack.push((name, start));
    }

    match stack.pop() {
        Some((tag, offset)) => Err(ValidationError::UnclosedTag { tag, offset }),
        None => Ok(()),
    }
}

/// Index of the `>` closing a tag whose name starts at `from`.
///
/// Quoted attribute values may contain `>`. A `<` before the end means the
/// tag was never closed.
fn find_tag_end(html: &str, from: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut prev = ' ';

    for (i, c) in html[from..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '>' => return Some(from + i),
                '<' => return None,
                '"' | '\'' if prev == '=' => quote = Some(c),
                _ => {}
            },
        }
        if !c.is_whitespace() {
            prev = c;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> Result<(), ValidationError> {
        validate(html, &Rules::new())
    }

    #[test]
    fn test_well_formed() {
        assert_eq!(check("<p>Hello <b>World</b><br></p><ul><li>a</li></ul>"), Ok(()));
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(check("a < b, <3, 2<3"), Ok(()));
    }

    #[test]
    fn test_unclosed_style() {
        assert_eq!(
            check("<p><b>hi</p>"),
            Err(ValidationError::MismatchedTag {
                expected: "b".to_string(),
                found: "p".to_string(),
                offset: 8
            })
        );
        assert_eq!(
            check("<b>hi"),
            Err(ValidationError::UnclosedTag {
                tag: "b".to_string(),
                offset: 0
            })
        );
    }

    #[test]
    fn test_unterminated_tag() {
        assert_eq!(
            check("hello <b"),
            Err(ValidationError::UnterminatedTag { offset: 6 })
        );
        assert_eq!(
            check("<b class=x <i>hi</i>"),
            Err(ValidationError::UnterminatedTag { offset: 0 })
        );
        assert_eq!(
            check("a <!-- note"),
            Err(ValidationError::UnterminatedTag { offset: 2 })
        );
    }

    #[test]
    fn test_unexpected_closing_tag() {
        assert_eq!(
            check("hi</em>"),
            Err(ValidationError::UnexpectedClosingTag {
                tag: "em".to_string(),
                offset: 2
            })
        );
    }

    #[test]
    fn test_unknown_tags_are_ignored() {
        assert_eq!(check("<foo>x</bar><b>y</b>"), Ok(()));
    }

    #[test]
    fn test_quoted_attribute_with_angle_bracket() {
        assert_eq!(check(r#"<a href="https://x.com/?q=a>b">x</a>"#), Ok(()));
    }

    #[test]
    fn test_self_closing_and_void() {
        assert_eq!(check("<p>a<br/>b<br>c<span/></p>"), Ok(()));
    }

    #[test]
    fn test_script_contents_are_skipped() {
        assert_eq!(check("<script>if (a<b) {}</script><p>x</p>"), Ok(()));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(check("<B>x</b>"), Ok(()));
    }
}
