//! Unicode rendering
//!
//! Maps ASCII letters and digits into the Mathematical Alphanumeric
//! Symbols block (U+1D400..U+1D7FF), so styling survives targets that
//! strip markup. Everything else passes through.

use crate::ast::{Style, Styles};

/// A typeface in the mathematical alphanumeric block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Bold,
    Italic,
    BoldItalic,
    Monospace,
}

impl Face {
    /// The face for a style set, if any of its styles has one
    pub fn for_styles(styles: Styles) -> Option<Face> {
        if styles.contains(Style::Code) {
            return Some(Face::Monospace);
        }
        match (styles.contains(Style::Bold), styles.contains(Style::Italic)) {
            (true, true) => Some(Face::BoldItalic),
            (true, false) => Some(Face::Bold),
            (false, true) => Some(Face::Italic),
            (false, false) => None,
        }
    }

    // (upper A, lower a, digit 0)
    fn bases(self) -> (u32, u32, Option<u32>) {
        match self {
            Face::Bold => (0x1D400, 0x1D41A, Some(0x1D7CE)),
            Face::Italic => (0x1D434, 0x1D44E, None),
            Face::BoldItalic => (0x1D468, 0x1D482, Some(0x1D7CE)),
            Face::Monospace => (0x1D670, 0x1D68A, Some(0x1D7F6)),
        }
    }

    /// Map one character into this face
    pub fn apply(self, c: char) -> char {
        // Italic small h lives in the letterlike symbols block
        if self == Face::Italic && c == 'h' {
            return '\u{210E}';
        }

        let (upper, lower, digit) = self.bases();
        let code = match c {
            'A'..='Z' => upper + (c as u32 - 'A' as u32),
            'a'..='z' => lower + (c as u32 - 'a' as u32),
            '0'..='9' => match digit {
                Some(base) => base + (c as u32 - '0' as u32),
                None => return c,
            },
            _ => return c,
        };
        char::from_u32(code).unwrap_or(c)
    }
}

/// Render `text` in `face`
pub fn stylize(text: &str, face: Face) -> String {
    text.chars().map(|c| face.apply(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold() {
        assert_eq!(stylize("Hi 1", Face::Bold), "𝐇𝐢 𝟏");
    }

    #[test]
    fn test_italic_h() {
        assert_eq!(stylize("hat", Face::Italic), "ℎ𝑎𝑡");
    }

    #[test]
    fn test_italic_keeps_digits() {
        assert_eq!(stylize("a1", Face::Italic), "𝑎1");
    }

    #[test]
    fn test_monospace() {
        assert_eq!(stylize("ls", Face::Monospace), "𝚕𝚜");
    }

    #[test]
    fn test_face_for_styles() {
        let styles: Styles = [Style::Bold, Style::Italic].into_iter().collect();
        assert_eq!(Face::for_styles(styles), Some(Face::BoldItalic));
        assert_eq!(Face::for_styles(styles.with(Style::Code)), Some(Face::Monospace));
        assert_eq!(Face::for_styles(Styles::none().with(Style::Underline)), None);
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(stylize("é!", Face::Bold), "é!");
    }
}
