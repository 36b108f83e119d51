//! Configuration options for normalization

use std::str::FromStr;

use crate::ast::Style;

/// Bold marker policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoldMarker {
    /// `**text**`
    #[default]
    Double,
    /// `*text*`
    Single,
}

impl BoldMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            BoldMarker::Double => "**",
            BoldMarker::Single => "*",
        }
    }
}

impl FromStr for BoldMarker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "double" | "**" => Ok(BoldMarker::Double),
            "single" | "*" => Ok(BoldMarker::Single),
            other => Err(format!("unknown bold marker `{}` (expected double or single)", other)),
        }
    }
}

/// How styled segments are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rendering {
    /// Wrap segments in ASCII markers (`**`, `_`, `` ` ``)
    #[default]
    Markers,
    /// Map letters into the Unicode mathematical alphanumeric block
    Unicode,
}

impl FromStr for Rendering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markers" | "marker" => Ok(Rendering::Markers),
            "unicode" => Ok(Rendering::Unicode),
            other => Err(format!("unknown rendering `{}` (expected markers or unicode)", other)),
        }
    }
}

/// Options for normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Bold marker policy
    pub bold_marker: BoldMarker,

    /// Marker or Unicode rendering
    pub rendering: Rendering,

    /// Glyph that prefixes bullet blocks
    pub bullet_marker: char,
}

impl Options {
    /// Prefix and suffix for a style, `None` for styles without syntax
    pub fn marker(&self, style: Style) -> Option<(&'static str, &'static str)> {
        match style {
            Style::Bold => {
                let m = self.bold_marker.as_str();
                Some((m, m))
            }
            Style::Italic => Some(("_", "_")),
            Style::Code => Some(("`", "`")),
            Style::Underline | Style::Strikethrough => None,
        }
    }

    /// Bullet prefix including the trailing space
    pub fn bullet_prefix(&self) -> String {
        format!("{} ", self.bullet_marker)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bold_marker: BoldMarker::Double,
            rendering: Rendering::Markers,
            bullet_marker: '•',
        }
    }
}
