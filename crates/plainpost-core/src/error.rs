//! Validation errors

/// Malformed input. Covers both documents and the HTML they are read from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("segment {segment} of block {block} contains a line break")]
    MultilineSegment { block: usize, segment: usize },

    #[error("invalid link target `{url}` in block {block}")]
    InvalidLink { block: usize, url: String },

    #[error("unterminated tag at offset {offset}")]
    UnterminatedTag { offset: usize },

    #[error("unclosed <{tag}> opened at offset {offset}")]
    UnclosedTag { tag: String, offset: usize },

    #[error("unexpected </{tag}> at offset {offset}")]
    UnexpectedClosingTag { tag: String, offset: usize },

    #[error("expected </{expected}> but found </{found}> at offset {offset}")]
    MismatchedTag {
        expected: String,
        found: String,
        offset: usize,
    },
}
