//! plainpost-core - document model and plain-text normalization
//!
//! This crate turns a styled document into the plain-text conventions
//! social posts understand (`**bold**`, `_italic_`, `•` bullets, `1.`
//! numbering, `text (url)` links). It is used by `plainpost` (for HTML
//! coming out of an editor) and can be driven directly with a document.
//!
//! # Architecture
//!
//! ```text
//! HTML fragment ──plainpost──▶ ┌──────────┐
//!                              │          │ ──normalize──▶ PlainText
//!                              │ Document │
//! Marked text ──normalize_to──▶│          │
//!                   _document  └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use plainpost_core::{normalize, Block, Document, Options, Segment, Style};
//!
//! let doc = Document::new(vec![
//!     Block::ordered(vec![Segment::plain("Ship it")]),
//!     Block::ordered(vec![Segment::styled("hi", &[Style::Bold, Style::Italic])]),
//! ]);
//!
//! let text = normalize(&doc, &Options::default()).unwrap().text;
//! assert_eq!(text, "1. Ship it\n2. **_hi_**");
//! ```

mod ast;
mod error;
mod hashtag;
mod normalize;
mod options;
mod parse;
mod unicode;

pub use ast::{Annotation, Block, BlockKind, Document, Hashtag, PlainText, Segment, Style, Styles};
pub use error::ValidationError;
pub use hashtag::find_hashtags;
pub use normalize::normalize;
pub use options::{BoldMarker, Options, Rendering};
pub use parse::normalize_to_document;
pub use unicode::{stylize, Face};
