//! # plainpost
//!
//! Normalize rich-text editor HTML into plain text for social posts.
//!
//! The pipeline is validate, parse, convert, normalize: tags are checked
//! for structure, the markup is parsed with `scraper`, the rule table turns
//! the tree into a [`Document`], and [`plainpost_core::normalize`] renders
//! it.
//!
//! ## Example
//!
//! ```rust
//! use plainpost::Normalizer;
//!
//! let normalizer = Normalizer::new();
//! let plain = normalizer
//!     .normalize_html("<ol><li><b>Ship</b> it</li></ol><p>#launch</p>")
//!     .unwrap();
//! assert_eq!(plain.text, "1. **Ship** it\n#launch");
//! assert_eq!(plain.hashtags[0].tag, "#launch");
//! ```

mod convert;
pub mod html;
pub mod node;
mod rules;
mod service;
mod utilities;
mod validate;

pub use convert::convert;
pub use html::parse_html;
pub use node::{Node, NodeType};
pub use rules::{Effect, Filter, PredicateFn, Rule, Rules};
pub use service::Normalizer;
pub use validate::validate;

pub use plainpost_core::{
    Annotation, Block, BlockKind, BoldMarker, Document, Hashtag, Options, PlainText, Rendering,
    Segment, Style, Styles, ValidationError,
};

/// Error type for normalization
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
