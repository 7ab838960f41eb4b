//! Permissive markup parsing into an arena tree.
//!
//! Content documents are parsed with html5ever's browser-grade error
//! recovery: misnested or unknown tags never abort parsing, and missing
//! `html`/`body` wrappers are synthesized.

mod arena;
mod tag;
mod tree_sink;

pub use arena::{Attribute, Children, MarkupTree, Node, NodeData, NodeId};
pub use tag::Tag;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use crate::error::{Error, Result};
use crate::util::decode_markup;
use tree_sink::TreeBuilder;

/// Parse a content document's bytes into a [`MarkupTree`].
///
/// Fails with [`Error::MalformedMarkup`] when the bytes do not decode to
/// text at all (binary data such as an image listed in the spine).
pub fn parse_markup(bytes: &[u8]) -> Result<MarkupTree> {
    let text = decode_markup(bytes);
    if text.contains('\0') {
        return Err(Error::MalformedMarkup(
            "content contains NUL bytes; not a text document".into(),
        ));
    }

    let sink = TreeBuilder::new();
    let result = parse_document(sink, ParseOpts::default()).one(&*text);
    Ok(result.into_tree())
}
