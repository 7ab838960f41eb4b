//! Markup tree to role-tagged fragments.
//!
//! The renderer walks the `body` subtree in document order. Elements with a
//! rendering rule (headings, paragraphs, code, lists, images) emit a
//! [`Fragment`] and are not descended into further; every other element is
//! transparent and its children are visited in its place. Loose text outside
//! any rule-bearing element is not emitted.

mod fragment;
mod text;

pub use fragment::{Fragment, RenderedDocument, Span};
pub use text::{collapse_whitespace, raw_text, trimmed_text, trimmed_text_outside_lists};

use crate::dom::{MarkupTree, NodeData, NodeId, Tag, parse_markup};
use crate::error::{Error, Result};

/// Parse and render one content document.
pub fn render_document(bytes: &[u8]) -> Result<RenderedDocument> {
    let tree = parse_markup(bytes)?;
    render_tree(&tree)
}

/// Render an already parsed tree, starting from its first `body` element.
pub fn render_tree(tree: &MarkupTree) -> Result<RenderedDocument> {
    let body = tree.find_body().ok_or(Error::MissingRoot)?;

    let mut out = RenderedDocument::new();
    render_children(tree, body, &mut out);
    Ok(out)
}

fn render_children(tree: &MarkupTree, id: NodeId, out: &mut RenderedDocument) {
    for child in tree.children(id) {
        render_node(tree, child, out);
    }
}

fn render_node(tree: &MarkupTree, id: NodeId, out: &mut RenderedDocument) {
    let Some(tag) = tree.tag(id) else {
        return;
    };

    match tag {
        Tag::Heading(level) => {
            let text = trimmed_text(tree, id);
            if !text.is_empty() {
                out.push(Fragment::Heading {
                    level: *level,
                    text,
                });
                out.push(Fragment::BlockSeparator);
            }
        }
        Tag::Paragraph => {
            let spans = render_inline(tree, id);
            if !spans.is_empty() {
                out.push(Fragment::Paragraph(spans));
                out.push(Fragment::BlockSeparator);
            }
        }
        Tag::Pre => {
            let text = raw_text(tree, id);
            let text = text.trim_start_matches(['\n', '\r']).trim_end();
            if !text.is_empty() {
                out.push(Fragment::CodeBlock(text.to_string()));
                out.push(Fragment::BlockSeparator);
            }
        }
        Tag::Code => {
            let text = trimmed_text(tree, id);
            if !text.is_empty() {
                out.push(Fragment::CodeBlock(text));
                out.push(Fragment::BlockSeparator);
            }
        }
        Tag::UnorderedList | Tag::OrderedList => {
            render_list(tree, id, 0, out);
            out.push(Fragment::BlockSeparator);
        }
        Tag::Image => {
            out.push(Fragment::Image {
                alt: image_alt(tree, id),
            });
            out.push(Fragment::BlockSeparator);
        }
        Tag::Body
        | Tag::ListItem
        | Tag::Anchor
        | Tag::Emphasis
        | Tag::Strong
        | Tag::LineBreak
        | Tag::Other(_) => render_children(tree, id, out),
    }
}

/// Emit one item per direct `li`, each followed by the lists nested in it.
fn render_list(tree: &MarkupTree, list: NodeId, depth: usize, out: &mut RenderedDocument) {
    let ordered = matches!(tree.tag(list), Some(Tag::OrderedList));
    let mut number = 0;

    for child in tree.children(list) {
        match tree.tag(child) {
            Some(Tag::ListItem) => {
                number += 1;
                out.push(Fragment::ListItem {
                    ordered,
                    depth,
                    number,
                    text: trimmed_text_outside_lists(tree, child),
                });
                for nested in nested_lists(tree, child) {
                    render_list(tree, nested, depth + 1, out);
                }
            }
            // A list directly inside a list is malformed but common
            Some(tag) if tag.is_list() => render_list(tree, child, depth + 1, out),
            _ => {}
        }
    }
}

/// Outermost lists below `item`, in document order.
fn nested_lists(tree: &MarkupTree, item: NodeId) -> Vec<NodeId> {
    let mut lists = Vec::new();
    collect_nested_lists(tree, item, &mut lists);
    lists
}

fn collect_nested_lists(tree: &MarkupTree, id: NodeId, lists: &mut Vec<NodeId>) {
    for child in tree.children(id) {
        match tree.tag(child) {
            Some(tag) if tag.is_list() => lists.push(child),
            Some(_) => collect_nested_lists(tree, child, lists),
            None => {}
        }
    }
}

fn image_alt(tree: &MarkupTree, id: NodeId) -> Option<String> {
    tree.attr(id, "alt")
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(str::to_string)
}

/// Inline spans for the children of a paragraph.
fn render_inline(tree: &MarkupTree, id: NodeId) -> Vec<Span> {
    let mut spans = Vec::new();
    collect_inline(tree, id, &mut spans);
    tidy_spans(spans)
}

fn collect_inline(tree: &MarkupTree, id: NodeId, spans: &mut Vec<Span>) {
    for child in tree.children(id) {
        let Some(node) = tree.get(child) else {
            continue;
        };
        let tag = match &node.data {
            NodeData::Text(text) => {
                spans.push(Span::Text(collapse_whitespace(text)));
                continue;
            }
            NodeData::Element { tag, .. } => tag,
            NodeData::Document | NodeData::Other => continue,
        };

        match tag {
            Tag::Emphasis => spans.push(Span::Emphasis(trimmed_text(tree, child))),
            Tag::Strong => spans.push(Span::Strong(trimmed_text(tree, child))),
            Tag::Code => spans.push(Span::Code(trimmed_text(tree, child))),
            Tag::Anchor => {
                let text = trimmed_text(tree, child);
                if text.is_empty() {
                    // Linked images and other textless content
                    collect_inline(tree, child, spans);
                } else {
                    spans.push(Span::Link {
                        text,
                        href: tree.attr(child, "href").map(str::to_string),
                    });
                }
            }
            Tag::Image => spans.push(Span::Image {
                alt: image_alt(tree, child),
            }),
            Tag::LineBreak => spans.push(Span::LineBreak),
            _ => collect_inline(tree, child, spans),
        }
    }
}

/// Merge adjacent text, drop empty spans and trim whitespace at the
/// paragraph edges and around line breaks.
fn tidy_spans(spans: Vec<Span>) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match span {
            Span::Text(text) => {
                if let Some(Span::Text(prev)) = merged.last_mut() {
                    if prev.ends_with(' ') && text.starts_with(' ') {
                        prev.push_str(&text[1..]);
                    } else {
                        prev.push_str(&text);
                    }
                } else {
                    merged.push(Span::Text(text));
                }
            }
            Span::Emphasis(ref text)
            | Span::Strong(ref text)
            | Span::Code(ref text)
            | Span::Link { ref text, .. }
                if text.is_empty() => {}
            other => merged.push(other),
        }
    }

    let len = merged.len();
    for i in 0..len {
        let at_start = i == 0 || matches!(merged[i - 1], Span::LineBreak);
        let at_end = i + 1 == len || matches!(merged[i + 1], Span::LineBreak);
        if let Span::Text(text) = &mut merged[i] {
            if at_start {
                *text = text.trim_start().to_string();
            }
            if at_end {
                *text = text.trim_end().to_string();
            }
        }
    }

    merged.retain(|span| !matches!(span, Span::Text(text) if text.is_empty()));
    while matches!(merged.last(), Some(Span::LineBreak)) {
        merged.pop();
    }
    merged
}
