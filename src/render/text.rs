//! Text collection over markup subtrees.

use crate::dom::{MarkupTree, NodeData, NodeId, Tag};

/// Pre-order text of all descendants, each text node trimmed, joined by one space.
pub fn trimmed_text(tree: &MarkupTree, id: NodeId) -> String {
    let mut parts = Vec::new();
    collect_trimmed(tree, id, false, &mut parts);
    parts.join(" ")
}

/// Like [`trimmed_text`], but skips nested `ul`/`ol` subtrees.
pub fn trimmed_text_outside_lists(tree: &MarkupTree, id: NodeId) -> String {
    let mut parts = Vec::new();
    collect_trimmed(tree, id, true, &mut parts);
    parts.join(" ")
}

fn collect_trimmed<'a>(tree: &'a MarkupTree, id: NodeId, skip_lists: bool, parts: &mut Vec<&'a str>) {
    for child in tree.children(id) {
        let Some(node) = tree.get(child) else {
            continue;
        };
        match &node.data {
            NodeData::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(text);
                }
            }
            NodeData::Element { tag, .. } if skip_lists && tag.is_list() => {}
            NodeData::Element { .. } => collect_trimmed(tree, child, skip_lists, parts),
            NodeData::Document | NodeData::Other => {}
        }
    }
}

/// Descendant text concatenated verbatim; `br` contributes a newline.
pub fn raw_text(tree: &MarkupTree, id: NodeId) -> String {
    let mut out = String::new();
    collect_raw(tree, id, &mut out);
    out
}

fn collect_raw(tree: &MarkupTree, id: NodeId, out: &mut String) {
    for child in tree.children(id) {
        match tree.get(child).map(|n| &n.data) {
            Some(NodeData::Text(text)) => out.push_str(text),
            Some(NodeData::Element {
                tag: Tag::LineBreak,
                ..
            }) => out.push('\n'),
            Some(NodeData::Element { .. }) => collect_raw(tree, child, out),
            _ => {}
        }
    }
}

/// Collapse every whitespace run to a single space, keeping edge spaces.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
