//! Maps HTML element names to the closed set of tags the renderer knows.

use html5ever::LocalName;

/// Normalized element kind, decided once when the element is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// The renderable root.
    Body,
    /// `h1`..`h6`.
    Heading(u8),
    Paragraph,
    /// Inline or block `code` outside `pre`.
    Code,
    Pre,
    UnorderedList,
    OrderedList,
    ListItem,
    Image,
    Anchor,
    Emphasis,
    Strong,
    LineBreak,
    /// Anything else; rendered by visiting its children.
    Other(LocalName),
}

impl Tag {
    /// Classify an element by its (lowercased) local name.
    pub fn from_local_name(local_name: &LocalName) -> Tag {
        match local_name.as_ref() {
            "body" => Tag::Body,
            "p" => Tag::Paragraph,
            "code" => Tag::Code,
            "pre" => Tag::Pre,
            "ul" => Tag::UnorderedList,
            "ol" => Tag::OrderedList,
            "li" => Tag::ListItem,
            "img" => Tag::Image,
            "a" => Tag::Anchor,
            "em" | "i" => Tag::Emphasis,
            "strong" | "b" => Tag::Strong,
            "br" => Tag::LineBreak,
            name => match heading_level(name) {
                Some(level) => Tag::Heading(level),
                None => Tag::Other(local_name.clone()),
            },
        }
    }

    /// True for `ul` and `ol`.
    pub fn is_list(&self) -> bool {
        matches!(self, Tag::UnorderedList | Tag::OrderedList)
    }
}

/// `h` followed by a number in 1..=6.
fn heading_level(name: &str) -> Option<u8> {
    let digits = name.strip_prefix('h')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let level: u8 = digits.parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}
