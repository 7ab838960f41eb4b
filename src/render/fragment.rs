//! Role-tagged output of the markup renderer.

use crate::style::Role;

/// One block-level unit of rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph(Vec<Span>),
    /// Preformatted text; internal whitespace is preserved.
    CodeBlock(String),
    ListItem {
        ordered: bool,
        /// Nesting depth, 0 for a top-level list.
        depth: usize,
        /// 1-based position within its own list.
        number: usize,
        text: String,
    },
    Image {
        alt: Option<String>,
    },
    /// Blank line between block-level elements.
    BlockSeparator,
}

impl Fragment {
    /// Presentation role, or `None` for separators.
    pub fn role(&self) -> Option<Role> {
        match self {
            Fragment::Heading { level, .. } => Some(Role::Heading(*level)),
            Fragment::Paragraph(_) => Some(Role::Paragraph),
            Fragment::CodeBlock(_) => Some(Role::Code),
            Fragment::ListItem { ordered, .. } => Some(Role::ListItem { ordered: *ordered }),
            Fragment::Image { .. } => Some(Role::ImagePlaceholder),
            Fragment::BlockSeparator => None,
        }
    }
}

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Plain text with whitespace runs collapsed to one space.
    Text(String),
    Emphasis(String),
    Strong(String),
    Code(String),
    Link { text: String, href: Option<String> },
    Image { alt: Option<String> },
    LineBreak,
}

impl Span {
    /// Presentation role of the span.
    pub fn role(&self) -> Role {
        match self {
            Span::Text(_) | Span::LineBreak => Role::Paragraph,
            Span::Emphasis(_) => Role::Emphasis,
            Span::Strong(_) => Role::Strong,
            Span::Code(_) => Role::InlineCode,
            Span::Link { .. } => Role::Link,
            Span::Image { .. } => Role::ImagePlaceholder,
        }
    }
}

/// Fragments of one content document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub fragments: Vec<Fragment>,
}

impl RenderedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// List items in emission order.
    pub fn list_items(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments
            .iter()
            .filter(|f| matches!(f, Fragment::ListItem { .. }))
    }
}
