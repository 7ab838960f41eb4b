//! Role to presentation mapping and text composition.

use std::collections::HashMap;

use colored::Color;

use super::{Presentation, Role, rgb};
use crate::render::{Fragment, Span};

const DEFAULT_BULLETS: [&str; 3] = ["•", "◦", "▪"];

/// A swappable mapping from [`Role`] to [`Presentation`], plus the glyphs
/// used for list markers and image placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    styles: HashMap<Role, Presentation>,
    bullets: Vec<String>,
    /// Spaces per list nesting level.
    indent: usize,
    image_label: String,
}

impl Default for Theme {
    fn default() -> Self {
        let muted = Color::TrueColor {
            r: 95,
            g: 95,
            b: 135,
        };
        let code = Presentation::new()
            .fg(rgb(0x458588))
            .bg(rgb(0x1d2021))
            .padding(1);

        let mut theme = Self::plain();
        theme.styles = HashMap::from([
            (Role::Heading(1), Presentation::new().fg(rgb(0xcc241d)).bold()),
            (Role::Heading(2), Presentation::new().fg(rgb(0x98971a)).bold()),
            (Role::Heading(3), Presentation::new().fg(rgb(0xb16286)).bold()),
            (Role::Heading(4), Presentation::new().fg(muted).bold()),
            (Role::Heading(5), Presentation::new().fg(muted).bold()),
            (Role::Heading(6), Presentation::new().fg(muted).bold()),
            (Role::Code, code),
            (Role::InlineCode, Presentation::new().fg(rgb(0x458588))),
            (Role::Emphasis, Presentation::new().italic()),
            (Role::Strong, Presentation::new().bold()),
            (Role::Link, Presentation::new().underline()),
            (Role::ImagePlaceholder, Presentation::new().dimmed()),
        ]);
        theme
    }
}

impl Theme {
    /// No colours, weights or padding; markers and placeholders only.
    pub fn plain() -> Self {
        Self {
            styles: HashMap::new(),
            bullets: DEFAULT_BULLETS.iter().map(|b| b.to_string()).collect(),
            indent: 2,
            image_label: "image".to_string(),
        }
    }

    /// Override the presentation of one role.
    pub fn with(mut self, role: Role, presentation: Presentation) -> Self {
        self.styles.insert(role, presentation);
        self
    }

    /// Replace the bullet glyphs, cycled by nesting depth.
    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bullets: Vec<String> = bullets.into_iter().map(Into::into).collect();
        if !bullets.is_empty() {
            self.bullets = bullets;
        }
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Presentation for `role`; unmapped roles are plain.
    pub fn style(&self, role: Role) -> Presentation {
        self.styles.get(&role).copied().unwrap_or_default()
    }

    /// Marker for a list item: `"3."` when ordered, a depth-cycled bullet otherwise.
    pub fn list_marker(&self, ordered: bool, depth: usize, number: usize) -> String {
        if ordered {
            format!("{number}.")
        } else {
            self.bullets
                .get(depth % self.bullets.len().max(1))
                .cloned()
                .unwrap_or_else(|| "-".to_string())
        }
    }

    /// Bracketed placeholder token standing in for an image.
    pub fn image_placeholder(&self, alt: Option<&str>) -> String {
        match alt {
            Some(alt) => format!("[{}: {alt}]", self.image_label),
            None => format!("[{}]", self.image_label),
        }
    }

    /// Turn fragments into display text.
    pub fn compose(&self, fragments: &[Fragment]) -> String {
        let mut out = String::new();
        for fragment in fragments {
            self.compose_fragment(fragment, &mut out);
        }
        out
    }

    fn compose_fragment(&self, fragment: &Fragment, out: &mut String) {
        match fragment {
            Fragment::Heading { level, text } => {
                out.push_str(&self.style(Role::Heading(*level)).paint(text));
                out.push('\n');
            }
            Fragment::Paragraph(spans) => {
                for span in spans {
                    self.compose_span(span, out);
                }
                out.push('\n');
            }
            Fragment::CodeBlock(text) => {
                // Each line separately so backgrounds do not bleed across newlines
                let style = self.style(Role::Code);
                for line in text.lines() {
                    out.push_str(&style.paint(line));
                    out.push('\n');
                }
            }
            Fragment::ListItem {
                ordered,
                depth,
                number,
                text,
            } => {
                out.push_str(&" ".repeat(self.indent * depth));
                out.push_str(&self.list_marker(*ordered, *depth, *number));
                out.push(' ');
                let style = self.style(Role::ListItem { ordered: *ordered });
                out.push_str(&style.paint(text));
                out.push('\n');
            }
            Fragment::Image { alt } => {
                let token = self.image_placeholder(alt.as_deref());
                out.push_str(&self.style(Role::ImagePlaceholder).paint(&token));
                out.push('\n');
            }
            Fragment::BlockSeparator => out.push('\n'),
        }
    }

    fn compose_span(&self, span: &Span, out: &mut String) {
        let style = self.style(span.role());
        match span {
            Span::Text(text)
            | Span::Emphasis(text)
            | Span::Strong(text)
            | Span::Code(text)
            | Span::Link { text, .. } => out.push_str(&style.paint(text)),
            Span::Image { alt } => {
                out.push_str(&style.paint(&self.image_placeholder(alt.as_deref())));
            }
            Span::LineBreak => out.push('\n'),
        }
    }
}
