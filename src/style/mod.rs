//! Presentation of rendered fragments.
//!
//! The renderer only decides *what* a piece of text is (its [`Role`]); a
//! [`Theme`] decides how each role looks. Themes are plain values, so the
//! same fragments can be composed again under a different theme without
//! re-parsing anything.

mod presentation;
mod theme;

pub use presentation::{Presentation, rgb};
pub use theme::Theme;

/// What a styled piece of text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Heading(u8),
    Paragraph,
    Code,
    ListItem { ordered: bool },
    ImagePlaceholder,
    Emphasis,
    Strong,
    InlineCode,
    Link,
}
