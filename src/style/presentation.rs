//! Terminal presentation attributes for a single role.

use colored::{Color, Colorize};

/// Build a 24-bit colour from a `0xRRGGBB` literal.
pub const fn rgb(hex: u32) -> Color {
    Color::TrueColor {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    }
}

/// How text with a given role is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Presentation {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub dimmed: bool,
    /// Cells of horizontal padding on each side, inside the background.
    pub padding: usize,
}

impl Presentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn dimmed(mut self) -> Self {
        self.dimmed = true;
        self
    }

    pub fn padding(mut self, cells: usize) -> Self {
        self.padding = cells;
        self
    }

    /// True when painting adds no escape sequences.
    pub fn is_plain(&self) -> bool {
        self.foreground.is_none()
            && self.background.is_none()
            && !self.bold
            && !self.italic
            && !self.underline
            && !self.dimmed
    }

    /// Apply padding and ANSI attributes to `text`.
    pub fn paint(&self, text: &str) -> String {
        let padded = if self.padding > 0 {
            let pad = " ".repeat(self.padding);
            format!("{pad}{text}{pad}")
        } else {
            text.to_string()
        };

        if self.is_plain() {
            return padded;
        }

        let mut styled = padded.as_str().normal();
        if let Some(color) = self.foreground {
            styled = styled.color(color);
        }
        if let Some(color) = self.background {
            styled = styled.on_color(color);
        }
        if self.bold {
            styled = styled.bold();
        }
        if self.italic {
            styled = styled.italic();
        }
        if self.underline {
            styled = styled.underline();
        }
        if self.dimmed {
            styled = styled.dimmed();
        }
        styled.to_string()
    }
}
