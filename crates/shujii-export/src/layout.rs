//! Positioned text on fixed-size pages.
//!
//! [`Canvas`] records drawing operations page by page. Like a PDF content
//! stream, each page starts without a selected font: after
//! [`Canvas::show_page`] the caller has to select one again before drawing.

use crate::error::ExportError;

/// One drawing operation on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetFont { size: f32 },
    Text { x: f32, y: f32, text: String },
}

/// A finished page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text lines on this page as `(baseline y, text)`, in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = (f32, &str)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { y, text, .. } => Some((*y, text.as_str())),
            DrawOp::SetFont { .. } => None,
        })
    }
}

#[derive(Debug, Default)]
pub struct Canvas {
    pages: Vec<Page>,
    current: Page,
    font_size: Option<f32>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the font size for following text. No-op if already selected
    /// on this page.
    pub fn set_font(&mut self, size: f32) {
        if self.font_size == Some(size) {
            return;
        }
        self.font_size = Some(size);
        self.current.ops.push(DrawOp::SetFont { size });
    }

    pub fn draw_string(&mut self, x: f32, y: f32, text: &str) -> Result<(), ExportError> {
        if self.font_size.is_none() {
            return Err(ExportError::NoFontSelected {
                page: self.pages.len() + 1,
            });
        }
        self.current.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }

    /// End the current page. Font selection does not carry over.
    pub fn show_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.font_size = None;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len() + usize::from(!self.current.ops.is_empty())
    }

    /// All pages, including the current one if anything was drawn on it.
    /// Always at least one page.
    pub fn finish(mut self) -> Vec<Page> {
        if !self.current.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Columns a character occupies: half-width characters take one, everything
/// else two.
pub fn char_columns(c: char) -> usize {
    if c.is_ascii() || ('\u{FF61}'..='\u{FF9F}').contains(&c) {
        1
    } else {
        2
    }
}

pub fn display_columns(text: &str) -> usize {
    text.chars().map(char_columns).sum()
}

/// Characters that may hang past the line end instead of starting a line.
fn is_closing_punctuation(c: char) -> bool {
    matches!(
        c,
        '、' | '。' | '，' | '．' | '）' | '」' | '』' | '】' | '〕' | '！' | '？' | '：' | '；' | 'ー' | ','
            | '.' | ')' | '!' | '?'
    )
}

/// Wrap text to `max_columns`. Every `\n` starts a new line and an empty
/// paragraph becomes an empty line.
///
/// Runs of half-width non-space characters are kept together when they fit
/// on a line; full-width characters may break anywhere. At most one closing
/// punctuation mark per line may hang past `max_columns`.
pub fn wrap_text(text: &str, max_columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
        } else {
            wrap_paragraph(paragraph.trim_end(), max_columns.max(1), &mut lines);
        }
    }
    lines
}

fn wrap_paragraph(paragraph: &str, max_columns: usize, out: &mut Vec<String>) {
    let mut line = String::new();
    let mut width = 0;
    let mut hung = false;

    for token in tokens(paragraph) {
        let token_width = display_columns(token);

        if token.chars().all(char::is_whitespace) {
            if width > 0 && width + token_width <= max_columns {
                line.push_str(token);
                width += token_width;
            }
            continue;
        }

        let overflows = width > 0 && width + token_width > max_columns;
        let hangs = !hung
            && token.chars().count() == 1
            && token.chars().all(is_closing_punctuation);
        if overflows && hangs {
            hung = true;
        } else if overflows {
            out.push(line.trim_end().to_string());
            line.clear();
            width = 0;
            hung = false;
        }

        if token_width > max_columns {
            for c in token.chars() {
                let w = char_columns(c);
                if width > 0 && width + w > max_columns {
                    out.push(std::mem::take(&mut line));
                    width = 0;
                    hung = false;
                }
                line.push(c);
                width += w;
            }
        } else {
            line.push_str(token);
            width += token_width;
        }
    }

    if !line.trim().is_empty() {
        out.push(line.trim_end().to_string());
    }
}

/// Split into break units: whitespace runs, runs of half-width non-space
/// characters, and single full-width characters.
fn tokens(text: &str) -> Vec<&str> {
    #[derive(PartialEq)]
    enum Kind {
        Space,
        Narrow,
        Wide,
    }

    let kind = |c: char| {
        if c.is_whitespace() {
            Kind::Space
        } else if char_columns(c) == 1 {
            Kind::Narrow
        } else {
            Kind::Wide
        }
    };

    let mut out = Vec::new();
    let mut start = 0;
    let mut prev: Option<Kind> = None;

    for (i, c) in text.char_indices() {
        let k = kind(c);
        let split = match &prev {
            None => false,
            Some(Kind::Wide) => true,
            Some(p) => *p != k,
        };
        if split {
            out.push(&text[start..i]);
            start = i;
        }
        prev = Some(k);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }

    out
}
