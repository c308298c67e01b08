//! Composition of the diagnosis report.
//!
//! Text is laid out top to bottom with a single vertical cursor. Every line
//! goes through the same space check: if the cursor has dropped below
//! [`DocumentStyles::min_y`] the page is closed, the cursor returns to the
//! top and the current font is selected again on the new page.
//!
//! The narrative is expected to be sanitized already and is drawn as is.
//! The category label and free-text answers never pass through the
//! sanitizer, so only those are filtered here.

use tracing::debug;

use shujii_core::models::answer::AnswerSet;
use shujii_core::models::category::{Category, Classification};

use crate::error::ExportError;
use crate::layout::{Canvas, Page, wrap_text};
use crate::pdf;
use crate::sanitize::retain_renderable;
use crate::styles::DocumentStyles;

pub const DOCUMENT_TITLE: &str = "IT主治医診断レポート";
pub const ANSWERS_HEADING: &str = "設問ごとの回答（Yes=1 / No=0）";
pub const NARRATIVE_HEADING: &str = "IT主治医コメント";

/// Download name of the generated document.
pub const FILE_NAME: &str = "it_doctor_diagnosis.pdf";
pub const MIME_TYPE: &str = "application/pdf";

/// Gap between the title baseline and the summary block.
const TITLE_GAP: f32 = 30.0;
/// Extra space after a block.
const BLOCK_GAP: f32 = 8.0;
/// Baseline advance after the narrative heading.
const HEADING_GAP: f32 = 18.0;

/// Everything that goes into one report.
#[derive(Debug, Clone, Copy)]
pub struct ReportContent<'a> {
    pub classification: Classification,
    /// Sanitized narrative text.
    pub narrative: &'a str,
    /// When present, the per-question answers and free text are listed
    /// before the narrative.
    pub answers: Option<&'a AnswerSet>,
}

/// Render a report with only the summary and narrative, using the default
/// styles.
pub fn render(category: Category, score: u8, narrative: &str) -> Result<Vec<u8>, ExportError> {
    let content = ReportContent {
        classification: Classification { score, category },
        narrative,
        answers: None,
    };
    render_report(&content, &DocumentStyles::default())
}

/// Render a complete report to PDF bytes.
pub fn render_report(
    content: &ReportContent<'_>,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let pages = render_pages(content, styles)?;
    pdf::write_pdf(&pages, styles, DOCUMENT_TITLE)
}

/// Lay out a report into pages without encoding it.
pub fn render_pages(
    content: &ReportContent<'_>,
    styles: &DocumentStyles,
) -> Result<Vec<Page>, ExportError> {
    let mut writer = Writer::new(styles);
    let classification = content.classification;
    let category = classification.category;

    writer.set_font(styles.title_size);
    writer.line(DOCUMENT_TITLE, TITLE_GAP)?;

    writer.set_font(styles.summary_size);
    let label = retain_renderable(category.label());
    writer.line(&format!("タイプ：{}", label.trim()), styles.summary_leading)?;
    writer.line(
        &format!("スコア：{}", classification.score_display()),
        styles.summary_leading,
    )?;
    writer.paragraph(category.description(), styles.summary_leading)?;
    writer.skip(BLOCK_GAP);

    if let Some(answers) = content.answers {
        writer.heading(ANSWERS_HEADING, styles.summary_leading)?;
        writer.set_font(styles.body_size);
        for (question, yes) in answers.answers() {
            let line = format!("{}: {}  - {}", question.id, u8::from(yes), question.text);
            writer.paragraph(&line, styles.body_leading)?;
        }
        writer.skip(BLOCK_GAP);

        for (question, text) in answers.free_text().entries() {
            writer.heading(question.title, styles.summary_leading)?;
            writer.set_font(styles.body_size);
            writer.paragraph(&renderable_lines(text), styles.body_leading)?;
            writer.skip(BLOCK_GAP);
        }
    }

    writer.heading(NARRATIVE_HEADING, HEADING_GAP)?;
    writer.set_font(styles.body_size);
    writer.paragraph(content.narrative, styles.body_leading)?;

    let pages = writer.finish();
    debug!(pages = pages.len(), category = %category, "report laid out");
    Ok(pages)
}

/// Filter each line of unsanitized text on its own, keeping the line breaks.
fn renderable_lines(text: &str) -> String {
    text.lines()
        .map(retain_renderable)
        .collect::<Vec<_>>()
        .join("\n")
}

struct Writer<'s> {
    canvas: Canvas,
    styles: &'s DocumentStyles,
    y: f32,
    size: f32,
}

impl<'s> Writer<'s> {
    fn new(styles: &'s DocumentStyles) -> Self {
        Self {
            canvas: Canvas::new(),
            styles,
            y: styles.top_y(),
            size: styles.body_size,
        }
    }

    fn set_font(&mut self, size: f32) {
        self.size = size;
        self.canvas.set_font(size);
    }

    /// Start a new page if the cursor is below `threshold`.
    fn ensure_space(&mut self, threshold: f32) {
        if self.y < threshold {
            self.canvas.show_page();
            self.y = self.styles.top_y();
            self.canvas.set_font(self.size);
        }
    }

    /// Draw one line and advance the cursor. Empty lines only advance.
    fn line(&mut self, text: &str, leading: f32) -> Result<(), ExportError> {
        self.ensure_space(self.styles.min_y);
        if !text.is_empty() {
            self.canvas.draw_string(self.styles.margin_x, self.y, text)?;
        }
        self.y -= leading;
        Ok(())
    }

    fn paragraph(&mut self, text: &str, leading: f32) -> Result<(), ExportError> {
        for line in wrap_text(text, self.styles.max_columns(self.size)) {
            self.line(&line, leading)?;
        }
        Ok(())
    }

    /// Heading kept on the same page as at least the first line below it.
    fn heading(&mut self, text: &str, leading: f32) -> Result<(), ExportError> {
        self.set_font(self.styles.heading_size);
        self.ensure_space(self.styles.min_y + leading);
        self.line(text, leading)
    }

    fn skip(&mut self, gap: f32) {
        self.y -= gap;
    }

    fn finish(self) -> Vec<Page> {
        self.canvas.finish()
    }
}
