use serde::{Deserialize, Serialize};

/// Page geometry and typography for the diagnosis report.
///
/// All lengths are PDF points (1/72 inch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// PostScript name of the (non-embedded) CID font.
    pub font_name: String,

    /// CMap used to encode text for `font_name`. A UCS-2 CMap, so only
    /// characters up to U+FFFF can be drawn.
    pub font_encoding: String,

    pub page_width: f32,
    pub page_height: f32,

    /// Left margin, also the x position of every line.
    pub margin_x: f32,

    /// Distance from the top edge to the first baseline of a page.
    pub margin_top: f32,

    /// Lowest baseline a line may be drawn on. A line that would go below
    /// it starts a new page instead.
    pub min_y: f32,

    pub title_size: f32,
    pub heading_size: f32,
    pub summary_size: f32,
    pub body_size: f32,

    /// Baseline advance after a summary or heading line.
    pub summary_leading: f32,

    /// Baseline advance after a body line.
    pub body_leading: f32,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            font_name: "HeiseiKakuGo-W5".to_string(),
            font_encoding: "UniJIS-UCS2-H".to_string(),
            // A4
            page_width: 595.2756,
            page_height: 841.8898,
            margin_x: 40.0,
            margin_top: 40.0,
            min_y: 60.0,
            title_size: 16.0,
            heading_size: 11.0,
            summary_size: 11.0,
            body_size: 10.0,
            summary_leading: 16.0,
            body_leading: 14.0,
        }
    }
}

impl DocumentStyles {
    /// Baseline of the first line on a fresh page.
    pub fn top_y(&self) -> f32 {
        self.page_height - self.margin_top
    }

    /// Maximum line length, in half-width columns, for text set at `size`.
    ///
    /// A full-width glyph is `size` points wide and counts as two columns.
    /// Three columns are held back so closing punctuation can hang past the
    /// limit.
    pub fn max_columns(&self, size: f32) -> usize {
        let printable = self.page_width - 2.0 * self.margin_x;
        let columns = (printable * 2.0 / size).floor() as usize;
        columns.saturating_sub(3).max(1)
    }
}
