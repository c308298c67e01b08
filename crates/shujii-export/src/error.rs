use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// A character reached the PDF encoder that the two-byte font encoding
    /// cannot represent. Sanitization should have removed it.
    #[error("character {ch:?} cannot be encoded in line {line:?}")]
    Unencodable { ch: char, line: String },

    #[error("text drawn before a font was selected on page {page}")]
    NoFontSelected { page: usize },

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("PDF I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for ExportError {
    fn from(e: lopdf::Error) -> Self {
        ExportError::Pdf(e.to_string())
    }
}
