//! shujii-export
//!
//! Narrative sanitization, page layout and PDF generation for the
//! diagnosis report.

pub mod error;
pub mod layout;
pub mod pdf;
pub mod render;
pub mod sanitize;
pub mod styles;
