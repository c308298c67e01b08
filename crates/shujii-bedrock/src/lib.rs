//! shujii-bedrock
//!
//! Prompt construction and narrative generation via the Bedrock Converse API.

pub mod error;
pub mod narrative;
pub mod prompt;
