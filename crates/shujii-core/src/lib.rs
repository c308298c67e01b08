//! shujii-core
//!
//! Pure domain types for the IT主治医 diagnosis: the question catalogue,
//! validated answer sets, the score-to-category classifier and the radar
//! chart series. No AWS dependency; this is the shared vocabulary of the
//! other shujii crates.

pub mod chart;
pub mod classify;
pub mod error;
pub mod models;
