//! shujii-audit
//!
//! Best-effort usage events (page visits and diagnosis starts). Recording
//! never fails from the caller's point of view.

pub mod error;
pub mod events;
pub mod sink;
