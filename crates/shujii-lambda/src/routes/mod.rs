pub mod classify;
pub mod diagnosis;
pub mod events;
pub mod health;
pub mod questions;
