//! Utility helpers shared across modules

pub mod pacing;
pub mod time;
