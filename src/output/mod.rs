//! Result reporting: console text, the per-operation CSV log and JSON summaries

pub mod csv;
pub mod json;
pub mod text;
