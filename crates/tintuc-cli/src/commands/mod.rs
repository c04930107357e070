//! Dashboard commands

pub mod news;
pub mod summarize;
