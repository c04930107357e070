//! Tin Tuc Core Library
//!
//! Error type and the port traits (store and summarization model) the
//! server is wired against.

// Re-export wire types from tintuc-types
pub use tintuc_types::*;

pub mod error;
pub mod ports;

pub use error::{Result, TinTucError};
