//! Storage layer
//!
//! SQLite through an sqlx pool. Each query checks a connection out of the
//! pool and hands it back when the query future completes or is dropped.

pub mod db;
pub mod seed;

pub use db::Database;
