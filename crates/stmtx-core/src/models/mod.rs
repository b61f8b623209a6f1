//! Data models: configuration and statement tables.

pub mod config;
pub mod statement;
