//! Command implementations

pub mod check;
pub mod clean;
pub mod config;
pub mod list;
pub mod version;
