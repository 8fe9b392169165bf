//! Rulefeed Application Layer
pub mod cache;
pub mod ports;
pub mod use_cases;
