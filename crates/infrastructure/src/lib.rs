//! Rulefeed Infrastructure Layer
pub mod cache;
pub mod database;
pub mod feed;
pub mod repositories;
